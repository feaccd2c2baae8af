use super::actions::{Action, Operation, Outcome, Request, Target};
use crate::catalog::{self, CatalogClient};
use crate::helm::{self, CommandRunner};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs operations and timers off the event loop.
///
/// Every dispatched request produces exactly one `Action::Completed`, every
/// scheduled timer exactly one `Action::DebounceElapsed`, both sent back to
/// the loop over the action channel.
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
    runner: Arc<dyn CommandRunner>,
    catalog: Arc<dyn CatalogClient>,
}

impl TaskManager {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        catalog: Arc<dyn CatalogClient>,
    ) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
                runner,
                catalog,
            },
            rx,
        )
    }

    fn track(&mut self, handle: JoinHandle<()>, description: String) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };
        self.tasks.insert(task_id, task);
        task_id
    }

    /// Run `request` in the background.
    pub fn dispatch(&mut self, request: Request) -> TaskId {
        self.cleanup_finished_tasks();

        let description = request.operation.describe();
        log::info!(
            "Task: {} {}",
            if request.operation.is_mutating() { "mutating" } else { "read" },
            description
        );

        let action_sender = self.action_sender.clone();
        let runner = Arc::clone(&self.runner);
        let catalog = Arc::clone(&self.catalog);

        let handle = tokio::spawn(async move {
            let Request { target, tag, operation } = request;
            let result = match &operation {
                Operation::Helm(command) => helm::execute(runner.as_ref(), command).await,
                Operation::Catalog(query) => catalog::execute(catalog.as_ref(), query).await,
            };

            if let Err(e) = &result {
                log::warn!("Task: {} failed: {}", operation.describe(), e);
            }

            let _ = action_sender.send(Action::Completed(Outcome { target, tag, result }));
        });

        self.track(handle, description)
    }

    /// Deliver `DebounceElapsed { target, tag }` after `delay`.
    pub fn schedule(&mut self, target: Target, tag: u64, delay: Duration) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Debounce {:?} #{}", target, tag);
        // Deadline counts from the keystroke, not from when the task first runs
        let deadline = tokio::time::Instant::now() + delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = action_sender.send(Action::DebounceElapsed { target, tag });
        });

        self.track(handle, description)
    }

    /// Delete a values directory; failures are only logged.
    pub fn remove_dir(&mut self, path: PathBuf) -> TaskId {
        let description = format!("Remove {}", path.display());

        let handle = tokio::spawn(async move {
            if let Err(e) = tokio::fs::remove_dir_all(&path).await {
                log::debug!("Task: could not remove {}: {}", path.display(), e);
            }
        });

        self.track(handle, description)
    }

    /// Forget finished tasks; their results already went through the channel.
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            self.tasks.remove(task_id);
        }
        finished
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.values().filter(|task| !task.handle.is_finished()).count()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
