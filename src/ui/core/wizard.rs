//! Step-sequenced input flows.
//!
//! A [`Wizard`] is built from step specs and a completion binding, then
//! opened with a context (the release being upgraded, the chart being
//! installed, ...). It never talks to the dispatcher itself: [`Wizard::advance`]
//! tells the owning tab what happened and the tab turns that into effects.

use super::actions::{EditorRequest, Operation};
use crate::ui::components::text_input::TextInput;
use std::time::Duration;

/// Decision of a branch step for a recognized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Branch {
    Continue,
    /// Open the editor, then continue with the next step
    Edit(EditorRequest),
}

/// Branch function: `None` for an unrecognized value.
pub type BranchFn<C> = fn(&C, &[String], &str) -> Option<Branch>;

/// Rejects a step's value with the reason shown to the user.
pub type CheckFn = fn(&str) -> Result<(), String>;

/// Builds the operation issued by the terminal step.
pub type CompleteFn<C> = fn(&C, &[String]) -> Operation;

pub enum StepKind<C> {
    Text,
    /// Text with debounced suggestions
    Suggest,
    Branch(BranchFn<C>),
    /// Terminal step, its value is ignored
    Confirm,
}

struct WizardStep<C> {
    kind: StepKind<C>,
    input: TextInput,
    check: Option<CheckFn>,
}

/// Result of [`Wizard::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Now on this step
    Moved(usize),
    /// Unrecognized branch value, nothing changed
    Parked,
    /// Run the editor; [`Wizard::resume`] continues afterwards
    Suspend(EditorRequest),
    /// Issue this operation. The wizard is already reset.
    Complete(Operation),
    Inactive,
}

pub struct Wizard<C> {
    title: &'static str,
    steps: Vec<WizardStep<C>>,
    current: usize,
    context: Option<C>,
    complete: CompleteFn<C>,
    debounce: Duration,
    error: Option<String>,
}

impl<C> Wizard<C> {
    pub fn new(title: &'static str, complete: CompleteFn<C>, debounce: Duration) -> Self {
        Self {
            title,
            steps: Vec::new(),
            current: 0,
            context: None,
            complete,
            debounce,
            error: None,
        }
    }

    /// Append a step.
    pub fn step(mut self, prompt: &'static str, kind: StepKind<C>) -> Self {
        let input = match kind {
            StepKind::Suggest => TextInput::with_suggestions(prompt, self.debounce),
            _ => TextInput::new(prompt),
        };
        self.steps.push(WizardStep {
            kind,
            input,
            check: None,
        });
        self
    }

    /// Validate the value of the step added last before the wizard moves on.
    pub fn checked(mut self, check: CheckFn) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.check = Some(check);
        }
        self
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Open on step 0 with `context`.
    pub fn open(&mut self, context: C) {
        self.reset();
        self.context = Some(context);
        if let Some(step) = self.steps.first_mut() {
            step.input.on_focus();
        }
    }

    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn values(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.input.value().trim().to_string()).collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&self, step: usize) -> Option<&TextInput> {
        self.steps.get(step).map(|s| &s.input)
    }

    pub fn input_mut(&mut self, step: usize) -> Option<&mut TextInput> {
        self.steps.get_mut(step).map(|s| &mut s.input)
    }

    /// Input of the step holding focus.
    pub fn current_input_mut(&mut self) -> Option<&mut TextInput> {
        if !self.is_active() {
            return None;
        }
        self.input_mut(self.current)
    }

    /// Current step looks up suggestions.
    pub fn current_suggests(&self) -> bool {
        self.is_active() && matches!(self.steps.get(self.current).map(|s| &s.kind), Some(StepKind::Suggest))
    }

    /// Inputs completed so far and the one being edited.
    pub fn visible_inputs(&self) -> impl Iterator<Item = &TextInput> {
        let shown = if self.is_active() { self.current + 1 } else { 0 };
        self.steps.iter().take(shown).map(|s| &s.input)
    }

    pub fn advance(&mut self) -> Advance {
        let Some(context) = &self.context else {
            return Advance::Inactive;
        };

        let values = self.values();
        // Every answered step is re-checked, the terminal one included
        let failed = self
            .steps
            .iter()
            .take(self.current + 1)
            .zip(&values)
            .find_map(|(step, value)| step.check.and_then(|check| check(value).err()));
        if let Some(reason) = failed {
            self.error = Some(reason);
            return Advance::Parked;
        }

        if self.current + 1 >= self.steps.len() {
            let operation = (self.complete)(context, &values);
            self.reset();
            return Advance::Complete(operation);
        }

        let decision = match &self.steps[self.current].kind {
            StepKind::Branch(branch) => branch(context, &values, &values[self.current]),
            StepKind::Text | StepKind::Suggest | StepKind::Confirm => Some(Branch::Continue),
        };

        match decision {
            None => Advance::Parked,
            Some(Branch::Continue) => self.move_to(self.current + 1),
            Some(Branch::Edit(request)) => {
                self.error = None;
                Advance::Suspend(request)
            }
        }
    }

    /// Editor finished: move past the branch step, or report why it could not open.
    pub fn resume(&mut self, result: Result<(), String>) -> Advance {
        if !self.is_active() {
            return Advance::Inactive;
        }
        match result {
            Ok(()) => self.move_to(self.current + 1),
            Err(reason) => {
                self.error = Some(reason);
                Advance::Parked
            }
        }
    }

    fn move_to(&mut self, index: usize) -> Advance {
        self.error = None;
        if let Some(step) = self.steps.get_mut(self.current) {
            step.input.on_blur();
        }
        self.current = index.min(self.steps.len().saturating_sub(1));
        if let Some(step) = self.steps.get_mut(self.current) {
            step.input.on_focus();
        }
        Advance::Moved(self.current)
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.current = 0;
        self.context = None;
        self.error = None;
        for step in &mut self.steps {
            step.input.clear();
            step.input.on_blur();
        }
    }
}
