use super::actions::Action;
use crossterm::event::{poll, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Merges terminal input with background actions.
pub struct EventHandler {
    tick_rate: Duration,
    receiver: mpsc::UnboundedReceiver<Action>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, receiver: mpsc::UnboundedReceiver<Action>) -> Self {
        Self { tick_rate, receiver }
    }

    /// Next message for the loop: a queued background action first, then
    /// terminal input, otherwise a tick after waiting up to `tick_rate` for
    /// background work.
    pub async fn next_event(&mut self) -> anyhow::Result<EventType> {
        if let Ok(action) = self.receiver.try_recv() {
            return Ok(EventType::Background(action));
        }

        // Check for terminal events without blocking first
        if poll(Duration::from_millis(0))? {
            return Ok(match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => EventType::Key(key),
                Event::Resize(w, h) => EventType::Resize(w, h),
                _ => EventType::Other,
            });
        }

        tokio::select! {
            Some(action) = self.receiver.recv() => Ok(EventType::Background(action)),
            _ = tokio::time::sleep(self.tick_rate) => Ok(EventType::Tick),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventType {
    Key(KeyEvent),
    Resize(u16, u16),
    Background(Action),
    Tick,
    Other,
}
