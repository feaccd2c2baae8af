use super::actions::Effect;
use crossterm::event::{Event, KeyEvent};
use ratatui::{layout::Rect, Frame};

/// A top-level tab. Key handling and result handling return the work to
/// perform instead of performing it.
pub trait Component {
    /// Initial fetches
    fn init(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_events(&mut self, event: Option<Event>) -> Vec<Effect> {
        match event {
            Some(Event::Key(key)) => self.handle_key_events(key),
            Some(Event::Resize(w, h)) => {
                self.resize(w, h);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Vec<Effect>;

    /// The external editor exited (or could not be prepared).
    fn on_editor_finished(&mut self, _result: Result<(), String>) -> Vec<Effect> {
        Vec::new()
    }

    /// Body area available to the tab.
    fn resize(&mut self, _width: u16, _height: u16) {}

    /// A text input holds focus, so global single-key shortcuts are off.
    fn captures_input(&self) -> bool {
        false
    }

    fn help(&self) -> &'static str;

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
