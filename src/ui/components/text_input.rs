//! Single-line input with an optional suggestion list.

use crate::ui::core::debounce::Debouncer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Duration;

/// Suggestions shown under the input
const MAX_VISIBLE_SUGGESTIONS: usize = 5;

/// What a key did to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The value changed
    Edited,
    Submitted,
    Cancelled,
    /// Cursor or suggestion movement
    Moved,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct TextInput {
    pub prompt: &'static str,
    pub input_buffer: String,
    pub cursor_position: usize,
    focused: bool,
    suggestions: Vec<String>,
    selected_suggestion: Option<usize>,
    debouncer: Option<Debouncer>,
}

impl TextInput {
    pub fn new(prompt: &'static str) -> Self {
        Self {
            prompt,
            input_buffer: String::new(),
            cursor_position: 0,
            focused: false,
            suggestions: Vec::new(),
            selected_suggestion: None,
            debouncer: None,
        }
    }

    /// Input that looks up suggestions once typing pauses for `interval`.
    pub fn with_suggestions(prompt: &'static str, interval: Duration) -> Self {
        Self {
            debouncer: Some(Debouncer::new(interval)),
            ..Self::new(prompt)
        }
    }

    pub fn value(&self) -> &str {
        &self.input_buffer
    }

    pub fn set_value(&mut self, value: &str) {
        self.input_buffer = value.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn on_focus(&mut self) {
        self.focused = true;
    }

    pub fn on_blur(&mut self) {
        self.focused = false;
    }

    pub fn debouncer(&self) -> Option<&Debouncer> {
        self.debouncer.as_ref()
    }

    pub fn debouncer_mut(&mut self) -> Option<&mut Debouncer> {
        self.debouncer.as_mut()
    }

    /// Empty the value and suggestions and drop pending lookups.
    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
        self.suggestions.clear();
        self.selected_suggestion = None;
        if let Some(debouncer) = &mut self.debouncer {
            debouncer.invalidate();
        }
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.selected_suggestion = None;
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Suggestions starting with the current value.
    pub fn matching_suggestions(&self) -> Vec<&str> {
        let needle = self.input_buffer.to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| s.to_lowercase().starts_with(&needle))
            .map(String::as_str)
            .take(MAX_VISIBLE_SUGGESTIONS)
            .collect()
    }

    fn byte_position(&self, char_index: usize) -> usize {
        self.input_buffer
            .chars()
            .take(char_index)
            .map(char::len_utf8)
            .sum()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputEvent {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('n') => self.move_suggestion(true),
                KeyCode::Char('p') => self.move_suggestion(false),
                _ => InputEvent::Ignored,
            };
        }

        match key.code {
            KeyCode::Enter => InputEvent::Submitted,
            KeyCode::Esc => InputEvent::Cancelled,
            KeyCode::Char(c) => {
                let byte_pos = self.byte_position(self.cursor_position);
                self.input_buffer.insert(byte_pos, c);
                self.cursor_position += 1;
                self.selected_suggestion = None;
                InputEvent::Edited
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    return InputEvent::Ignored;
                }
                let byte_pos = self.byte_position(self.cursor_position - 1);
                self.input_buffer.remove(byte_pos);
                self.cursor_position -= 1;
                self.selected_suggestion = None;
                InputEvent::Edited
            }
            KeyCode::Delete => {
                if self.cursor_position >= self.input_buffer.chars().count() {
                    return InputEvent::Ignored;
                }
                let byte_pos = self.byte_position(self.cursor_position);
                self.input_buffer.remove(byte_pos);
                InputEvent::Edited
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                InputEvent::Moved
            }
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.input_buffer.chars().count());
                InputEvent::Moved
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                InputEvent::Moved
            }
            KeyCode::End => {
                self.cursor_position = self.input_buffer.chars().count();
                InputEvent::Moved
            }
            KeyCode::Down => self.move_suggestion(true),
            KeyCode::Up => self.move_suggestion(false),
            KeyCode::Tab => self.accept_suggestion(),
            _ => InputEvent::Ignored,
        }
    }

    fn move_suggestion(&mut self, forward: bool) -> InputEvent {
        let count = self.matching_suggestions().len();
        if count == 0 {
            return InputEvent::Ignored;
        }
        self.selected_suggestion = Some(match (self.selected_suggestion, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
        InputEvent::Moved
    }

    fn accept_suggestion(&mut self) -> InputEvent {
        let choice = {
            let matching = self.matching_suggestions();
            matching
                .get(self.selected_suggestion.unwrap_or(0))
                .map(|s| (*s).to_string())
        };
        match choice {
            Some(value) if value != self.input_buffer => {
                self.set_value(&value);
                self.selected_suggestion = None;
                InputEvent::Edited
            }
            _ => InputEvent::Ignored,
        }
    }

    /// Rows used by `render` including suggestions.
    pub fn height(&self) -> u16 {
        let shown = if self.focused {
            self.matching_suggestions().len() as u16
        } else {
            0
        };
        3 + shown
    }

    pub fn render(&self, f: &mut Frame, rect: Rect) {
        let layout = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(rect);

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let input = Paragraph::new(self.input_buffer.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.prompt)
                .border_style(border_style),
        );
        f.render_widget(input, layout[0]);

        if !self.focused {
            return;
        }
        f.set_cursor_position((layout[0].x + 1 + self.cursor_position as u16, layout[0].y + 1));

        let matching = self.matching_suggestions();
        if matching.is_empty() || layout[1].height == 0 {
            return;
        }
        let items: Vec<ListItem> = matching.iter().map(|s| ListItem::new(Line::from(*s))).collect();
        let list = List::new(items)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        let mut state = ListState::default();
        state.select(self.selected_suggestion);
        f.render_stateful_widget(list, layout[1], &mut state);
    }
}
