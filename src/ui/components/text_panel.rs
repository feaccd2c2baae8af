//! Scrollable text viewport (notes, manifests, values).

use super::notice::Notice;
use super::scrollbar_helper::ScrollbarHelper;
use crate::constants::LOADING;
use crate::helm::{HelmError, Payload};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct TextPanel {
    title: &'static str,
    content: String,
    scroll: u16,
    focused: bool,
    generation: u64,
    loading: bool,
    notice: Option<Notice>,
    viewport_height: u16,
    scrollbar: ScrollbarHelper,
}

impl TextPanel {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            content: String::new(),
            scroll: 0,
            focused: false,
            generation: 0,
            loading: false,
            notice: None,
            viewport_height: 0,
            scrollbar: ScrollbarHelper::new(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.scroll = 0;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height.saturating_sub(2);
    }

    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn accepts(&self, tag: u64) -> bool {
        self.generation == tag
    }

    /// Apply a load outcome. Returns false when the tag is stale.
    pub fn apply_load(&mut self, tag: u64, result: Result<Payload, HelmError>) -> bool {
        if !self.accepts(tag) {
            log::debug!("{}: dropping stale result #{} (current #{})", self.title, tag, self.generation);
            return false;
        }
        self.loading = false;
        match result {
            Ok(Payload::Text(text)) => {
                self.notice = None;
                self.set_content(text);
            }
            Ok(other) => {
                log::warn!("{}: unexpected payload {:?}", self.title, other);
            }
            Err(e) => {
                self.notice = Some(Notice::from(&e));
                self.set_content(String::new());
            }
        }
        true
    }

    fn line_count(&self) -> u16 {
        u16::try_from(self.content.lines().count()).unwrap_or(u16::MAX)
    }

    fn max_scroll(&self) -> u16 {
        self.line_count().saturating_sub(self.viewport_height)
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Scroll key handling. Returns true if the key was used.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.viewport_height.max(1);
        self.scroll = match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll.saturating_add(page),
            KeyCode::PageUp => self.scroll.saturating_sub(page),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End => self.max_scroll(),
            _ => return false,
        }
        .min(self.max_scroll());
        true
    }

    pub fn render(&mut self, f: &mut Frame, rect: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if self.loading {
            format!(" {} ({}) ", self.title, LOADING)
        } else {
            format!(" {} ", self.title)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        // Error placeholder replaces the content
        let body = match &self.notice {
            Some(notice) => {
                block = block.title_bottom(Line::styled(" error ", notice.style()));
                Paragraph::new(notice.text.as_str()).style(notice.style())
            }
            None => Paragraph::new(self.content.as_str()).scroll((self.scroll, 0)),
        };

        let total = usize::from(self.line_count());
        let (area, scrollbar_area) = ScrollbarHelper::calculate_areas(rect, total, 0);
        f.render_widget(body.block(block), area);

        self.scrollbar
            .update_state(total, usize::from(self.scroll), usize::from(self.viewport_height));
        self.scrollbar.render(f, scrollbar_area);
    }
}
