//! Scrollbar helper utilities for components with scrollable content.
//!
//! Shared by the table and text panels so both draw the same scrollbar.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Scrollbar state plus the layout rule deciding when it is drawn.
#[derive(Debug, Clone)]
pub struct ScrollbarHelper {
    state: ScrollbarState,
}

impl Default for ScrollbarHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollbarHelper {
    pub fn new() -> Self {
        Self {
            state: ScrollbarState::new(0),
        }
    }

    /// Update the scrollbar state with current content information.
    pub fn update_state(&mut self, total_items: usize, current_position: usize, viewport_height: usize) {
        self.state = self
            .state
            .content_length(total_items)
            .position(current_position)
            .viewport_content_length(viewport_height);
    }

    /// Content taller than the space inside the borders.
    pub fn needs_scrollbar(total_items: usize, available_height: usize) -> bool {
        total_items > available_height
    }

    /// Areas for the content and, when needed, the scrollbar.
    ///
    /// `reserved_rows` are rows inside the borders not used by items (a table header).
    pub fn calculate_areas(rect: Rect, total_items: usize, reserved_rows: u16) -> (Rect, Option<Rect>) {
        let available_height = rect.height.saturating_sub(2 + reserved_rows) as usize;

        if Self::needs_scrollbar(total_items, available_height) {
            let content_area = Rect {
                width: rect.width.saturating_sub(1), // Reserve 1 column for scrollbar
                ..rect
            };
            let scrollbar_area = Rect {
                x: rect.x + rect.width.saturating_sub(1),
                y: rect.y + 1, // Start below top border
                width: 1,
                height: rect.height.saturating_sub(2), // Exclude top and bottom borders
            };
            (content_area, Some(scrollbar_area))
        } else {
            (rect, None)
        }
    }

    pub fn render(&mut self, f: &mut Frame, scrollbar_area: Option<Rect>) {
        if let Some(area) = scrollbar_area {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .style(Style::default().fg(Color::DarkGray))
                .thumb_style(Style::default().fg(Color::DarkGray));

            f.render_stateful_widget(scrollbar, area, &mut self.state);
        }
    }
}
