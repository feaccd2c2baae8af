//! Tabular panel bound to one data source.

use super::notice::Notice;
use super::scrollbar_helper::ScrollbarHelper;
use crate::constants::{CELL_PADDING, LOADING};
use crate::helm::{HelmError, Payload, Row};
use crate::ui::layout::{ColumnSpec, LayoutManager};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState},
    Frame,
};

pub struct TablePanel {
    title: &'static str,
    columns: &'static [ColumnSpec],
    rows: Vec<Row>,
    state: TableState,
    focused: bool,
    generation: u64,
    loading: bool,
    notice: Option<Notice>,
    /// Full row set while a single selected row is pinned on screen
    pinned: Option<(Vec<Row>, usize)>,
    viewport_height: u16,
    scrollbar: ScrollbarHelper,
}

impl TablePanel {
    pub fn new(title: &'static str, columns: &'static [ColumnSpec]) -> Self {
        Self {
            title,
            columns,
            rows: Vec::new(),
            state: TableState::default(),
            focused: false,
            generation: 0,
            loading: false,
            notice: None,
            pinned: None,
            viewport_height: 0,
            scrollbar: ScrollbarHelper::new(),
        }
    }

    pub fn columns(&self) -> &'static [ColumnSpec] {
        self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected().filter(|i| *i < self.rows.len())
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.selected_index().and_then(|i| self.rows.get(i))
    }

    /// Cell `column` of the selected row.
    pub fn selected_cell(&self, column: usize) -> Option<&str> {
        self.selected_row().and_then(|row| row.get(column)).map(String::as_str)
    }

    pub fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(index.min(self.rows.len() - 1)));
        }
    }

    /// Viewport rows inside borders and header.
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height.saturating_sub(3);
    }

    /// Column widths for a panel `width` cells wide.
    pub fn column_widths(&self, width: u16) -> Vec<u16> {
        LayoutManager::column_widths(width, self.columns)
    }

    /// Replace the rows, keeping the cursor where it was if possible.
    ///
    /// While a row is pinned the new rows become the restore set and the
    /// pinned row stays on screen.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        if let Some((saved, cursor)) = &mut self.pinned {
            *cursor = (*cursor).min(rows.len().saturating_sub(1));
            *saved = rows;
            return;
        }
        let cursor = self.state.selected().unwrap_or(0);
        self.rows = rows;
        self.select(cursor);
    }

    /// Start a load and return the tag its outcome must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Empty the panel and drop any load still in flight.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.notice = None;
        self.pinned = None;
        self.rows.clear();
        self.state.select(None);
    }

    pub fn accepts(&self, tag: u64) -> bool {
        self.generation == tag
    }

    /// Apply a load outcome. Returns false when the tag is stale.
    ///
    /// Any failure, parse failures included, leaves the panel empty with an
    /// error notice.
    pub fn apply_load(&mut self, tag: u64, result: Result<Payload, HelmError>) -> bool {
        if !self.accepts(tag) {
            log::debug!("{}: dropping stale result #{} (current #{})", self.title, tag, self.generation);
            return false;
        }
        self.loading = false;
        match result {
            Ok(Payload::Rows(rows)) => {
                // A confirmation from the mutation that caused this reload stays
                self.notice = self.notice.take().filter(|n| !n.is_error());
                self.set_rows(rows);
            }
            Ok(other) => {
                log::warn!("{}: unexpected payload {:?}", self.title, other);
            }
            Err(e) => {
                self.notice = Some(Notice::from(&e));
                self.set_rows(Vec::new());
            }
        }
        true
    }

    /// Show only the selected row until [`TablePanel::unpin`].
    pub fn pin_selected(&mut self) -> bool {
        let (Some(index), None) = (self.selected_index(), &self.pinned) else {
            return false;
        };
        let selected = self.rows[index].clone();
        let saved = std::mem::replace(&mut self.rows, vec![selected]);
        self.pinned = Some((saved, index));
        self.state.select(Some(0));
        true
    }

    /// Restore the full row set
    pub fn unpin(&mut self) {
        if let Some((rows, cursor)) = self.pinned.take() {
            self.rows = rows;
            self.select(cursor);
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// Cursor key handling. Returns true if the selection changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.rows.is_empty() || self.pinned.is_some() {
            return false;
        }
        let before = self.selected_index();
        let current = before.unwrap_or(0);
        let last = self.rows.len() - 1;
        let page = usize::from(self.viewport_height.max(1));

        let next = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if before.is_none() {
                    0
                } else {
                    (current + 1).min(last)
                }
            }
            KeyCode::Up | KeyCode::Char('k') => current.saturating_sub(1),
            KeyCode::Home | KeyCode::Char('g') => 0,
            KeyCode::End => last,
            KeyCode::PageDown => (current + page).min(last),
            KeyCode::PageUp => current.saturating_sub(page),
            _ => return false,
        };
        self.select(next);
        self.selected_index() != before
    }

    pub fn render(&mut self, f: &mut Frame, rect: Rect) {
        let widths = self.column_widths(rect.width);
        let visible: Vec<usize> = (0..self.columns.len()).filter(|i| self.columns[*i].is_visible()).collect();

        let header = TableRow::new(
            visible
                .iter()
                .map(|i| Cell::from(self.columns[*i].title))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<TableRow> = self
            .rows
            .iter()
            .map(|row| {
                TableRow::new(
                    visible
                        .iter()
                        .map(|i| Cell::from(row.get(*i).cloned().unwrap_or_default()))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let constraints: Vec<Constraint> = visible.iter().map(|i| Constraint::Length(widths[*i])).collect();

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
        if let Some(notice) = &self.notice {
            block = block.title_bottom(Line::styled(format!(" {} ", notice.text), notice.style()));
        }

        let (table_area, scrollbar_area) = ScrollbarHelper::calculate_areas(rect, self.rows.len(), 1);
        let table = Table::new(rows, constraints)
            .header(header)
            .block(block)
            .column_spacing(CELL_PADDING)
            .row_highlight_style(if self.focused {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default().add_modifier(Modifier::REVERSED)
            });

        f.render_stateful_widget(table, table_area, &mut self.state);

        self.scrollbar.update_state(
            self.rows.len(),
            self.selected_index().unwrap_or(0),
            usize::from(self.viewport_height),
        );
        self.scrollbar.render(f, scrollbar_area);
    }
}
