//! Layout management and calculations

use crate::constants::{BORDER_ALLOWANCE, CELL_PADDING};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width policy of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Exact width in cells.
    Fixed(u16),
    /// Share of the flexible budget, by weight.
    Flex(u16),
    /// Kept in the row data, never drawn.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub width: ColumnWidth,
}

impl ColumnSpec {
    pub const fn fixed(title: &'static str, width: u16) -> Self {
        Self {
            title,
            width: ColumnWidth::Fixed(width),
        }
    }

    pub const fn flex(title: &'static str, weight: u16) -> Self {
        Self {
            title,
            width: ColumnWidth::Flex(weight),
        }
    }

    pub const fn hidden(title: &'static str) -> Self {
        Self {
            title,
            width: ColumnWidth::Hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.width != ColumnWidth::Hidden
    }
}

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Split the screen into tab bar, body and help line
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area)
            .to_vec()
    }

    /// Header strip showing one pinned row above a body
    #[must_use]
    pub fn detail_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(1), Constraint::Min(0)])
            .split(area)
            .to_vec()
    }

    /// Input bar above a panel
    #[must_use]
    pub fn input_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area)
            .to_vec()
    }

    /// Repositories, packages and versions side by side (1/4, 1/4, 2/4)
    #[must_use]
    pub fn three_panel_layout(area: Rect) -> Vec<Rect> {
        let quarter = area.width / 4;
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(quarter),
                Constraint::Length(quarter),
                Constraint::Length(area.width.saturating_sub(quarter * 2)),
            ])
            .split(area)
            .to_vec()
    }

    /// Distribute `total` cells among `columns`.
    ///
    /// The border allowance comes off first, then the fixed widths. Flex
    /// columns share what is left by weight minus their cell padding, and the
    /// last visible column absorbs the rounding so that
    /// `Σ(width + CELL_PADDING) + BORDER_ALLOWANCE == total`.
    /// Hidden columns get 0 and no padding.
    #[must_use]
    pub fn column_widths(total: u16, columns: &[ColumnSpec]) -> Vec<u16> {
        let target = i32::from(total) - i32::from(BORDER_ALLOWANCE);
        let padding = i32::from(CELL_PADDING);

        let fixed: i32 = columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => i32::from(w),
                _ => 0,
            })
            .sum();
        let total_weight: i32 = columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Flex(weight) => i32::from(weight),
                _ => 0,
            })
            .sum();
        let budget = target - fixed;

        let mut widths: Vec<i32> = columns
            .iter()
            .map(|c| match c.width {
                ColumnWidth::Fixed(w) => i32::from(w),
                ColumnWidth::Flex(weight) if total_weight > 0 => {
                    (budget * i32::from(weight) / total_weight - padding).max(0)
                }
                ColumnWidth::Flex(_) | ColumnWidth::Hidden => 0,
            })
            .collect();

        let used: i32 = columns
            .iter()
            .zip(&widths)
            .filter(|(c, _)| c.is_visible())
            .map(|(_, w)| w + padding)
            .sum();

        let visible: Vec<usize> = (0..columns.len()).filter(|i| columns[*i].is_visible()).collect();
        if let Some((&last, rest)) = visible.split_last() {
            widths[last] += target - used;
            // Too narrow for the last column: shrink its neighbours right to left
            let mut deficit = (-widths[last]).max(0);
            widths[last] = widths[last].max(0);
            for &i in rest.iter().rev() {
                let taken = deficit.min(widths[i]);
                widths[i] -= taken;
                deficit -= taken;
            }
        }

        widths
            .into_iter()
            .map(|w| u16::try_from(w.max(0)).unwrap_or(u16::MAX))
            .collect()
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }

    /// Calculate a centered rectangle with percentage width and fixed line height
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height_lines),
                Constraint::Min(0),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
