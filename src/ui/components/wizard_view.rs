use crate::ui::core::wizard::Wizard;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the answered steps and the active one, top to bottom.
pub fn render_wizard<C>(f: &mut Frame, rect: Rect, wizard: &Wizard<C>) {
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}/{}) ", wizard.title(), wizard.current() + 1, wizard.step_count()))
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, rect);

    let inner = rect.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    let inputs: Vec<_> = wizard.visible_inputs().collect();
    let mut constraints: Vec<Constraint> = inputs.iter().map(|input| Constraint::Length(input.height())).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let areas = Layout::vertical(constraints).split(inner);

    for (input, area) in inputs.iter().zip(areas.iter()) {
        input.render(f, *area);
    }

    if let Some(error) = wizard.error() {
        let line = Paragraph::new(error).style(Style::default().fg(Color::Red));
        f.render_widget(line, areas[inputs.len()]);
    }
}
