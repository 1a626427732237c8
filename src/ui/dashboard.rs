use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::error::Result;
use crate::metrics::Metric;
use crate::page::{Page, Section, METRICS_TITLE};
use crate::ui::charts::{render_figure, render_section_error};

/// Border + value line + up to two label lines
const METRICS_HEIGHT: u16 = 5;

/// All four chart sections in a 2x2 grid, metrics below
pub fn render_dashboard(frame: &mut Frame, area: Rect, page: &Page, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(METRICS_HEIGHT)])
        .split(area);

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    for (row, row_area) in grid_rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let idx = row * 2 + col;
            if let Some(section) = page.sections.get(idx) {
                render_section(frame, *cell, section, idx == selected);
            }
        }
    }

    render_metrics(frame, chunks[1], &page.metrics);
}

/// The selected chart section at full width, metrics below
pub fn render_focus(frame: &mut Frame, area: Rect, page: &Page, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(METRICS_HEIGHT)])
        .split(area);

    if let Some(section) = page.sections.get(selected) {
        render_section(frame, chunks[0], section, true);
    }

    render_metrics(frame, chunks[1], &page.metrics);
}

fn render_section(frame: &mut Frame, area: Rect, section: &Section, highlighted: bool) {
    match &section.figure {
        Ok(figure) => render_figure(frame, area, figure, highlighted),
        Err(e) => render_section_error(frame, area, section.title, e),
    }
}

fn render_metrics(frame: &mut Frame, area: Rect, metrics: &Result<Vec<Metric>>) {
    let metrics = match metrics {
        Ok(m) => m,
        Err(e) => {
            render_section_error(frame, area, METRICS_TITLE, e);
            return;
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", METRICS_TITLE))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if metrics.is_empty() {
        return;
    }

    let count = metrics.len() as u32;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); metrics.len()])
        .split(inner);

    for (metric, col) in metrics.iter().zip(cols.iter()) {
        let value_style = if metric.value.starts_with('-') || metric.value.starts_with("R$ -") {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let text = Paragraph::new(vec![
            Line::from(Span::styled(metric.value.clone(), value_style)),
            Line::from(Span::styled(metric.label, Style::default().fg(Color::DarkGray))),
        ])
        .wrap(Wrap { trim: true });
        frame.render_widget(text, *col);
    }
}
