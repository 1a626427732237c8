use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::page::RawTable;

/// First table across the top, the rest side by side below it
pub fn render_raw_tables(frame: &mut Frame, area: Rect, tables: &[RawTable]) {
    let Some((first, rest)) = tables.split_first() else {
        return;
    };

    let first_height = first.rows.len() as u16 + 3; // borders + header
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(first_height), Constraint::Min(0)])
        .split(area);

    render_raw_table(frame, chunks[0], first);

    if rest.is_empty() {
        return;
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, rest.len() as u32); rest.len()])
        .split(chunks[1]);
    for (table, col) in rest.iter().zip(cols.iter()) {
        render_raw_table(frame, *col, table);
    }
}

/// Column widths fitted to the widest header or cell
fn column_widths(table: &RawTable) -> Vec<Constraint> {
    (0..table.header.len())
        .map(|i| {
            let cells = table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count());
            let widest = cells.chain(std::iter::once(table.header[i].chars().count())).max();
            Constraint::Length(widest.unwrap_or(0) as u16 + 1)
        })
        .collect()
}

fn render_raw_table(frame: &mut Frame, area: Rect, table: &RawTable) {
    let header_cells = table
        .header
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1).bottom_margin(0);

    let last = table.rows.len().saturating_sub(1);
    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = row.iter().enumerate().map(|(col, value)| {
                // month column left, numbers right
                let alignment = if col == 0 { Alignment::Left } else { Alignment::Right };
                Cell::from(Line::from(value.clone()).alignment(alignment))
            });

            let style = if row.first().is_some_and(|m| m.starts_with("ACUMULADO")) && i == last {
                Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(cells).style(style).height(1)
        })
        .collect();

    let widget = Table::new(rows, column_widths(table))
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", table.title))
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

    frame.render_widget(widget, area);
}
