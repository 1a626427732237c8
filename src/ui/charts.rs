use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::error::DashboardError;
use crate::figure::{BarFigure, Figure, LineFigure, Placement, ValueAxis};

/// Width of the value axis column, spine included
const AXIS_WIDTH: u16 = 11;
const BAR_GAP: u16 = 1;
/// Bar heights are sent to the widget in 1/BAR_RESOLUTION of the axis max
const BAR_RESOLUTION: u64 = 10_000;

const COLOR_AXIS: Color = Color::DarkGray;
const COLOR_LABEL: Color = Color::Gray;
const COLOR_GRID: Color = Color::Rgb(0x50, 0x50, 0x50);
const GRID_SYMBOL: &str = "┄";

pub fn render_figure(frame: &mut Frame, area: Rect, figure: &Figure, highlighted: bool) {
    let border = if highlighted { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", figure.title()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match figure {
        Figure::Bars(f) => render_bars(frame, inner, f),
        Figure::Lines(f) => render_lines(frame, inner, f),
    }
}

/// Draw a section whose figure could not be built
pub fn render_section_error(frame: &mut Frame, area: Rect, title: &str, error: &DashboardError) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightRed))
        .title(format!(" {} - unavailable ", title))
        .title_style(Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD));

    let text = Paragraph::new(Line::from(vec![
        Span::styled("ERROR: ", Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
        Span::styled(error.to_string(), Style::default().fg(Color::LightRed)),
    ]))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(text, area);
}

/// Shorten a month label to its first word when it does not fit `width`
pub fn compact_label(label: &str, width: u16) -> String {
    let width = width as usize;
    if label.chars().count() <= width {
        return label.to_string();
    }
    let head = label.split_whitespace().next().unwrap_or(label);
    head.chars().take(width).collect()
}

fn bar_width(plot_width: u16, bars: u16) -> u16 {
    (plot_width.saturating_sub(BAR_GAP * (bars - 1)) / bars).max(1)
}

fn bar_units(value: f64, max: f64) -> u64 {
    if max <= 0.0 {
        return 0;
    }
    let scale = BAR_RESOLUTION as f64;
    (value / max * scale).round().clamp(0.0, scale) as u64
}

/// Topmost row a bar of `value` fills
fn bar_top_row(area: Rect, value: f64, max: f64) -> u16 {
    let h = f64::from(area.height);
    let filled = if max > 0.0 {
        (value / max * h).ceil().clamp(1.0, h) as u16
    } else {
        1
    };
    area.bottom() - filled
}

/// Row a canvas point at `value` lands on
fn line_row(area: Rect, value: f64, max: f64) -> u16 {
    let span = f64::from(area.height.saturating_sub(1));
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    area.y + ((1.0 - ratio) * span).round() as u16
}

fn render_value_axis<F>(buf: &mut Buffer, area: Rect, axis: &ValueAxis, row_of: F)
where
    F: Fn(f64) -> u16,
{
    if area.height == 0 || area.width < 2 {
        return;
    }
    let label_width = (area.width - 1) as usize;
    let spine_x = area.right() - 1;
    let spine_style = Style::default().fg(COLOR_AXIS);

    for y in area.top()..area.bottom() {
        buf.set_string(spine_x, y, "│", spine_style);
    }
    for (value, label) in &axis.ticks {
        let y = row_of(*value).clamp(area.top(), area.bottom() - 1);
        buf.set_stringn(
            area.x,
            y,
            format!("{:>width$}", label, width = label_width),
            label_width,
            Style::default().fg(COLOR_LABEL),
        );
        buf.set_string(spine_x, y, "┤", spine_style);
    }
}

fn render_caption(
    frame: &mut Frame,
    area: Rect,
    y_label: &str,
    x_label: &str,
    legend: Vec<Span<'static>>,
) {
    let legend_width: u16 = legend.iter().map(|s| s.width() as u16).sum();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(legend_width)])
        .split(area);

    let caption = Paragraph::new(Line::from(vec![
        Span::styled(y_label.to_string(), Style::default().fg(COLOR_LABEL)),
        Span::styled(" × ", Style::default().fg(COLOR_AXIS)),
        Span::styled(x_label.to_string(), Style::default().fg(COLOR_LABEL)),
    ]));
    frame.render_widget(caption, chunks[0]);

    if legend_width > 0 {
        frame.render_widget(Paragraph::new(Line::from(legend)), chunks[1]);
    }
}

fn render_bars(frame: &mut Frame, area: Rect, figure: &BarFigure) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_caption(frame, rows[0], figure.y_label, figure.x_label, Vec::new());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(AXIS_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    let plot = cols[1];
    let n = figure.bars.len() as u16;
    if n == 0 || plot.height < 2 || plot.width < n {
        return;
    }

    let width = bar_width(plot.width, n);
    let max = figure.axis.max;

    // BarChart keeps the bottom row for labels
    let bar_area = Rect { height: plot.height - 1, ..plot };
    let axis_area = Rect { height: plot.height - 1, ..cols[0] };

    let bars: Vec<Bar> = figure
        .bars
        .iter()
        .map(|b| {
            Bar::default()
                .value(bar_units(b.value, max))
                .label(Line::from(compact_label(&b.label, width)))
                .text_value(String::new())
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .bar_style(Style::default().fg(figure.color))
        .label_style(Style::default().fg(COLOR_LABEL))
        .max(BAR_RESOLUTION);
    frame.render_widget(chart, plot);

    let buf = frame.buffer_mut();
    render_value_axis(buf, axis_area, &figure.axis, |v| bar_top_row(bar_area, v, max));

    // Gridlines only fill blank cells so they stay behind the bars
    let grid_style = Style::default().fg(COLOR_GRID);
    for (value, _) in figure.axis.ticks.iter().skip(1) {
        let y = bar_top_row(bar_area, *value, max);
        for x in bar_area.left()..bar_area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                if cell.symbol() == " " {
                    cell.set_symbol(GRID_SYMBOL).set_style(grid_style);
                }
            }
        }
    }

    let annotation_style = Style::default().fg(Color::White);
    for (i, b) in figure.bars.iter().enumerate() {
        let text_width = b.annotation.chars().count() as u16;
        if text_width > width + BAR_GAP {
            continue;
        }
        let top = bar_top_row(bar_area, b.value, max);
        if top <= bar_area.y {
            continue;
        }
        let bar_x = plot.x + i as u16 * (width + BAR_GAP);
        let x = (bar_x + width / 2).saturating_sub(text_width / 2).max(plot.x);
        if x >= plot.right() {
            continue;
        }
        buf.set_stringn(x, top - 1, &b.annotation, (plot.right() - x) as usize, annotation_style);
    }
}

/// x positions of a dashed horizontal rule
fn dashes(bounds: [f64; 2], cell_width: f64) -> Vec<f64> {
    let step = cell_width * 2.0;
    if step <= 0.0 {
        return Vec::new();
    }
    let count = ((bounds[1] - bounds[0]) / step).floor() as usize;
    (0..=count).map(|i| bounds[0] + i as f64 * step).collect()
}

fn render_lines(frame: &mut Frame, area: Rect, figure: &LineFigure) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let legend = figure
        .series
        .iter()
        .map(|s| Span::styled(format!("{} {}  ", s.marker, s.name), Style::default().fg(s.color)))
        .collect();
    render_caption(frame, rows[0], figure.y_label, figure.x_label, legend);

    let split = |r: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(AXIS_WIDTH), Constraint::Min(0)])
            .split(r)
    };
    let cols = split(rows[1]);
    let label_cols = split(rows[2]);

    let plot = cols[1];
    let n = figure.x_labels.len();
    if n == 0 || plot.width == 0 || plot.height < 2 {
        return;
    }

    let max = figure.axis.max;
    let x_bounds = [-0.5, n as f64 - 0.5];
    let cell_w = n as f64 / f64::from(plot.width);
    let cell_h = max / f64::from(plot.height);
    let grid: Vec<f64> = dashes(x_bounds, cell_w);

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds([0.0, max])
        .paint(|ctx| {
            for (value, _) in figure.axis.ticks.iter().skip(1) {
                let coords: Vec<(f64, f64)> = grid.iter().map(|x| (*x, *value)).collect();
                ctx.draw(&Points { coords: &coords, color: COLOR_AXIS });
            }
            ctx.layer();

            for s in &figure.series {
                for pair in s.points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: s.color,
                    });
                }
            }
            ctx.layer();

            for s in &figure.series {
                for &(x, y) in &s.points {
                    ctx.print(x, y, Span::styled(s.marker.to_string(), Style::default().fg(s.color)));
                }
                for a in &s.annotations {
                    let dy = match a.placement {
                        Placement::Above => cell_h,
                        Placement::Below => -cell_h,
                    };
                    let half = a.text.chars().count() as f64 / 2.0 * cell_w;
                    ctx.print(
                        (a.x - half).max(x_bounds[0]),
                        (a.y + dy).clamp(0.0, max),
                        Span::styled(
                            a.text.clone(),
                            Style::default().fg(s.color).add_modifier(Modifier::DIM),
                        ),
                    );
                }
            }
        });
    frame.render_widget(canvas, plot);

    render_value_axis(frame.buffer_mut(), cols[0], &figure.axis, |v| line_row(plot, v, max));

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(label_cols[1]);
    for (slot, label) in slots.iter().zip(&figure.x_labels) {
        let text = Paragraph::new(compact_label(label, slot.width))
            .alignment(Alignment::Center)
            .style(Style::default().fg(COLOR_LABEL));
        frame.render_widget(text, *slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts;
    use crate::data;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw<F>(width: u16, height: u16, render: F) -> Vec<String>
    where
        F: FnOnce(&mut Frame),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(render).unwrap();
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_compact_label() {
        assert_eq!(compact_label("Jan 2023", 8), "Jan 2023");
        assert_eq!(compact_label("Jan 2023", 5), "Jan");
        assert_eq!(compact_label("Jan 2023", 2), "Ja");
        assert_eq!(compact_label("Dez", 3), "Dez");
    }

    #[test]
    fn test_bar_geometry() {
        assert_eq!(bar_width(107, 12), 8);
        assert_eq!(bar_width(5, 12), 1);
        assert_eq!(bar_units(2.0, 4.0), BAR_RESOLUTION / 2);
        assert_eq!(bar_units(9.0, 4.0), BAR_RESOLUTION);

        let area = Rect::new(0, 0, 10, 10);
        assert_eq!(bar_top_row(area, 4.0, 4.0), 0);
        assert_eq!(bar_top_row(area, 2.0, 4.0), 5);
        assert_eq!(bar_top_row(area, 0.0, 4.0), 9);
        assert_eq!(line_row(area, 4.0, 4.0), 0);
        assert_eq!(line_row(area, 0.0, 4.0), 9);
    }

    #[test]
    fn test_bar_figure_annotations() {
        let fig = charts::realized_by_month(data::revenue()).unwrap();
        let rows = draw(120, 30, |f| render_figure(f, f.area(), &fig, false));

        assert!(rows[0].contains("Faturamento Realizado por Mês"));
        assert!(rows.iter().any(|r| r.contains("2.121.321")));
        assert!(rows.iter().any(|r| r.contains("3.061.424")));
        assert!(rows.iter().any(|r| r.contains("4.000.000┤")));
        assert!(rows.iter().any(|r| r.contains("Jan 2023")));
    }

    #[test]
    fn test_bar_gridlines_behind_bars() {
        let fig = charts::cash_balance(data::cash_balance()).unwrap();
        let rows = draw(120, 30, |f| render_figure(f, f.area(), &fig, false));

        let tick_rows: Vec<&String> = rows.iter().filter(|r| r.contains('┤')).collect();
        assert_eq!(tick_rows.len(), crate::figure::TICK_COUNT);
        // every tick above zero gets a rule, the baseline does not
        let ruled = tick_rows.iter().filter(|r| r.contains(GRID_SYMBOL)).count();
        assert_eq!(ruled, crate::figure::TICK_COUNT - 1);
        // every monthly balance clears the first tick, so bars still show on its rule
        let first_tick = tick_rows[tick_rows.len() - 2];
        assert!(first_tick.contains('█'));
        assert!(first_tick.contains(GRID_SYMBOL));
    }

    #[test]
    fn test_narrow_bars_use_short_labels() {
        let fig = charts::realized_by_month(data::revenue()).unwrap();
        let rows = draw(80, 20, |f| render_figure(f, f.area(), &fig, false));

        assert!(!rows.iter().any(|r| r.contains("Jan 2023")));
        assert!(rows.iter().any(|r| r.contains("Jan")));
        // annotations are dropped rather than overlapping
        assert!(!rows.iter().any(|r| r.contains("2.121.321")));
    }

    #[test]
    fn test_line_figure_legend_and_labels() {
        let fig = charts::realized_vs_budgeted(data::revenue()).unwrap();
        let rows = draw(160, 40, |f| render_figure(f, f.area(), &fig, true));

        assert!(rows[1].contains("● Realizado"));
        assert!(rows[1].contains("■ Orçado"));
        assert!(rows.iter().any(|r| r.contains("Dez 2023")));
        assert!(rows.iter().any(|r| r.contains("5.000.000┤")));
    }

    #[test]
    fn test_section_error_panel() {
        let err = DashboardError::EmptyTable("inventory");
        let rows = draw(60, 6, |f| render_section_error(f, f.area(), "Nível de Estoques", &err));

        assert!(rows[0].contains("Nível de Estoques - unavailable"));
        assert!(rows.iter().any(|r| r.contains("table 'inventory' has no monthly rows")));
    }
}
