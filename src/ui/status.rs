use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::ViewMode;

// Use standard terminal colors
const COLOR_KEY: Color = Color::Cyan;
const COLOR_TITLE: Color = Color::White;

pub fn render_status_bar(frame: &mut Frame, area: Rect, title: &str, view_mode: &ViewMode) {
    let mut spans = vec![
        Span::styled(title.to_string(), Style::default().fg(COLOR_TITLE).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];

    // Tab indicators
    for (i, mode) in ViewMode::all().iter().enumerate() {
        let style = if view_mode == mode {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" [{}]{} ", i + 1, mode.name()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_help_bar(frame: &mut Frame, area: Rect, show_raw: bool) {
    let checkbox = if show_raw { "[x]" } else { "[ ]" };

    let help = Paragraph::new(Line::from(vec![
        Span::styled("[q]", Style::default().fg(COLOR_KEY)),
        Span::raw(" quit  "),
        Span::styled("[Tab]", Style::default().fg(COLOR_KEY)),
        Span::raw(" switch  "),
        Span::styled("[j/k]", Style::default().fg(COLOR_KEY)),
        Span::raw(" select  "),
        Span::styled("[r]", Style::default().fg(COLOR_KEY)),
        Span::raw(" "),
        Span::styled(checkbox, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::raw(" Mostrar dados brutos"),
    ]))
    .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(help, area);
}
