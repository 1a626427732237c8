use anyhow::{bail, Result};
use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};
use std::time::Duration;
use tracing::{debug, info};

use crate::data::Datasets;
use crate::events::{AppEvent, EventSource};
use crate::page::{Page, RawTable};
use crate::ui::{render_dashboard, render_focus, render_help_bar, render_raw_tables, render_status_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    /// Every chart in a grid
    Dashboard,
    /// One chart at full width
    Focus,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Focus => "Focus",
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Dashboard, ViewMode::Focus]
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Dashboard => Self::Focus,
            Self::Focus => Self::Dashboard,
        }
    }
}

pub struct App {
    data: Datasets<'static>,
    page: Page,
    view_mode: ViewMode,
    selected_section: usize,
    show_raw: bool,
}

impl App {
    pub fn new(view_mode: ViewMode, show_raw: bool) -> Self {
        let data = Datasets::load();
        let page = Page::build(&data);
        Self {
            data,
            page,
            view_mode,
            selected_section: 0,
            show_raw,
        }
    }

    #[allow(dead_code)]
    pub fn datasets(&self) -> &Datasets<'static> {
        &self.data
    }

    #[allow(dead_code)]
    pub fn show_raw(&self) -> bool {
        self.show_raw
    }

    /// Raw tables currently on screen
    pub fn visible_raw_tables(&self) -> &[RawTable] {
        if self.show_raw {
            &self.page.raw_tables
        } else {
            &[]
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal, tick_rate: Duration) -> Result<()> {
        let (_source, mut rx) = EventSource::spawn(tick_rate);

        terminal.draw(|frame| self.render(frame))?;

        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::Key(key) => {
                    if self.handle_key(key) {
                        break;
                    }
                }
                AppEvent::Resize => {}
                AppEvent::Tick => continue,
                AppEvent::Error(e) => bail!(e),
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("dashboard closed");
        Ok(())
    }

    /// Apply one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // While the raw data overlay is open, only closing keys apply
        if self.show_raw {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') => {
                    self.show_raw = false;
                    debug!("raw data hidden");
                }
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.view_mode = self.view_mode.next();
            }
            KeyCode::Char('1') => self.view_mode = ViewMode::Dashboard,
            KeyCode::Char('2') => self.view_mode = ViewMode::Focus,
            KeyCode::Char('r') | KeyCode::Char(' ') => {
                self.show_raw = true;
                debug!("raw data shown");
            }
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                if self.selected_section > 0 {
                    self.selected_section -= 1;
                }
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                let max_section = self.page.sections.len().saturating_sub(1);
                if self.selected_section < max_section {
                    self.selected_section += 1;
                }
            }
            _ => {}
        }
        false
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        render_status_bar(frame, chunks[0], self.page.title, &self.view_mode);

        match self.view_mode {
            ViewMode::Dashboard => {
                render_dashboard(frame, chunks[1], &self.page, self.selected_section);
            }
            ViewMode::Focus => {
                render_focus(frame, chunks[1], &self.page, self.selected_section);
            }
        }

        render_help_bar(frame, chunks[2], self.show_raw);

        if self.show_raw {
            self.render_overlay(frame, "Dados brutos", |f, area| {
                render_raw_tables(f, area, self.visible_raw_tables());
            });
        }
    }

    fn render_overlay<F>(&self, frame: &mut Frame, title: &str, render_fn: F)
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let area = frame.area();

        // Center the overlay, taking 90% of screen
        let popup_width = (area.width as f32 * 0.9) as u16;
        let popup_height = (area.height as f32 * 0.9) as u16;
        if popup_width < 5 || popup_height < 3 {
            return;
        }
        let popup_x = (area.width - popup_width) / 2;
        let popup_y = (area.height - popup_height) / 2;

        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        render_fn(frame, inner);

        // Hint at bottom
        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]));
        let hint_area = Rect::new(popup_x + 2, popup_y + popup_height - 1, popup_width - 4, 1);
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(200, 60)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_toggle_reveals_three_tables() {
        let mut app = App::new(ViewMode::Dashboard, false);
        let before = *app.datasets();
        let figures_before: Vec<_> = app.page.sections.iter().map(|s| s.figure.clone()).collect();

        assert!(app.visible_raw_tables().is_empty());
        assert!(!press(&mut app, KeyCode::Char('r')));
        assert!(app.show_raw());
        assert_eq!(app.visible_raw_tables().len(), 3);

        let after = app.datasets();
        assert!(std::ptr::eq(before.revenue, after.revenue));
        assert!(std::ptr::eq(before.cash, after.cash));
        assert!(std::ptr::eq(before.inventory, after.inventory));

        let figures_after: Vec<_> = app.page.sections.iter().map(|s| s.figure.clone()).collect();
        assert_eq!(figures_before, figures_after);
    }

    #[test]
    fn test_raw_overlay_rendering() {
        let mut app = App::new(ViewMode::Dashboard, false);
        let hidden = screen(&app);
        assert!(hidden.contains("[ ] Mostrar dados brutos"));
        assert!(!hidden.contains("Dados de Faturamento"));

        press(&mut app, KeyCode::Char(' '));
        let shown = screen(&app);
        assert!(shown.contains("Dados de Faturamento"));
        assert!(shown.contains("Dados de Saldo de Caixa"));
        assert!(shown.contains("Dados de Nível de Estoques"));
        assert!(shown.contains("[x] Mostrar dados brutos"));
    }

    #[test]
    fn test_overlay_swallows_navigation() {
        let mut app = App::new(ViewMode::Dashboard, true);
        assert!(!press(&mut app, KeyCode::Tab));
        assert_eq!(app.view_mode, ViewMode::Dashboard);
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!app.show_raw());
        // Esc quits once the overlay is closed
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_section_selection_is_clamped() {
        let mut app = App::new(ViewMode::Focus, false);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_section, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected_section, 3);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_section, 2);
    }

    #[test]
    fn test_view_switching() {
        let mut app = App::new(ViewMode::Dashboard, false);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view_mode, ViewMode::Focus);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.view_mode, ViewMode::Dashboard);
        assert!(press(&mut app, KeyCode::Char('q')));
    }
}
