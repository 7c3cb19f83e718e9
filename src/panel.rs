//! Full-screen report panel.
//!
//! One scrollable read-only text area. Refresh re-runs report assembly on the
//! event loop thread and swaps the text in one piece.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;
use tracing::info;

use crate::view::ReportView;

const POLL_TIME: Duration = Duration::from_millis(250);
const PAGE: u16 = 10;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Refresh,
    Exit,
    None,
}

/// Panel state: the current report text and how far it is scrolled.
#[derive(Default)]
pub struct PanelView {
    text: String,
    scroll: u16,
    refreshing: bool,
}

impl ReportView for PanelView {
    fn replace(&mut self, text: &str) {
        self.text = text.to_string();
        self.scroll = self.scroll.min(self.max_scroll());
        self.refreshing = false;
    }
}

impl PanelView {
    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn max_scroll(&self) -> u16 {
        let lines = self.text.lines().count().saturating_sub(1);
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = next as u16;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PanelAction {
        if key.kind != KeyEventKind::Press {
            return PanelAction::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return PanelAction::Exit,
            KeyCode::Char('r') | KeyCode::F(5) => {
                self.refreshing = true;
                return PanelAction::Refresh;
            }
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(PAGE as i32)),
            KeyCode::PageDown => self.scroll_by(PAGE as i32),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
        PanelAction::None
    }

    fn draw(&self, area: Rect, f: &mut ratatui::Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // report
                Constraint::Length(1), // footer
            ])
            .split(area);

        let body = Paragraph::new(self.text.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" PC Monitor "),
            )
            .scroll((self.scroll, 0));
        f.render_widget(body, layout[0]);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut footer = vec![
            Span::styled(" r/F5", key_style),
            Span::raw(" refresh  "),
            Span::styled("q/Esc", key_style),
            Span::raw(" exit  "),
            Span::styled("↑↓ PgUp PgDn", key_style),
            Span::raw(" scroll"),
        ];
        if self.refreshing {
            footer.push(Span::styled(
                "   collecting...",
                Style::default().fg(Color::Yellow),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(footer)), layout[1]);
    }
}

/// Runs the panel until the user exits. `refresh` builds the report text.
pub fn run_panel<F>(mut refresh: F) -> io::Result<()>
where
    F: FnMut() -> String,
{
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut view = PanelView {
        refreshing: true,
        ..PanelView::default()
    };
    terminal.draw(|f| view.draw(f.area(), f))?;
    view.replace(&refresh());

    loop {
        terminal.draw(|f| view.draw(f.area(), f))?;

        if !event::poll(POLL_TIME)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match view.handle_key(key) {
                PanelAction::Exit => break,
                PanelAction::Refresh => {
                    info!("panel refresh requested");
                    // Show the pending state before blocking on collection.
                    terminal.draw(|f| view.draw(f.area(), f))?;
                    view.replace(&refresh());
                }
                PanelAction::None => {}
            }
        }
    }

    Ok(())
}
