//! Top-level UI layout: directory sidebar, main area, status bar.

pub mod directory_panel;
pub mod session_panel;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;

const SIDEBAR_WIDTH: u16 = 36;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let body = chunks[0];
    let status_area = chunks[1];

    let main_area = if app.directory.visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(body);
        directory_panel::render(f, cols[0], app);
        cols[1]
    } else {
        body
    };

    if app.view.is_some() {
        session_panel::render(f, main_area, app);
    } else {
        render_home(f, main_area, app);
    }

    status_bar::render(f, status_area, app);
}

fn render_home(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(false))
        .title(Span::styled(" Muhtasib ", theme.heading()));
    let lines = vec![
        Line::from(Span::styled("Trading session dashboard", theme.heading())),
        Line::from(""),
        Line::from(Span::styled(
            "Pick a session from the sidebar and press Enter.",
            theme.hint(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}
