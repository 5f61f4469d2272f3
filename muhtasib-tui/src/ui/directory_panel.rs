//! Sidebar: the session directory, one link per session.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, DirectoryState, Focus};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let dir = &app.directory;
    let theme = &app.theme;
    let focused = app.focus == Focus::Directory;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title(Span::styled(" Sessions ", theme.heading()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if dir.sessions.is_empty() {
        lines.push(Line::from(Span::styled("No sessions.", theme.hint())));
    } else {
        // Keep the cursor in view
        let visible = inner.height as usize;
        let start = (dir.cursor + 1).saturating_sub(visible);

        for (i, session) in dir.sessions.iter().enumerate().skip(start).take(visible) {
            let is_open = app.route.session() == Some(&session.session_id);
            let style = if focused && i == dir.cursor {
                theme.selected()
            } else if is_open {
                theme.heading()
            } else {
                theme.value()
            };
            let marker = if is_open { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, theme.heading()),
                Span::styled(DirectoryState::entry_label(session), style),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
