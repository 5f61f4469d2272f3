//! Bottom status bar: current route, backend address, key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let spans = vec![
        Span::styled(format!(" {} ", app.route.path()), theme.heading()),
        Span::styled(app.base_url.as_str(), theme.label()),
        Span::raw(" | "),
        Span::styled(
            "[t]oggle sessions [Tab]focus [j/k]move [Enter]open [Esc]back [q]uit",
            theme.hint(),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
