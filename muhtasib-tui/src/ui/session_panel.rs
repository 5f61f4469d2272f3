//! Session detail view: header, statistics tables, equity chart, return
//! histogram and order tape.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use muhtasib_core::{format, SessionDetail};

use crate::app::{AppState, Focus, SessionView};
use crate::panels::{EquityChart, OrderTapePanel, ReturnHistogram};
use crate::theme::Theme;

/// A titled two-column table of display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

pub fn general_information(detail: &SessionDetail) -> StatTable {
    let info = &detail.info;
    StatTable {
        title: "General Information",
        rows: vec![
            ("Created", format::local_datetime(&info.create_time)),
            ("Strategy", info.name.clone()),
            ("Exchange", info.exchange.clone()),
            ("Type", format::trading_type(info.live_trading).to_string()),
        ],
    }
}

pub fn performance(detail: &SessionDetail) -> StatTable {
    StatTable {
        title: "Performance",
        rows: vec![
            ("Annual Rate of Return", format::percent(detail.annual_rate_of_return)),
            ("Annual Turnover", format::currency(detail.annual_turnover)),
            ("Operating Margin", format::percent(detail.operating_margin)),
        ],
    }
}

pub fn risk(detail: &SessionDetail) -> StatTable {
    let stdev = detail.stdev_daily_rate_of_return;
    StatTable {
        title: "Risk",
        rows: vec![
            ("Average Daily Win", format::percent(detail.avg_daily_rate_of_return)),
            ("Worst Daily Loss (95%)", format::percent(format::loss_95(stdev))),
            ("Worst Daily Loss (99%)", format::percent(format::loss_99(stdev))),
        ],
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = &app.view else {
        return;
    };
    let theme = &app.theme;
    let focused = app.focus == Focus::Session;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border(focused))
        .title(Span::styled(" Session Detail ", theme.heading()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_header(f, chunks[0], view, theme);

    match &view.detail {
        Some(detail) if view.is_ready() => render_body(f, chunks[1], view, detail, theme),
        _ => {
            let msg = Paragraph::new(Span::styled("Loading session data...", theme.hint()));
            f.render_widget(msg, chunks[1]);
        }
    }
}

fn render_header(f: &mut Frame, area: Rect, view: &SessionView, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(format!("Session {}", view.session), theme.heading()),
        Span::raw("  "),
        Span::styled("[D] Delete Session Data", Style::default().fg(theme.warning)),
        Span::styled("  [Esc] back", theme.hint()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_body(f: &mut Frame, area: Rect, view: &SessionView, detail: &SessionDetail, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Percentage(50),
            Constraint::Min(8),
        ])
        .split(area);

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    let stats = [general_information(detail), performance(detail), risk(detail)];
    for (table, rect) in stats.iter().zip(tables.iter()) {
        render_stat_table(f, *rect, table, theme);
    }

    f.render_widget(EquityChart::new(view.equity.items(), theme), rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[2]);

    f.render_widget(
        ReturnHistogram::new(&detail.daily_rate_of_returns, theme),
        bottom[0],
    );
    f.render_widget(OrderTapePanel::new(view.orders.items(), theme), bottom[1]);
}

fn render_stat_table(f: &mut Frame, area: Rect, table: &StatTable, theme: &Theme) {
    let rows = table.rows.iter().map(|(label, value)| {
        Row::new(vec![
            Span::styled(*label, theme.label()),
            Span::styled(value.clone(), theme.value()),
        ])
    });

    let widget = Table::new(rows, [Constraint::Length(24), Constraint::Min(8)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border(false))
                .title(Span::styled(format!(" {} ", table.title), theme.heading())),
        )
        .column_spacing(1);
    f.render_widget(widget, area);
}
