//! Equity chart - session equity over time
//!
//! x = point time, y = total equity, drawn as a braille line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use chrono::{TimeZone, Utc};
use muhtasib_core::{format, EquityPoint};

use crate::theme::Theme;

/// Equity curve widget
pub struct EquityChart<'a> {
    points: &'a [EquityPoint],
    theme: &'a Theme,
}

impl<'a> EquityChart<'a> {
    pub fn new(points: &'a [EquityPoint], theme: &'a Theme) -> Self {
        Self { points, theme }
    }
}

/// Millisecond timestamps against totals.
pub fn chart_data(points: &[EquityPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.time.timestamp_millis() as f64, p.total))
        .collect()
}

fn time_label(ms: f64) -> String {
    Utc.timestamp_millis_opt(ms as i64)
        .single()
        .map(|t| format::axis_time(&t))
        .unwrap_or_default()
}

impl<'a> Widget for EquityChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let last = self.points.last().map(|p| p.total).unwrap_or_default();
        let title = format!(
            " Equity | {} points | last {} ",
            self.points.len(),
            format::currency(last)
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let data = chart_data(self.points);

        let x_min = data.first().map(|&(x, _)| x).unwrap_or(0.0);
        let x_last = data.last().map(|&(x, _)| x).unwrap_or(0.0);
        let x_max = if x_last > x_min { x_last } else { x_min + 1.0 };

        let y_min = data.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
        let y_max = data.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);
        let (y_lower, y_upper) = if y_min.is_finite() && y_max.is_finite() {
            // Add padding to Y axis
            let y_range = y_max - y_min;
            let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 100.0 };
            (y_min - y_pad, y_max + y_pad)
        } else {
            (0.0, 1.0)
        };
        let y_mid = (y_lower + y_upper) / 2.0;

        let datasets = vec![Dataset::default()
            .name("Equity")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.theme.equity_line))
            .data(&data)];

        let x_labels = vec![
            Span::raw(time_label(x_min)),
            Span::raw(time_label((x_min + x_max) / 2.0)),
            Span::raw(time_label(x_max)),
        ];
        let y_labels = vec![
            Span::raw(format::currency(y_lower)),
            Span::raw(format::currency(y_mid)),
            Span::raw(format::currency(y_upper)),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .title(Span::styled("Time", Style::default().fg(self.theme.text_secondary)))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "Equity USD",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::equity;

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut content = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                content.push_str(buf.cell((x, y)).unwrap().symbol());
            }
        }
        content
    }

    #[test]
    fn chart_data_uses_time_and_total() {
        let pts = equity(3);
        let data = chart_data(&pts);
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].0, pts[0].time.timestamp_millis() as f64);
        assert_eq!(data[2].1, pts[2].total);
        assert!(data[1].0 > data[0].0);
    }

    #[test]
    fn renders_axis_titles() {
        let theme = Theme::default();
        let pts = equity(20);
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        EquityChart::new(&pts, &theme).render(area, &mut buf);

        let content = buffer_text(&buf, area);
        assert!(content.contains("Equity USD"));
        assert!(content.contains("20 points"));
    }

    #[test]
    fn single_point_renders_without_panic() {
        let theme = Theme::default();
        let pts = equity(1);
        let area = Rect::new(0, 0, 60, 15);
        let mut buf = Buffer::empty(area);
        EquityChart::new(&pts, &theme).render(area, &mut buf);
    }

    #[test]
    fn empty_series_renders_without_panic() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 15);
        let mut buf = Buffer::empty(area);
        EquityChart::new(&[], &theme).render(area, &mut buf);
    }
}
