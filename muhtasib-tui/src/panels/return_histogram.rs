//! Return histogram - distribution of daily rates of return
//!
//! Renders:
//! - A y-axis of probability (share of days per bin)
//! - One column of blocks per bin, gains and losses colored apart
//! - Whole-percent ticks under the first, middle and last bins

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use muhtasib_core::format;
use muhtasib_core::histogram::histogram;

use crate::theme::Theme;

const Y_TITLE: &str = "Probability Distribution";
const X_TITLE: &str = "Daily Rate of Profit";
const LABEL_WIDTH: u16 = 6;
const MAX_BINS: usize = 40;

/// Daily return histogram widget
pub struct ReturnHistogram<'a> {
    returns: &'a [f64],
    theme: &'a Theme,
}

impl<'a> ReturnHistogram<'a> {
    pub fn new(returns: &'a [f64], theme: &'a Theme) -> Self {
        Self { returns, theme }
    }
}

impl<'a> Widget for ReturnHistogram<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {Y_TITLE} "))
            .title_bottom(format!(" {X_TITLE} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.neutral))
            .style(Style::default().bg(self.theme.background));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= LABEL_WIDTH + 2 || inner.height < 3 {
            return;
        }

        let plot_width = inner.width - LABEL_WIDTH;
        let bins = histogram(self.returns, MAX_BINS.min(plot_width as usize));
        if bins.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                "No daily returns yet",
                Style::default().fg(self.theme.muted),
            );
            return;
        }

        let total: usize = bins.iter().map(|b| b.count).sum();
        let peak = bins
            .iter()
            .map(|b| b.probability(total))
            .fold(0.0_f64, f64::max);

        // Last row is reserved for x ticks
        let plot_left = inner.x + LABEL_WIDTH;
        let plot_top = inner.y;
        let plot_height = inner.height - 1;
        let tick_y = inner.bottom() - 1;

        // Y labels: peak probability at the top, zero at the base
        buf.set_string(
            inner.x,
            plot_top,
            format::percent_tick(peak),
            Style::default().fg(self.theme.muted),
        );
        buf.set_string(
            inner.x,
            plot_top + plot_height - 1,
            "0%",
            Style::default().fg(self.theme.muted),
        );

        let column_width = (plot_width as usize / bins.len()).max(1) as u16;
        let bar_width = column_width.saturating_sub(1).max(1);

        for (i, bin) in bins.iter().enumerate() {
            let x0 = plot_left + i as u16 * column_width;
            if x0 >= inner.right() {
                break;
            }
            let height = if peak > 0.0 {
                (bin.probability(total) / peak * plot_height as f64).round() as u16
            } else {
                0
            };
            let style = Style::default().fg(self.theme.pnl_color(bin.midpoint()));
            for h in 0..height.min(plot_height) {
                let y = plot_top + plot_height - 1 - h;
                for dx in 0..bar_width {
                    let x = x0 + dx;
                    if x < inner.right() {
                        buf.set_string(x, y, "\u{2588}", style); // █
                    }
                }
            }
        }

        // X ticks under first, middle and last bins
        let last = bins.len() - 1;
        let mut ticks = vec![0, last / 2, last];
        ticks.dedup();
        let mut next_free = plot_left;
        for idx in ticks {
            let label = format::percent_tick(bins[idx].midpoint());
            let x = (plot_left + idx as u16 * column_width).max(next_free);
            if x + label.len() as u16 <= inner.right() {
                buf.set_string(
                    x,
                    tick_y,
                    &label,
                    Style::default()
                        .fg(self.theme.text_secondary)
                        .add_modifier(Modifier::DIM),
                );
                next_free = x + label.len() as u16 + 1;
            }
        }
    }
}
