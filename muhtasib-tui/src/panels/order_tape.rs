//! Order tape panel - orders placed by the session, newest first
//!
//! Displays:
//! - Order ID
//! - Market
//! - Side (BUY/SELL)
//! - Ordered size, price and time
//! - Executed size and price, or "pending"

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use muhtasib_core::{format, Order};

use crate::theme::Theme;

/// Order tape panel widget
pub struct OrderTapePanel<'a> {
    orders: &'a [Order],
    theme: &'a Theme,
}

impl<'a> OrderTapePanel<'a> {
    pub fn new(orders: &'a [Order], theme: &'a Theme) -> Self {
        Self { orders, theme }
    }
}

fn executed_cell(order: &Order) -> String {
    match (order.executed_size, order.executed_price) {
        (Some(size), Some(price)) => format!("{} @ {}", format::number(size), format::number(price)),
        _ => "pending".to_string(),
    }
}

impl<'a> Widget for OrderTapePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let executed = self.orders.iter().filter(|o| o.is_executed()).count();
        let block = Block::default()
            .title(format!(
                " Orders ({} placed, {} executed) ",
                self.orders.len(),
                executed
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .style(Style::default().bg(self.theme.background));

        let header_cells = ["ID", "Market", "Side", "Size", "Price", "Ordered", "Executed"]
            .iter()
            .map(|h| {
                Cell::from(*h).style(
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            });
        let header = Row::new(header_cells).height(1);

        let rows = self.orders.iter().rev().map(|order| {
            let style = if order.is_executed() {
                Style::default().fg(self.theme.text_primary)
            } else {
                Style::default().fg(self.theme.muted)
            };

            let cells = vec![
                Cell::from(order.order_id.chars().take(10).collect::<String>()),
                Cell::from(order.market.clone()),
                Cell::from(order.side.label())
                    .style(Style::default().fg(self.theme.side_color(order.side))),
                Cell::from(format::number(order.ordered_size)),
                Cell::from(format::number(order.ordered_price)),
                Cell::from(format::local_datetime(&order.ordered_time)),
                Cell::from(executed_cell(order)),
            ];

            Row::new(cells).style(style).height(1)
        });

        let widths = [
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(23),
            Constraint::Min(16),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);

        table.render(area, buf);
    }
}
