//! Session view widgets
//!
//! - EquityChart: equity over time
//! - ReturnHistogram: daily rate of return distribution
//! - OrderTapePanel: orders placed by the session

pub mod equity_chart;
pub mod order_tape;
pub mod return_histogram;

pub use equity_chart::EquityChart;
pub use order_tape::OrderTapePanel;
pub use return_histogram::ReturnHistogram;
