//! Muhtasib TUI - terminal dashboard for trading sessions
//!
//! Provides:
//! - A session directory sidebar
//! - A session view with statistics, a live equity curve, the daily return
//!   distribution and the order tape
//! - A background worker thread that performs all HTTP calls

pub mod app;
pub mod input;
pub mod logging;
pub mod panels;
pub mod route;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use route::Route;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
