//! Muhtasib Core - everything the dashboard knows about the session API.
//!
//! This crate has no terminal code:
//! - Domain types for sessions, statistics, equity points and orders
//! - Lenient wire decoding matching what the backend actually emits
//! - The `SessionApi` trait and its blocking HTTP implementation
//! - Offset feeds: the poll/append/discard-if-stale loader for growing series
//! - Display formatting and histogram binning
//! - Dashboard configuration

pub mod api;
pub mod config;
pub mod domain;
pub mod feed;
pub mod format;
pub mod histogram;
mod wire;

pub use api::{ApiError, Endpoint, HttpSessionApi, SessionApi};
pub use config::{ApiConfig, ConfigError, DashboardConfig, LogConfig, PollConfig};
pub use domain::{EquityPoint, Order, OrderSide, Session, SessionDetail, SessionId, SessionInfo};
pub use feed::{ApplyOutcome, FeedVersion, OffsetFeed, PageRequest, PollTimer};
