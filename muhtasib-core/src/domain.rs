//! Domain types served by the session API.
//!
//! All types decode from the backend's camelCase JSON. Timestamps and decimal
//! amounts go through the lenient helpers in `wire`, since the backend emits
//! RFC 3339 strings and decimal strings where a client might expect numbers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wire;

/// Opaque session identifier, stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the session directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: SessionId,
    pub name: String,
    #[serde(deserialize_with = "wire::timestamp")]
    pub create_time: DateTime<Utc>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default, alias = "live_trading")]
    pub live_trading: Option<bool>,
}

/// Descriptive part of a session detail response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(deserialize_with = "wire::timestamp")]
    pub create_time: DateTime<Utc>,
    pub name: String,
    pub exchange: String,
    #[serde(rename = "live_trading", alias = "liveTrading")]
    pub live_trading: bool,
}

/// Session metadata plus the statistics the backend derives from it.
///
/// Statistic fields the backend could not compute arrive as `null` and decode
/// as `NaN`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub info: SessionInfo,
    #[serde(deserialize_with = "wire::stat")]
    pub annual_rate_of_return: f64,
    #[serde(deserialize_with = "wire::stat")]
    pub annual_turnover: f64,
    #[serde(deserialize_with = "wire::stat")]
    pub operating_margin: f64,
    #[serde(deserialize_with = "wire::stat")]
    pub avg_daily_rate_of_return: f64,
    #[serde(deserialize_with = "wire::stat")]
    pub stdev_daily_rate_of_return: f64,
    #[serde(default)]
    pub daily_rate_of_returns: Vec<f64>,
}

/// A single point of the equity curve.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquityPoint {
    #[serde(deserialize_with = "wire::timestamp")]
    pub time: DateTime<Utc>,
    #[serde(deserialize_with = "wire::decimal")]
    pub total: f64,
}

impl EquityPoint {
    pub fn new(time: DateTime<Utc>, total: f64) -> Self {
        Self { time, total }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn label(self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// An order placed by the session, executed or still pending.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub market: String,
    pub side: OrderSide,
    #[serde(deserialize_with = "wire::decimal")]
    pub ordered_size: f64,
    #[serde(deserialize_with = "wire::decimal")]
    pub ordered_price: f64,
    #[serde(deserialize_with = "wire::timestamp")]
    pub ordered_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "wire::opt_decimal")]
    pub executed_size: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_decimal")]
    pub executed_price: Option<f64>,
    #[serde(default, deserialize_with = "wire::opt_timestamp")]
    pub executed_time: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_executed(&self) -> bool {
        self.executed_size.is_some() && self.executed_price.is_some()
    }
}
