//! Lenient field decoders for backend JSON.
//!
//! The backend serializes timestamps as RFC 3339 strings and decimals as
//! strings, while hand-written fixtures and other producers use epoch
//! milliseconds and plain numbers. Both shapes are accepted.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    fn into_utc(self) -> Result<DateTime<Utc>, String> {
        match self {
            RawTimestamp::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| format!("timestamp out of range: {ms}")),
            RawTimestamp::Float(ms) if ms.is_finite() => Utc
                .timestamp_millis_opt(ms.round() as i64)
                .single()
                .ok_or_else(|| format!("timestamp out of range: {ms}")),
            RawTimestamp::Float(ms) => Err(format!("timestamp is not finite: {ms}")),
            RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| format!("invalid timestamp '{s}': {e}")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

impl RawDecimal {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            RawDecimal::Number(v) => Ok(v),
            RawDecimal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid decimal '{s}': {e}")),
        }
    }
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    RawTimestamp::deserialize(deserializer)?
        .into_utc()
        .map_err(de::Error::custom)
}

pub(crate) fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawTimestamp>::deserialize(deserializer)?
        .map(RawTimestamp::into_utc)
        .transpose()
        .map_err(de::Error::custom)
}

pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawDecimal::deserialize(deserializer)?
        .into_f64()
        .map_err(de::Error::custom)
}

pub(crate) fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawDecimal>::deserialize(deserializer)?
        .map(RawDecimal::into_f64)
        .transpose()
        .map_err(de::Error::custom)
}

/// A statistic the backend may have failed to compute. JSON cannot carry
/// non-finite floats, so those arrive as `null`.
pub(crate) fn stat<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
