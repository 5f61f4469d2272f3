//! Display formatting for session statistics.
//!
//! Rounding ties go toward +infinity and numbers print in their shortest
//! form, so `0.12345` renders as `12.35%` and `-0.033` as `-3.3%`.

use chrono::{DateTime, Local, Utc};

/// One-sided z-score for the 95% daily loss estimate.
pub const Z_95: f64 = 1.65;
/// One-sided z-score for the 99% daily loss estimate.
pub const Z_99: f64 = 2.33;

/// Placeholder for statistics the backend could not compute.
pub const NOT_AVAILABLE: &str = "n/a";

/// Round to the nearest integer, ties toward +infinity.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Shortest decimal rendering; negative zero prints as `0`.
pub fn number(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else {
        format!("{x}")
    }
}

/// A fraction as a percentage with at most two decimals: `0.1234 → "12.34%"`.
pub fn percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{}%", number(round_half_up(fraction * 10000.0) / 100.0))
}

/// A whole-dollar amount with thousands grouping: `1234567.8 → "$1,234,568"`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("${}", group_thousands(round_half_up(amount)))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Estimated worst daily loss at 95% confidence.
pub fn loss_95(stdev: f64) -> f64 {
    -Z_95 * stdev
}

/// Estimated worst daily loss at 99% confidence.
pub fn loss_99(stdev: f64) -> f64 {
    -Z_99 * stdev
}

pub fn trading_type(live_trading: bool) -> &'static str {
    if live_trading {
        "Live Trading"
    } else {
        "Backtest"
    }
}

/// Local date-time in the US locale shape: `11/14/2023, 10:13:20 PM`.
pub fn local_datetime(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Compact axis label for a time, local zone.
pub fn axis_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%m-%d %H:%M").to_string()
}

/// Axis tick for a fraction, whole percent: `-0.021 → "-2%"`.
pub fn percent_tick(fraction: f64) -> String {
    format!("{}%", number(round_half_up(fraction * 100.0)))
}
