//! Test helpers: an in-memory session backend and fixture builders.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use muhtasib_core::{
    ApiError, EquityPoint, Order, OrderSide, Session, SessionApi, SessionDetail, SessionId,
    SessionInfo,
};

pub fn session(id: &str, name: &str) -> Session {
    Session {
        session_id: SessionId::new(id),
        name: name.to_string(),
        create_time: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        exchange: None,
        live_trading: None,
    }
}

pub fn detail() -> SessionDetail {
    SessionDetail {
        info: SessionInfo {
            create_time: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            name: "Strat1".to_string(),
            exchange: "FTX".to_string(),
            live_trading: false,
        },
        annual_rate_of_return: 0.12345,
        annual_turnover: 1_234_567.8,
        operating_margin: 0.0421,
        avg_daily_rate_of_return: 0.0012,
        stdev_daily_rate_of_return: 0.02,
        daily_rate_of_returns: vec![-0.03, -0.01, 0.0, 0.004, 0.01, 0.012, 0.02, 0.025, 0.03],
    }
}

pub fn equity(n: usize) -> Vec<EquityPoint> {
    (0..n)
        .map(|i| {
            EquityPoint::new(
                Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
                10_000.0 + i as f64 * 12.5,
            )
        })
        .collect()
}

pub fn order(id: &str, side: OrderSide, executed: bool) -> Order {
    let t = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    Order {
        order_id: id.to_string(),
        market: "BTC-PERP".to_string(),
        side,
        ordered_size: 0.5,
        ordered_price: 40_000.0,
        ordered_time: t,
        executed_size: executed.then_some(0.5),
        executed_price: executed.then_some(39_990.5),
        executed_time: executed.then_some(t),
    }
}

/// In-memory backend that records every call as `"<op> <id> [offset]"`.
#[derive(Clone, Default)]
pub struct FakeApi {
    sessions: Vec<Session>,
    detail: Option<SessionDetail>,
    equity: Vec<EquityPoint>,
    orders: Vec<Order>,
    fail_listing: bool,
    fail_equity: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_detail(mut self, detail: SessionDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_equity(mut self, points: Vec<EquityPoint>) -> Self {
        self.equity = points;
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_equity(mut self) -> Self {
        self.fail_equity = true;
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn unreachable(url: &str) -> ApiError {
        ApiError::Transport {
            url: url.to_string(),
            message: "connection refused".to_string(),
        }
    }
}

impl SessionApi for FakeApi {
    fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.record("list".to_string());
        if self.fail_listing {
            return Err(Self::unreachable("/sessions"));
        }
        Ok(self.sessions.clone())
    }

    fn session_detail(&self, id: &SessionId) -> Result<SessionDetail, ApiError> {
        self.record(format!("detail {id}"));
        self.detail.clone().ok_or(ApiError::Status {
            url: format!("/sessions/{id}/more"),
            status: 500,
        })
    }

    fn equity_page(&self, id: &SessionId, offset: usize) -> Result<Vec<EquityPoint>, ApiError> {
        self.record(format!("equity {id} {offset}"));
        if self.fail_equity {
            return Err(Self::unreachable("/equity"));
        }
        Ok(self.equity.iter().skip(offset).cloned().collect())
    }

    fn order_page(&self, id: &SessionId, offset: usize) -> Result<Vec<Order>, ApiError> {
        self.record(format!("orders {id} {offset}"));
        Ok(self.orders.iter().skip(offset).cloned().collect())
    }

    fn delete_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.record(format!("delete {id}"));
        Ok(())
    }
}
