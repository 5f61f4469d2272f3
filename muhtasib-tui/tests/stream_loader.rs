//! End-to-end: the app state and the real worker thread against an in-memory
//! backend whose equity series grows while the view is open.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};

use muhtasib_core::{
    ApiError, EquityPoint, Order, Session, SessionApi, SessionDetail, SessionId, SessionInfo,
};
use muhtasib_tui::app::AppState;
use muhtasib_tui::route::Route;
use muhtasib_tui::worker::{spawn_worker, WorkerCommand};

const INTERVAL: Duration = Duration::from_millis(10);

#[derive(Default)]
struct Backend {
    series: Mutex<Vec<EquityPoint>>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl Backend {
    fn grow(&self, n: usize) {
        let mut series = self.series.lock().unwrap();
        let start = series.len();
        for i in start..start + n {
            series.push(EquityPoint::new(
                Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
                1_000.0 + i as f64,
            ));
        }
    }
}

impl SessionApi for Backend {
    fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        Ok(vec![Session {
            session_id: SessionId::new("a"),
            name: "Strat1".into(),
            create_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            exchange: None,
            live_trading: None,
        }])
    }

    fn session_detail(&self, _id: &SessionId) -> Result<SessionDetail, ApiError> {
        Ok(SessionDetail {
            info: SessionInfo {
                create_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                name: "Strat1".into(),
                exchange: "FTX".into(),
                live_trading: true,
            },
            annual_rate_of_return: 0.1,
            annual_turnover: 1_000.0,
            operating_margin: 0.01,
            avg_daily_rate_of_return: 0.001,
            stdev_daily_rate_of_return: 0.02,
            daily_rate_of_returns: vec![0.01, -0.01],
        })
    }

    fn equity_page(&self, id: &SessionId, offset: usize) -> Result<Vec<EquityPoint>, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((id.as_str().to_string(), offset));
        let series = self.series.lock().unwrap();
        Ok(series.iter().skip(offset).cloned().collect())
    }

    fn order_page(&self, _id: &SessionId, _offset: usize) -> Result<Vec<Order>, ApiError> {
        Ok(Vec::new())
    }

    fn delete_session(&self, _id: &SessionId) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Tick and drain responses until `done` holds or `timeout` passes.
fn pump_for(
    app: &mut AppState,
    timeout: Duration,
    mut done: impl FnMut(&AppState) -> bool,
) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }
        if done(app) {
            return true;
        }
        app.tick(Instant::now());
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

fn pump(app: &mut AppState, done: impl FnMut(&AppState) -> bool) -> bool {
    pump_for(app, Duration::from_secs(5), done)
}

#[test]
fn equity_curve_grows_without_gaps_or_duplicates() {
    let backend = Arc::new(Backend::default());
    backend.grow(3);

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let handle = spawn_worker(backend.clone(), cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, INTERVAL, "http://test".into());
    app.start(Route::Session(SessionId::new("a")), Instant::now());

    assert!(pump(&mut app, |a| a.view.as_ref().is_some_and(|v| v.is_ready())));
    assert!(pump(&mut app, |a| !a.directory.sessions.is_empty()));

    backend.grow(4);
    assert!(pump(&mut app, |a| a.view.as_ref().is_some_and(|v| v.equity.len() == 7)));

    let committed = app.view.as_ref().unwrap().equity.items().to_vec();
    assert_eq!(committed, *backend.series.lock().unwrap());

    // First request always starts at zero; offsets never go backwards.
    let requests = backend.requests.lock().unwrap().clone();
    assert_eq!(requests[0], ("a".to_string(), 0));
    assert!(requests.windows(2).all(|w| w[0].1 <= w[1].1));

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

#[test]
fn closing_the_view_stops_requests() {
    let backend = Arc::new(Backend::default());
    backend.grow(2);

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let handle = spawn_worker(backend.clone(), cmd_rx, resp_tx).unwrap();

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, INTERVAL, "http://test".into());
    app.start(Route::Session(SessionId::new("a")), Instant::now());
    assert!(pump(&mut app, |a| a.view.as_ref().is_some_and(|v| v.is_ready())));

    app.navigate(Route::Directory, Instant::now());
    // Let anything already queued finish.
    pump_for(&mut app, INTERVAL * 10, |_| false);
    let seen = backend.requests.lock().unwrap().len();

    pump_for(&mut app, INTERVAL * 10, |_| false);
    assert_eq!(backend.requests.lock().unwrap().len(), seen);

    cmd_tx.send(WorkerCommand::Shutdown).unwrap();
    handle.join().unwrap();
}
