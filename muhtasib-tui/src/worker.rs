//! Background worker thread: every HTTP call runs here.
//!
//! Communication with the UI loop is via `mpsc` channels. Failures are
//! logged where they happen and never reach the screen; feed requests report
//! back a failure marker so the feed can retry from the same offset.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use muhtasib_core::{
    EquityPoint, Order, PageRequest, Session, SessionApi, SessionDetail, SessionId,
};

use crate::app::MountId;

/// Commands sent from the UI to the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerCommand {
    ListSessions,
    FetchDetail { session: SessionId, mount: MountId },
    FetchEquity(PageRequest),
    FetchOrders(PageRequest),
    DeleteSession { session: SessionId },
    Shutdown,
}

/// Responses sent from the worker back to the UI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    SessionsListed {
        sessions: Vec<Session>,
    },
    DetailLoaded {
        session: SessionId,
        mount: MountId,
        detail: Box<SessionDetail>,
    },
    EquityPage {
        request: PageRequest,
        points: Vec<EquityPoint>,
    },
    EquityFailed {
        request: PageRequest,
    },
    OrderPage {
        request: PageRequest,
        orders: Vec<Order>,
    },
    OrdersFailed {
        request: PageRequest,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    api: Arc<dyn SessionApi>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("muhtasib-worker".into())
        .spawn(move || worker_loop(api.as_ref(), rx, tx))
}

fn worker_loop(api: &dyn SessionApi, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => {
                if let Some(resp) = handle_command(api, cmd) {
                    // The UI hung up; nothing left to report to.
                    if tx.send(resp).is_err() {
                        break;
                    }
                }
            }
        }
    }
    debug!("worker stopped");
}

fn handle_command(api: &dyn SessionApi, cmd: WorkerCommand) -> Option<WorkerResponse> {
    match cmd {
        WorkerCommand::ListSessions => match api.list_sessions() {
            Ok(sessions) => {
                info!(count = sessions.len(), "sessions listed");
                Some(WorkerResponse::SessionsListed { sessions })
            }
            Err(e) => {
                error!(error = %e, "listing sessions failed");
                None
            }
        },
        WorkerCommand::FetchDetail { session, mount } => match api.session_detail(&session) {
            Ok(detail) => Some(WorkerResponse::DetailLoaded {
                session,
                mount,
                detail: Box::new(detail),
            }),
            Err(e) => {
                error!(%session, error = %e, "session detail request failed");
                None
            }
        },
        WorkerCommand::FetchEquity(request) => {
            match api.equity_page(&request.session, request.offset) {
                Ok(points) => {
                    debug!(session = %request.session, offset = request.offset, n = points.len(), "equity page");
                    Some(WorkerResponse::EquityPage { request, points })
                }
                Err(e) => {
                    error!(session = %request.session, offset = request.offset, error = %e, "equity request failed");
                    Some(WorkerResponse::EquityFailed { request })
                }
            }
        }
        WorkerCommand::FetchOrders(request) => {
            match api.order_page(&request.session, request.offset) {
                Ok(orders) => Some(WorkerResponse::OrderPage { request, orders }),
                Err(e) => {
                    error!(session = %request.session, offset = request.offset, error = %e, "order request failed");
                    Some(WorkerResponse::OrdersFailed { request })
                }
            }
        }
        WorkerCommand::DeleteSession { session } => {
            match api.delete_session(&session) {
                Ok(()) => info!(%session, "session data deleted"),
                Err(e) => error!(%session, error = %e, "deleting session data failed"),
            }
            None
        }
        WorkerCommand::Shutdown => None, // handled in loop
    }
}
