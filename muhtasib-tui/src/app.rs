//! Application state: single-owner, main-thread only.
//!
//! All UI state lives here. Network work happens on the worker thread; its
//! results come back through `handle_response`, tagged with the session and
//! feed basis they were requested for, so anything addressed to a view that
//! is gone or has moved on is dropped.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use muhtasib_core::format;
use muhtasib_core::{
    ApplyOutcome, EquityPoint, OffsetFeed, Order, PollTimer, Session, SessionDetail, SessionId,
};

use crate::route::Route;
use crate::theme::Theme;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Directory,
    Session,
}

/// Session directory: fetched once, shown as a toggleable sidebar.
#[derive(Debug)]
pub struct DirectoryState {
    pub sessions: Vec<Session>,
    pub visible: bool,
    pub cursor: usize,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            visible: true,
            cursor: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.sessions.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn selected(&self) -> Option<&Session> {
        self.sessions.get(self.cursor)
    }

    /// Link label: `"{name}, {local create time}"`.
    pub fn entry_label(session: &Session) -> String {
        format!(
            "{}, {}",
            session.name,
            format::local_datetime(&session.create_time)
        )
    }

    fn replace(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
        self.cursor = self.cursor.min(self.sessions.len().saturating_sub(1));
    }
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of one mount of a session view. Remounting the same session
/// gets a new id, so replies addressed to an earlier mount are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(pub(crate) u64);

/// State of a mounted session view. Dropping it releases its poll timer.
#[derive(Debug)]
pub struct SessionView {
    pub session: SessionId,
    pub mount: MountId,
    pub detail: Option<SessionDetail>,
    pub equity: OffsetFeed<EquityPoint>,
    pub orders: OffsetFeed<Order>,
    timer: PollTimer,
}

impl SessionView {
    fn mount(session: SessionId, mount: MountId, interval: Duration, now: Instant) -> Self {
        Self {
            equity: OffsetFeed::new(session.clone()),
            orders: OffsetFeed::new(session.clone()),
            session,
            mount,
            detail: None,
            timer: PollTimer::start(interval, now),
        }
    }

    /// Statistics arrived and at least one equity point is committed.
    pub fn is_ready(&self) -> bool {
        self.detail.is_some() && !self.equity.is_empty()
    }

    fn poll_feeds(&mut self) -> Vec<WorkerCommand> {
        let mut cmds = Vec::with_capacity(2);
        if let Some(req) = self.equity.poll() {
            cmds.push(WorkerCommand::FetchEquity(req));
        }
        if let Some(req) = self.orders.poll() {
            cmds.push(WorkerCommand::FetchOrders(req));
        }
        cmds
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub route: Route,
    pub focus: Focus,
    pub directory: DirectoryState,
    pub view: Option<SessionView>,
    pub theme: Theme,
    pub base_url: String,
    poll_interval: Duration,
    mounts: u64,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        poll_interval: Duration,
        base_url: String,
    ) -> Self {
        Self {
            running: true,
            route: Route::Directory,
            focus: Focus::Directory,
            directory: DirectoryState::new(),
            view: None,
            theme: Theme::default(),
            base_url,
            poll_interval,
            mounts: 0,
            worker_tx,
            worker_rx,
        }
    }

    /// Load the directory (once) and open the initial route.
    pub fn start(&mut self, route: Route, now: Instant) {
        self.send(WorkerCommand::ListSessions);
        self.navigate(route, now);
    }

    /// Switch routes. Opening a different session discards all state of the
    /// previous one; opening the current one again is a no-op.
    pub fn navigate(&mut self, route: Route, now: Instant) {
        if route == self.route && (self.view.is_some() || route == Route::Directory) {
            return;
        }

        match &route {
            Route::Directory => {
                self.view = None;
                self.focus = Focus::Directory;
            }
            Route::Session(id) => {
                debug!(session = %id, "mounting session view");
                self.mounts += 1;
                let mount = MountId(self.mounts);
                let mut view = SessionView::mount(id.clone(), mount, self.poll_interval, now);
                self.send(WorkerCommand::FetchDetail {
                    session: id.clone(),
                    mount,
                });
                for cmd in view.poll_feeds() {
                    self.send(cmd);
                }
                self.view = Some(view);
                self.focus = Focus::Session;
            }
        }
        self.route = route;
    }

    /// Open the session under the directory cursor.
    pub fn open_selected(&mut self, now: Instant) {
        if let Some(session) = self.directory.selected() {
            let route = Route::Session(session.session_id.clone());
            self.navigate(route, now);
        }
    }

    /// Fire the mounted view's poll timer, if due.
    pub fn tick(&mut self, now: Instant) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if !view.timer.fire(now) {
            return;
        }
        for cmd in view.poll_feeds() {
            self.send(cmd);
        }
    }

    /// One-shot delete of the mounted session's data. The view is left as is.
    pub fn delete_current(&mut self) {
        if let Some(view) = &self.view {
            let session = view.session.clone();
            self.send(WorkerCommand::DeleteSession { session });
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match (self.focus, &self.view) {
            (Focus::Directory, Some(_)) => Focus::Session,
            _ => Focus::Directory,
        };
    }

    pub fn handle_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::SessionsListed { sessions } => {
                self.directory.replace(sessions);
            }
            WorkerResponse::DetailLoaded {
                session,
                mount,
                detail,
            } => match self.view_for(&session) {
                Some(view) if view.mount == mount => view.detail = Some(*detail),
                _ => debug!(%session, "discarding detail for a previous mount"),
            },
            WorkerResponse::EquityPage { request, points } => {
                if let Some(view) = self.view_for(&request.session) {
                    if view.equity.apply(request.basis, points) == ApplyOutcome::Stale {
                        debug!(session = %request.session, offset = request.offset, "discarding stale equity page");
                    }
                }
            }
            WorkerResponse::EquityFailed { request } => {
                if let Some(view) = self.view_for(&request.session) {
                    view.equity.fail(request.basis);
                }
            }
            WorkerResponse::OrderPage { request, orders } => {
                if let Some(view) = self.view_for(&request.session) {
                    if view.orders.apply(request.basis, orders) == ApplyOutcome::Stale {
                        debug!(session = %request.session, offset = request.offset, "discarding stale order page");
                    }
                }
            }
            WorkerResponse::OrdersFailed { request } => {
                if let Some(view) = self.view_for(&request.session) {
                    view.orders.fail(request.basis);
                }
            }
        }
    }

    fn view_for(&mut self, session: &SessionId) -> Option<&mut SessionView> {
        self.view.as_mut().filter(|v| &v.session == session)
    }

    fn send(&self, cmd: WorkerCommand) {
        if self.worker_tx.send(cmd).is_err() {
            warn!("worker is gone; request dropped");
        }
    }
}
