//! Offset feeds: incremental loading of append-only server series.
//!
//! A feed holds the committed sequence for one session and hands out page
//! requests whose offset is the committed length. Every request carries the
//! version token of the sequence it was computed from (its basis). A page is
//! merged only if that token is still current when the page arrives;
//! otherwise it is stale and dropped. Tokens are never reused, so a reset
//! (session change) turns every in-flight request into a no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::domain::SessionId;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Identity of one published state of a feed's committed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedVersion(u64);

impl FeedVersion {
    fn fresh() -> Self {
        Self(NEXT_VERSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// A page fetch computed from a feed's current basis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub session: SessionId,
    pub offset: usize,
    pub basis: FeedVersion,
}

/// What happened to a page handed to [`OffsetFeed::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The page was merged; holds the number of new items.
    Appended(usize),
    /// The basis matched but the page was empty.
    Unchanged,
    /// The sequence moved on since the request was made; nothing merged.
    Stale,
}

/// Committed, append-only sequence for one session plus its fetch basis.
#[derive(Debug)]
pub struct OffsetFeed<T> {
    session: SessionId,
    committed: Vec<T>,
    version: FeedVersion,
    outstanding: Option<FeedVersion>,
}

impl<T> OffsetFeed<T> {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            committed: Vec::new(),
            version: FeedVersion::fresh(),
            outstanding: None,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn items(&self) -> &[T] {
        &self.committed
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn version(&self) -> FeedVersion {
        self.version
    }

    /// Offset of the next page: always the committed length.
    pub fn next_offset(&self) -> usize {
        self.committed.len()
    }

    /// True while a request for the current basis has not come back.
    pub fn in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Snapshot the current basis and request the page after it.
    ///
    /// Returns `None` when a request for this exact basis is still in flight.
    pub fn poll(&mut self) -> Option<PageRequest> {
        if self.outstanding == Some(self.version) {
            return None;
        }
        self.outstanding = Some(self.version);
        Some(PageRequest {
            session: self.session.clone(),
            offset: self.committed.len(),
            basis: self.version,
        })
    }

    /// Merge a page fetched from `basis`, unless the sequence has moved on.
    pub fn apply(&mut self, basis: FeedVersion, page: Vec<T>) -> ApplyOutcome {
        if basis != self.version {
            return ApplyOutcome::Stale;
        }
        self.outstanding = None;
        if page.is_empty() {
            return ApplyOutcome::Unchanged;
        }
        let added = page.len();
        self.committed.extend(page);
        self.version = FeedVersion::fresh();
        ApplyOutcome::Appended(added)
    }

    /// Forget a failed request so the next poll retries from the same offset.
    pub fn fail(&mut self, basis: FeedVersion) {
        if self.outstanding == Some(basis) {
            self.outstanding = None;
        }
    }

    /// Start over for `session`: empty sequence, offset 0, fresh token.
    pub fn reset(&mut self, session: SessionId) {
        self.session = session;
        self.committed.clear();
        self.version = FeedVersion::fresh();
        self.outstanding = None;
    }
}

/// Fixed-interval tick source for a mounted view.
#[derive(Debug, Clone)]
pub struct PollTimer {
    interval: Duration,
    next_due: Instant,
}

impl PollTimer {
    /// Start a timer whose first tick is one interval after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True if a tick is due at `now`; re-arms for one interval later.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> OffsetFeed<u32> {
        OffsetFeed::new(SessionId::new("a"))
    }

    #[test]
    fn first_poll_starts_at_offset_zero() {
        let mut f = feed();
        let req = f.poll().unwrap();
        assert_eq!(req.offset, 0);
        assert_eq!(req.session, SessionId::new("a"));
        assert_eq!(req.basis, f.version());
    }

    #[test]
    fn poll_does_not_duplicate_in_flight_basis() {
        let mut f = feed();
        assert!(f.poll().is_some());
        assert!(f.poll().is_none());
        assert!(f.in_flight());
    }

    #[test]
    fn apply_appends_and_advances_offset() {
        let mut f = feed();
        let req = f.poll().unwrap();
        assert_eq!(f.apply(req.basis, vec![1, 2, 3]), ApplyOutcome::Appended(3));
        assert_eq!(f.items(), &[1, 2, 3]);
        assert_ne!(f.version(), req.basis);

        let next = f.poll().unwrap();
        assert_eq!(next.offset, 3);
    }

    #[test]
    fn empty_page_keeps_basis_and_allows_next_poll() {
        let mut f = feed();
        let req = f.poll().unwrap();
        assert_eq!(f.apply(req.basis, vec![]), ApplyOutcome::Unchanged);
        assert_eq!(f.version(), req.basis);
        assert!(!f.in_flight());
        assert_eq!(f.poll().unwrap().offset, 0);
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut f = feed();
        let old = f.poll().unwrap();
        f.apply(old.basis, vec![1]);
        // A second reply computed from the old basis must not append again.
        assert_eq!(f.apply(old.basis, vec![1]), ApplyOutcome::Stale);
        assert_eq!(f.items(), &[1]);
    }

    #[test]
    fn reset_invalidates_in_flight_requests() {
        let mut f = feed();
        let req = f.poll().unwrap();
        f.reset(SessionId::new("b"));
        assert_eq!(f.apply(req.basis, vec![9, 9]), ApplyOutcome::Stale);
        assert!(f.is_empty());
        assert_eq!(f.session(), &SessionId::new("b"));
        assert_eq!(f.poll().unwrap().offset, 0);
    }

    #[test]
    fn failure_releases_basis_for_retry() {
        let mut f = feed();
        let req = f.poll().unwrap();
        f.fail(req.basis);
        let retry = f.poll().unwrap();
        assert_eq!(retry.offset, 0);
        assert_eq!(retry.basis, req.basis);
    }

    #[test]
    fn failure_for_other_basis_is_ignored() {
        let mut f = feed();
        let first = f.poll().unwrap();
        f.apply(first.basis, vec![1]);
        let second = f.poll().unwrap();
        f.fail(first.basis);
        assert!(f.in_flight());
        assert!(f.poll().is_none());
        f.fail(second.basis);
        assert!(!f.in_flight());
    }

    #[test]
    fn versions_are_unique_across_feeds() {
        let a = feed();
        let b = feed();
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut timer = PollTimer::start(Duration::from_secs(1), t0);
        assert!(!timer.fire(t0));
        assert!(!timer.fire(t0 + Duration::from_millis(999)));
        assert!(timer.fire(t0 + Duration::from_secs(1)));
        assert!(!timer.fire(t0 + Duration::from_millis(1500)));
        assert!(timer.fire(t0 + Duration::from_secs(2)));
        assert_eq!(timer.interval(), Duration::from_secs(1));
    }
}
