use super::snapshot::SnapshotReader;
use super::view::ViewState;
use crate::models::EmployeeRecord;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// When a watched view should re-fetch the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub interval: Duration,
}

impl RefreshPolicy {
    pub fn every(secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(secs.max(1)),
        }
    }

    /// Due when nothing was fetched yet or `interval` has elapsed.
    pub fn is_due(&self, last: Option<Instant>, now: Instant) -> bool {
        match last {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.interval,
        }
    }

    /// Time left until the next refresh is due.
    pub fn wait_time(&self, last: Option<Instant>, now: Instant) -> Duration {
        match last {
            None => Duration::ZERO,
            Some(at) => self
                .interval
                .saturating_sub(now.saturating_duration_since(at)),
        }
    }
}

/// One tick of a watched listing.
///
/// Reads through the reader's cache, so ticks closer together than the cache
/// TTL are served the cached copy; `force` drops the cache first. The view
/// counts a refresh only when the store was actually read.
pub fn poll(
    reader: &mut SnapshotReader<'_>,
    view: ViewState,
    now: Instant,
    stamp: DateTime<Local>,
    force: bool,
) -> (Vec<EmployeeRecord>, ViewState) {
    if force {
        reader.refresh();
    }
    let before = reader.fetched_at();
    let rows = reader.fetch_at(now);

    match reader.fetched_at() {
        Some(at) if Some(at) != before => (rows, view.on_refreshed(stamp)),
        _ => (rows, view),
    }
}
