//! Cached reader for the employee snapshot.

use crate::errors::{AppError, AppResult};
use crate::models::EmployeeRecord;
use crate::store::RemoteStore;
use crate::ui::messages::warning;
use std::time::{Duration, Instant};

/// Reads the snapshot through the store's raw path and keeps the last good
/// result for `ttl`. Failures yield an empty list and are not cached.
pub struct SnapshotReader<'a> {
    store: &'a dyn RemoteStore,
    path: String,
    ttl: Duration,
    cached: Option<(Instant, Vec<EmployeeRecord>)>,
    last_error: Option<String>,
    quiet: bool,
}

impl<'a> SnapshotReader<'a> {
    pub fn new(store: &'a dyn RemoteStore, path: &str, ttl: Duration) -> Self {
        Self {
            store,
            path: path.to_string(),
            ttl,
            cached: None,
            last_error: None,
            quiet: false,
        }
    }

    /// Suppress the warning printed on a failed fetch.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn fetch_employees(&mut self) -> Vec<EmployeeRecord> {
        self.fetch_at(Instant::now())
    }

    pub fn fetch_at(&mut self, now: Instant) -> Vec<EmployeeRecord> {
        if let Some((at, rows)) = &self.cached
            && now.saturating_duration_since(*at) < self.ttl
        {
            return rows.clone();
        }

        match self.load() {
            Ok(rows) => {
                self.last_error = None;
                self.cached = Some((now, rows.clone()));
                rows
            }
            Err(msg) => {
                if !self.quiet {
                    warning(format!("Could not load employee snapshot: {msg}"));
                }
                self.last_error = Some(msg);
                self.cached = None;
                Vec::new()
            }
        }
    }

    /// Like `fetch_employees`, but a failed fetch is an error instead of an
    /// empty list. Id admission must not treat an unreadable snapshot as one
    /// with no employees.
    pub fn fetch_checked(&mut self) -> AppResult<Vec<EmployeeRecord>> {
        let rows = self.fetch_employees();
        match &self.last_error {
            Some(msg) => Err(AppError::SnapshotUnavailable(msg.clone())),
            None => Ok(rows),
        }
    }

    /// Drop the cached snapshot; the next fetch goes remote.
    pub fn refresh(&mut self) {
        self.cached = None;
    }

    /// When the cached copy was fetched, if there is one.
    pub fn fetched_at(&self) -> Option<Instant> {
        self.cached.as_ref().map(|(at, _)| *at)
    }

    /// Reason of the last failed fetch; cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn load(&self) -> Result<Vec<EmployeeRecord>, String> {
        let raw = self.store.read_raw(&self.path).map_err(|e| e.to_string())?;
        serde_json::from_str::<Vec<EmployeeRecord>>(&raw)
            .map_err(|e| format!("{}: invalid snapshot JSON: {e}", self.path))
    }
}
