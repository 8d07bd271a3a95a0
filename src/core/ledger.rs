//! Append-only ledger of change requests.
//!
//! The ledger is a JSON array stored remotely. Existing entries are carried as
//! raw JSON values so that fields or states this crate does not know about
//! survive a rewrite untouched; typed views are derived only for reading.

use super::admission;
use super::retry::{BackoffPolicy, RetryPolicy};
use crate::errors::{AppError, AppResult};
use crate::models::{ChangeRequest, EmployeePatch, EmployeeRecord, RequestKind};
use crate::store::{RemoteStore, StoreError, StoreErrorKind};
use crate::ui::messages::warning;
use serde_json::Value;
use std::thread;

/// Ledger content as read, plus the token needed to replace it.
struct LedgerState {
    entries: Vec<Value>,
    version: Option<String>,
}

impl LedgerState {
    fn typed(&self) -> Vec<ChangeRequest> {
        self.entries
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }

    /// `len + 1`, bumped past any larger id already present.
    fn next_sequence_id(&self) -> u64 {
        let by_len = self.entries.len() as u64 + 1;
        let by_max = self
            .entries
            .iter()
            .filter_map(|v| v.get("sequenceId").and_then(Value::as_u64))
            .max()
            .map(|m| m + 1)
            .unwrap_or(1);
        by_len.max(by_max)
    }
}

pub struct RequestLedger<'a> {
    store: &'a dyn RemoteStore,
    path: String,
    retry: RetryPolicy,
    quiet: bool,
}

impl<'a> RequestLedger<'a> {
    pub fn new(store: &'a dyn RemoteStore, path: &str, retry: RetryPolicy) -> Self {
        Self {
            store,
            path: path.to_string(),
            retry,
            quiet: false,
        }
    }

    /// Suppress the warning printed when a read fails soft.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    fn read_state(&self) -> Result<LedgerState, StoreError> {
        let current = match self.store.read_versioned(&self.path) {
            Ok(c) => c,
            Err(e) if e.is_not_found() => {
                return Ok(LedgerState {
                    entries: Vec::new(),
                    version: None,
                });
            }
            Err(e) => return Err(e),
        };

        let entries = if current.content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Vec<Value>>(&current.content).map_err(|e| {
                StoreError::new(
                    StoreErrorKind::Decode,
                    &self.path,
                    format!("ledger is not a JSON array: {e}"),
                )
            })?
        };

        Ok(LedgerState {
            entries,
            version: Some(current.version),
        })
    }

    /// Every request in the ledger; empty on any read failure.
    pub fn list_all(&self) -> Vec<ChangeRequest> {
        match self.read_state() {
            Ok(state) => state.typed(),
            Err(e) => {
                if !self.quiet {
                    warning(format!("Could not load pending requests: {e}"));
                }
                Vec::new()
            }
        }
    }

    /// Requests still waiting for the reconciler.
    pub fn list_pending(&self) -> Vec<ChangeRequest> {
        self.list_all()
            .into_iter()
            .filter(|r| r.status.is_pending())
            .collect()
    }

    /// Validate and append one request.
    ///
    /// Validation errors are raised before any remote call. A write rejected
    /// for a stale version token is retried from a fresh read (the admission
    /// check runs again on that read) up to `retry.max_attempts` times.
    pub fn submit(
        &self,
        kind: RequestKind,
        payload: EmployeePatch,
        snapshot: &[EmployeeRecord],
    ) -> AppResult<ChangeRequest> {
        admission::validate_payload(kind, &payload)?;

        for attempt in 1..=self.retry.max_attempts {
            let state = self.read_state()?;
            let pending: Vec<ChangeRequest> = state
                .typed()
                .into_iter()
                .filter(|r| r.status.is_pending())
                .collect();
            admission::admit(kind, &payload, snapshot, &pending)?;

            let request = ChangeRequest::pending(state.next_sequence_id(), kind, payload.clone());

            let mut entries = state.entries;
            entries.push(serde_json::to_value(&request)?);
            let body = serde_json::to_string_pretty(&entries)?;

            let message = format!(
                "{} request #{} (employee {})",
                kind, request.sequence_id, payload.employee_id
            );

            match self
                .store
                .write(&self.path, &body, state.version.as_deref(), &message)
            {
                Ok(_) => return Ok(request),
                // created or removed under us: same treatment as a stale token
                Err(e) if e.is_conflict() || (e.is_not_found() && state.version.is_some()) => {
                    if attempt < self.retry.max_attempts {
                        thread::sleep(self.retry.delay_for_attempt(attempt));
                    }
                }
                Err(e) => return Err(AppError::Store(e)),
            }
        }

        Err(AppError::Conflict {
            attempts: self.retry.max_attempts,
        })
    }
}
