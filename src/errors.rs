//! Unified application error type.
//! All modules (store, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::store::StoreError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Remote storage
    // ---------------------------
    #[error("Remote storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Employee snapshot unavailable, cannot verify the id: {0}")]
    SnapshotUnavailable(String),

    #[error("The ledger was modified concurrently ({attempts} attempts), please retry")]
    Conflict { attempts: usize },

    // ---------------------------
    // Request admission
    // ---------------------------
    #[error("Request rejected: {0}")]
    Validation(#[from] ValidationError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Access denied: wrong or missing passphrase")]
    AccessDenied,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

/// Reasons a change request is refused before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("employee id {0} already exists or has a pending insert")]
    DuplicateId(i64),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid employee id {0} (must be a positive integer)")]
    InvalidId(i64),

    #[error("an update must change at least one of name or title")]
    EmptyUpdate,
}

pub type AppResult<T> = Result<T, AppError>;
