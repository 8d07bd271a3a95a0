//! Remote JSON resources with optimistic concurrency.
//!
//! Two read paths exist: a versioned read that returns the content together
//! with a version token, and a raw read that is cheaper but carries no token.
//! Writes always take the token read just before (or `None` to create).

mod fs;
mod github;
mod memory;

pub use fs::FsStore;
pub use github::GithubStore;
pub use memory::MemoryStore;

use crate::config::{Backend, Config};
use crate::errors::{AppError, AppResult};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    Conflict,
    Unauthorized,
    Network,
    Decode,
    Io,
    Http(u16),
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Network => "network_error",
            Self::Decode => "decode_error",
            Self::Io => "io_error",
            Self::Http(_) => "http_error",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} ({path}): {message}", .kind.as_str())]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub path: String,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, path: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(StoreErrorKind::NotFound, path, "resource does not exist")
    }

    pub fn conflict(path: &str, message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Conflict, path, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == StoreErrorKind::Conflict
    }
}

/// Content of a resource plus the token a conditional write must present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedContent {
    pub content: String,
    pub version: String,
}

pub trait RemoteStore {
    /// Read content and version token.
    fn read_versioned(&self, path: &str) -> Result<VersionedContent, StoreError>;

    /// Read-only fast path; no token.
    fn read_raw(&self, path: &str) -> Result<String, StoreError>;

    /// Replace the resource atomically.
    ///
    /// - `expected = Some(token)`: succeeds only if the current version is
    ///   `token`; stale token → `Conflict`, vanished resource → `NotFound`.
    /// - `expected = None`: creates the resource; already present → `Conflict`.
    ///
    /// Returns the new version token.
    fn write(
        &self,
        path: &str,
        content: &str,
        expected: Option<&str>,
        message: &str,
    ) -> Result<String, StoreError>;
}

/// Build the backend selected by the configuration.
pub fn open(cfg: &Config) -> AppResult<Box<dyn RemoteStore>> {
    match cfg.backend {
        Backend::Fs => {
            let dir = cfg.store_dir.as_ref().ok_or_else(|| {
                AppError::Config("backend 'fs' requires 'store_dir' to be set".into())
            })?;
            Ok(Box::new(FsStore::new(crate::utils::path::expand_tilde(dir))))
        }
        Backend::Github => {
            if cfg.github_repo.trim().is_empty() {
                return Err(AppError::Config(
                    "backend 'github' requires 'github_repo' (owner/name)".into(),
                ));
            }
            Ok(Box::new(GithubStore::from_config(cfg)?))
        }
    }
}
