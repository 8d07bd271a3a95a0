use super::audit::AuditLog;
use super::ledger::RequestLedger;
use super::snapshot::SnapshotReader;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::{self, RemoteStore};
use std::time::Duration;

/// The configured store plus the readers and writers built on top of it.
pub struct Workspace<'c> {
    pub cfg: &'c Config,
    store: Box<dyn RemoteStore>,
}

impl<'c> Workspace<'c> {
    pub fn open(cfg: &'c Config) -> AppResult<Self> {
        Ok(Self {
            cfg,
            store: store::open(cfg)?,
        })
    }

    pub fn reader(&self) -> SnapshotReader<'_> {
        SnapshotReader::new(
            self.store.as_ref(),
            &self.cfg.snapshot_path,
            Duration::from_secs(self.cfg.cache_ttl_secs),
        )
    }

    pub fn ledger(&self) -> RequestLedger<'_> {
        RequestLedger::new(
            self.store.as_ref(),
            &self.cfg.ledger_path,
            self.cfg.retry.clone().into(),
        )
    }

    pub fn audit(&self) -> AuditLog {
        AuditLog::new(Config::audit_file())
    }
}
