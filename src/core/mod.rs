pub mod access;
pub mod admission;
pub mod audit;
pub mod export;
pub mod ledger;
pub mod refresh;
pub mod retry;
pub mod snapshot;
pub mod stats;
pub mod view;
pub mod workspace;

pub use admission::is_id_available;
pub use ledger::RequestLedger;
pub use snapshot::SnapshotReader;
pub use workspace::Workspace;
