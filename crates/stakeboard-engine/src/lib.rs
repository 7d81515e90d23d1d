pub mod config;
pub mod error;
pub mod normalize;
pub mod refresh;
pub mod service;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod task;

#[cfg(test)]
mod testing;

pub use config::EngineConfig;
pub use error::EngineError;
pub use normalize::normalize;
pub use refresh::{
    MIN_REFRESH_INTERVAL, ProtocolRefresh, RefreshOrchestrator, RefreshReport, StatsRefresher,
};
pub use service::{StakingService, WalletReport};
pub use snapshot::{SnapshotOutcome, SnapshotPolicy, SnapshotRecord, SnapshotReport, should_persist};
pub use stats::compute_stats;
pub use store::{PgStakingStore, StakingStore};
pub use task::StatsRefreshTask;
