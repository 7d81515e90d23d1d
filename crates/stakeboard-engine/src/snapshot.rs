use std::sync::Arc;

use rust_decimal::Decimal;
use stakeboard_metrics::SnapshotMetrics;
use stakeboard_types::{Protocol, StakingPosition, WalletAddress};

use crate::store::StakingStore;

/// Only positions holding something are worth a snapshot, zero placeholders
/// would just pollute the history.
pub fn should_persist(position: &StakingPosition) -> bool {
    position.staked_amount > Decimal::ZERO || position.rewards > Decimal::ZERO
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    Written,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub protocol: Protocol,
    pub outcome: SnapshotOutcome,
}

/// Per-protocol result of persisting a wallet query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub records: Vec<SnapshotRecord>,
}

impl SnapshotReport {
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, SnapshotOutcome::Written))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SnapshotOutcome::Failed(_)))
    }

    pub fn outcome(&self, protocol: Protocol) -> Option<&SnapshotOutcome> {
        self.records
            .iter()
            .find(|record| record.protocol == protocol)
            .map(|record| &record.outcome)
    }

    fn count(&self, predicate: impl Fn(&SnapshotOutcome) -> bool) -> usize {
        self.records
            .iter()
            .filter(|record| predicate(&record.outcome))
            .count()
    }
}

/// Writes the snapshots of a wallet query. A failed write is logged and
/// reported, it never stops the remaining protocols.
pub struct SnapshotPolicy {
    metrics: Arc<SnapshotMetrics>,
}

impl SnapshotPolicy {
    pub const fn new(metrics: Arc<SnapshotMetrics>) -> Self {
        Self { metrics }
    }

    pub async fn persist(
        &self,
        store: &dyn StakingStore,
        wallet: &WalletAddress,
        positions: &[StakingPosition],
    ) -> SnapshotReport {
        let mut records = Vec::with_capacity(positions.len());

        for position in positions {
            let outcome = if !should_persist(position) {
                SnapshotOutcome::Skipped
            } else if let Err(e) = store.insert_wallet_snapshot(wallet, position).await {
                tracing::error!(
                    wallet = %wallet,
                    protocol = %position.protocol,
                    error = %e,
                    "Failed to insert wallet snapshot"
                );
                self.metrics.record_failed(position.protocol);
                SnapshotOutcome::Failed(e.to_string())
            } else {
                self.metrics.record_written(position.protocol);
                SnapshotOutcome::Written
            };

            records.push(SnapshotRecord {
                protocol: position.protocol,
                outcome,
            });
        }

        SnapshotReport { records }
    }
}
