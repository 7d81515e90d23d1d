//! In-memory doubles of the engine's seams.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use stakeboard_db::DatabaseError;
use stakeboard_subgraph::{DataSourceError, RawPosition, StakingDataSource};
use stakeboard_types::{
    Protocol, ProtocolStats, StakingPosition, TvlSample, WalletAddress, YieldPoint,
};

use crate::store::StakingStore;

pub(crate) fn wallet() -> WalletAddress {
    "0x00000000000000000000000000000000000000aa"
        .parse()
        .unwrap()
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    stats: Mutex<BTreeMap<Protocol, ProtocolStats>>,
    snapshots: Mutex<Vec<(WalletAddress, YieldPoint)>>,
    failing_snapshots: HashSet<Protocol>,
    failing_stats: HashSet<Protocol>,
}

impl MemoryStore {
    pub(crate) fn failing_snapshots_for(mut self, protocol: Protocol) -> Self {
        self.failing_snapshots.insert(protocol);
        self
    }

    pub(crate) fn failing_stats_for(mut self, protocol: Protocol) -> Self {
        self.failing_stats.insert(protocol);
        self
    }

    pub(crate) fn stats_of(&self, protocol: Protocol) -> Option<ProtocolStats> {
        self.stats.lock().unwrap().get(&protocol).cloned()
    }

    pub(crate) fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl StakingStore for MemoryStore {
    async fn upsert_protocol_stats(&self, stats: &ProtocolStats) -> Result<(), DatabaseError> {
        if self.failing_stats.contains(&stats.protocol) {
            return Err(DatabaseError::query_error(
                "upsert protocol stats",
                "connection reset",
            ));
        }
        self.stats
            .lock()
            .unwrap()
            .insert(stats.protocol, stats.clone());
        Ok(())
    }

    async fn get_latest_protocol_stats(&self) -> Result<Vec<ProtocolStats>, DatabaseError> {
        // BTreeMap iterates in enum order, which matches the protocol name order.
        Ok(self.stats.lock().unwrap().values().cloned().collect())
    }

    async fn insert_wallet_snapshot(
        &self,
        wallet: &WalletAddress,
        position: &StakingPosition,
    ) -> Result<(), DatabaseError> {
        if self.failing_snapshots.contains(&position.protocol) {
            return Err(DatabaseError::query_error(
                "insert wallet snapshot",
                "connection reset",
            ));
        }
        self.snapshots.lock().unwrap().push((
            wallet.clone(),
            YieldPoint {
                protocol: position.protocol,
                rewards: position.rewards,
                timestamp: Utc::now(),
            },
        ));
        Ok(())
    }

    async fn get_wallet_snapshots(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<YieldPoint>, DatabaseError> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| owner == wallet)
            .map(|(_, point)| point.clone())
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeDataSource {
    positions: HashMap<Protocol, RawPosition>,
    tvl: HashMap<Protocol, Vec<TvlSample>>,
    failing: HashSet<Protocol>,
    calls: Mutex<Vec<Protocol>>,
}

impl FakeDataSource {
    pub(crate) fn with_position(mut self, raw: RawPosition) -> Self {
        self.positions.insert(raw.protocol(), raw);
        self
    }

    pub(crate) fn with_tvl(mut self, protocol: Protocol, series: Vec<TvlSample>) -> Self {
        self.tvl.insert(protocol, series);
        self
    }

    pub(crate) fn failing_for(mut self, protocol: Protocol) -> Self {
        self.failing.insert(protocol);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Protocol> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, protocol: Protocol) -> Result<(), DataSourceError> {
        self.calls.lock().unwrap().push(protocol);
        if self.failing.contains(&protocol) {
            return Err(DataSourceError::GraphQl {
                protocol,
                message: "indexer unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StakingDataSource for FakeDataSource {
    async fn fetch_position(
        &self,
        protocol: Protocol,
        _wallet: &WalletAddress,
    ) -> Result<RawPosition, DataSourceError> {
        self.check(protocol)?;
        Ok(self
            .positions
            .get(&protocol)
            .cloned()
            .unwrap_or_else(|| RawPosition::empty(protocol)))
    }

    async fn fetch_tvl_series(
        &self,
        protocol: Protocol,
        since: DateTime<Utc>,
    ) -> Result<Vec<TvlSample>, DataSourceError> {
        self.check(protocol)?;
        Ok(self
            .tvl
            .get(&protocol)
            .map(|series| {
                series
                    .iter()
                    .filter(|sample| sample.timestamp > since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
