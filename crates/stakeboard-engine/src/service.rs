use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::{join_all, try_join_all};
use stakeboard_metrics::{MetricsRegistry, RefreshMetrics};
use stakeboard_subgraph::StakingDataSource;
use stakeboard_types::{Protocol, ProtocolStats, StakingPosition, WalletAddress, YieldPoint};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::normalize::normalize;
use crate::refresh::{ProtocolRefresh, RefreshReport, StatsRefresher};
use crate::snapshot::{SnapshotPolicy, SnapshotReport};
use crate::stats::compute_stats;
use crate::store::StakingStore;

/// Positions of a wallet along with what happened to their snapshots.
#[derive(Debug, Clone)]
pub struct WalletReport {
    pub positions: Vec<StakingPosition>,
    pub snapshots: SnapshotReport,
}

/// Entry point of the staking engine, shared by the API and the refresh task.
pub struct StakingService {
    store: Arc<dyn StakingStore>,
    source: Arc<dyn StakingDataSource>,
    snapshots: SnapshotPolicy,
    metrics: Arc<RefreshMetrics>,
    config: EngineConfig,
}

impl StakingService {
    pub fn new(
        store: Arc<dyn StakingStore>,
        source: Arc<dyn StakingDataSource>,
        metrics: Arc<MetricsRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            source,
            snapshots: SnapshotPolicy::new(metrics.snapshots.clone()),
            metrics: metrics.refresh.clone(),
            config,
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current position of `wallet` in every protocol, in `Protocol::ALL`
    /// order. Any upstream failure fails the whole query, snapshot failures
    /// never do.
    pub async fn query_wallet(&self, wallet: &WalletAddress) -> Result<WalletReport, EngineError> {
        let raw_positions = try_join_all(
            Protocol::ALL
                .into_iter()
                .map(|protocol| self.source.fetch_position(protocol, wallet)),
        )
        .await
        .inspect_err(|e| {
            tracing::error!(
                wallet = %wallet,
                protocol = %e.protocol(),
                error = %e,
                "Failed to fetch staking position"
            );
        })?;

        let positions: Vec<StakingPosition> = raw_positions.iter().map(normalize).collect();
        let snapshots = self
            .snapshots
            .persist(self.store.as_ref(), wallet, &positions)
            .await;

        tracing::debug!(
            wallet = %wallet,
            written = snapshots.written(),
            failed = snapshots.failed(),
            "Wallet positions fetched"
        );

        Ok(WalletReport {
            positions,
            snapshots,
        })
    }

    pub async fn get_staking_positions(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<StakingPosition>, EngineError> {
        Ok(self.query_wallet(wallet).await?.positions)
    }

    pub async fn get_yield_history(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<YieldPoint>, EngineError> {
        Ok(self.store.get_wallet_snapshots(wallet).await?)
    }

    pub async fn get_protocol_stats(&self) -> Result<Vec<ProtocolStats>, EngineError> {
        Ok(self.store.get_latest_protocol_stats().await?)
    }

    /// Refresh every protocol independently. Running it twice in a row only
    /// overwrites the same rows.
    pub async fn refresh_protocol_stats(&self) -> RefreshReport {
        let now = Utc::now();
        let protocols = join_all(Protocol::ALL.into_iter().map(|protocol| async move {
            ProtocolRefresh {
                protocol,
                result: self.refresh_protocol(protocol, now).await,
            }
        }))
        .await;

        self.metrics.record_pass();
        for refresh in &protocols {
            if let Err(e) = &refresh.result {
                tracing::error!(
                    protocol = %refresh.protocol,
                    error = %e,
                    "Failed to refresh protocol stats"
                );
                self.metrics.record_protocol_failure(refresh.protocol);
            }
        }

        RefreshReport { protocols }
    }

    async fn refresh_protocol(
        &self,
        protocol: Protocol,
        now: DateTime<Utc>,
    ) -> Result<ProtocolStats, EngineError> {
        let stats = if protocol.is_indexed() {
            let since = now - self.config.tvl_window;
            let series = self.source.fetch_tvl_series(protocol, since).await?;
            compute_stats(protocol, &series, now)
        } else {
            ProtocolStats::placeholder(protocol, now)
        };

        self.store.upsert_protocol_stats(&stats).await?;
        Ok(stats)
    }
}

#[async_trait::async_trait]
impl StatsRefresher for StakingService {
    async fn refresh_protocol_stats(&self) -> RefreshReport {
        Self::refresh_protocol_stats(self).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal::{Decimal, dec};
    use stakeboard_subgraph::RawPosition;
    use stakeboard_subgraph::types::EtherFiStaker;
    use stakeboard_types::TvlSample;

    use super::*;
    use crate::snapshot::SnapshotOutcome;
    use crate::testing::{FakeDataSource, MemoryStore, wallet};

    fn service(store: Arc<MemoryStore>, source: Arc<FakeDataSource>) -> StakingService {
        StakingService::new(store, source, MetricsRegistry::new(), EngineConfig::default())
    }

    fn etherfi_staker(staked: &str, withdrawn: &str) -> RawPosition {
        RawPosition::EtherFi(vec![EtherFiStaker {
            id: wallet().to_string(),
            total_staked: staked.to_string(),
            total_withdrawn: withdrawn.to_string(),
            ..Default::default()
        }])
    }

    fn sample(hours_ago: i64, tvl: Decimal) -> TvlSample {
        TvlSample {
            timestamp: Utc::now() - Duration::hours(hours_ago),
            total_value_locked: tvl,
            degraded: false,
        }
    }

    #[tokio::test]
    async fn test_query_wallet_reports_every_protocol() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(FakeDataSource::default().with_position(etherfi_staker("100", "20")));

        let report = service(store.clone(), source)
            .query_wallet(&wallet())
            .await
            .unwrap();

        assert_eq!(
            report.positions,
            vec![
                StakingPosition::new(Protocol::EtherFi, dec!(100), dec!(80)),
                StakingPosition::zero(Protocol::Lido),
                StakingPosition::zero(Protocol::RocketPool),
            ]
        );
        assert_eq!(report.positions[0].current_value, dec!(180));
        assert_eq!(report.snapshots.written(), 1);
        assert_eq!(store.snapshot_count(), 1);

        let history = store.get_wallet_snapshots(&wallet()).await.unwrap();
        assert_eq!(history[0].protocol, Protocol::EtherFi);
        assert_eq!(history[0].rewards, dec!(80));
    }

    #[tokio::test]
    async fn test_query_wallet_fails_on_upstream_error() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(
            FakeDataSource::default()
                .with_position(etherfi_staker("100", "20"))
                .failing_for(Protocol::Lido),
        );

        let err = service(store.clone(), source)
            .get_staking_positions(&wallet())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::DataSource(ref e) if e.protocol() == Protocol::Lido
        ));
        assert_eq!(store.snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_query_wallet_survives_snapshot_failure() {
        let store = Arc::new(MemoryStore::default().failing_snapshots_for(Protocol::EtherFi));
        let source = Arc::new(FakeDataSource::default().with_position(etherfi_staker("100", "20")));

        let report = service(store.clone(), source)
            .query_wallet(&wallet())
            .await
            .unwrap();

        assert_eq!(report.positions.len(), 3);
        assert!(matches!(
            report.snapshots.outcome(Protocol::EtherFi),
            Some(SnapshotOutcome::Failed(_))
        ));
        assert_eq!(store.snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_yield_history_is_read_from_the_store() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(FakeDataSource::default().with_position(etherfi_staker("100", "20")));
        let service = service(store, source);

        assert!(service.get_yield_history(&wallet()).await.unwrap().is_empty());

        service.query_wallet(&wallet()).await.unwrap();
        service.query_wallet(&wallet()).await.unwrap();

        let history = service.get_yield_history(&wallet()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp <= history[1].timestamp);
    }

    #[tokio::test]
    async fn test_refresh_computes_and_upserts_stats() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(
            FakeDataSource::default()
                .with_tvl(Protocol::EtherFi, vec![sample(20, dec!(100)), sample(1, dec!(110))])
                .with_tvl(Protocol::Lido, vec![sample(48, dec!(1)), sample(2, dec!(50))]),
        );

        let report = service(store.clone(), source.clone())
            .refresh_protocol_stats()
            .await;

        assert_eq!(report.refreshed(), 3);
        assert_eq!(report.failed(), 0);

        let etherfi = store.stats_of(Protocol::EtherFi).unwrap();
        assert_eq!(etherfi.current_apy, dec!(3650));
        assert_eq!(etherfi.tvl, dec!(110));

        // The 48h old sample falls outside the window, leaving a single one.
        let lido = store.stats_of(Protocol::Lido).unwrap();
        assert_eq!(lido.current_apy, Decimal::ZERO);
        assert_eq!(lido.tvl, dec!(50));

        let rocketpool = store.stats_of(Protocol::RocketPool).unwrap();
        assert_eq!(rocketpool.current_apy, Decimal::ZERO);
        assert_eq!(rocketpool.tvl, Decimal::ZERO);
        assert!(!source.calls().contains(&Protocol::RocketPool));
    }

    #[tokio::test]
    async fn test_refresh_keeps_going_when_one_protocol_fails() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(
            FakeDataSource::default()
                .with_tvl(Protocol::Lido, vec![sample(3, dec!(1000))])
                .failing_for(Protocol::EtherFi),
        );

        let report = service(store.clone(), source).refresh_protocol_stats().await;

        assert_eq!(report.failed(), 1);
        assert!(report.get(Protocol::EtherFi).unwrap().result.is_err());
        assert!(store.stats_of(Protocol::EtherFi).is_none());
        assert_eq!(store.stats_of(Protocol::Lido).unwrap().tvl, dec!(1000));
        assert!(store.stats_of(Protocol::RocketPool).is_some());
    }

    #[tokio::test]
    async fn test_refresh_reports_persistence_failures() {
        let store = Arc::new(MemoryStore::default().failing_stats_for(Protocol::RocketPool));
        let source = Arc::new(FakeDataSource::default());

        let report = service(store.clone(), source).refresh_protocol_stats().await;

        assert!(matches!(
            report.get(Protocol::RocketPool).unwrap().result,
            Err(EngineError::Persistence(_))
        ));
        assert_eq!(report.refreshed(), 2);
    }

    #[tokio::test]
    async fn test_protocol_stats_one_per_protocol_ordered_by_name() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(FakeDataSource::default());
        let service = service(store, source);

        service.refresh_protocol_stats().await;
        service.refresh_protocol_stats().await;

        let stats = service.get_protocol_stats().await.unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.protocol.as_str()).collect();
        assert_eq!(names, vec!["ether.fi", "lido", "rocketpool"]);
    }
}
