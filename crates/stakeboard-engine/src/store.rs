use chrono::Utc;
use deadpool_diesel::postgres::Pool;
use stakeboard_db::{
    DatabaseError, StakeboardPool,
    models::{NewProtocolStats, NewWalletSnapshot, ProtocolStatsRecord, WalletSnapshot},
};
use stakeboard_types::{Protocol, ProtocolStats, StakingPosition, WalletAddress, YieldPoint};

/// Persistence used by the staking engine.
#[async_trait::async_trait]
pub trait StakingStore: Send + Sync {
    /// Insert or overwrite the single stats row of `stats.protocol`.
    async fn upsert_protocol_stats(&self, stats: &ProtocolStats) -> Result<(), DatabaseError>;

    /// Latest stats of every protocol, ordered by protocol name.
    async fn get_latest_protocol_stats(&self) -> Result<Vec<ProtocolStats>, DatabaseError>;

    /// Append a snapshot of `position`, stamped with the current time.
    async fn insert_wallet_snapshot(
        &self,
        wallet: &WalletAddress,
        position: &StakingPosition,
    ) -> Result<(), DatabaseError>;

    /// Snapshots of `wallet`, oldest first.
    async fn get_wallet_snapshots(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<YieldPoint>, DatabaseError>;
}

#[derive(Clone)]
pub struct PgStakingStore {
    pool: Pool,
}

impl PgStakingStore {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl StakingStore for PgStakingStore {
    async fn upsert_protocol_stats(&self, stats: &ProtocolStats) -> Result<(), DatabaseError> {
        let new_stats = NewProtocolStats {
            protocol_name: stats.protocol.as_str().to_string(),
            current_apy: stats.current_apy,
            tvl: stats.tvl,
            updated_at: stats.updated_at,
        };

        self.pool
            .interact_with_context(
                format!("upsert {} protocol stats", stats.protocol),
                move |conn| ProtocolStatsRecord::upsert(&new_stats, conn),
            )
            .await?;

        Ok(())
    }

    async fn get_latest_protocol_stats(&self) -> Result<Vec<ProtocolStats>, DatabaseError> {
        let operation = "fetch latest protocol stats";
        let records = self
            .pool
            .interact_with_context(operation.to_string(), ProtocolStatsRecord::find_all)
            .await?;

        records
            .into_iter()
            .map(|record| {
                Ok(ProtocolStats {
                    protocol: parse_protocol(operation, &record.protocol_name)?,
                    current_apy: record.current_apy,
                    tvl: record.tvl,
                    updated_at: record.updated_at,
                })
            })
            .collect()
    }

    async fn insert_wallet_snapshot(
        &self,
        wallet: &WalletAddress,
        position: &StakingPosition,
    ) -> Result<(), DatabaseError> {
        let new_snapshot = NewWalletSnapshot {
            wallet_address: wallet.as_str().to_string(),
            protocol: position.protocol.as_str().to_string(),
            staked_amount: position.staked_amount,
            rewards: position.rewards,
            recorded_at: Utc::now(),
        };

        self.pool
            .interact_with_context(
                format!("insert {} wallet snapshot", position.protocol),
                move |conn| WalletSnapshot::create(&new_snapshot, conn),
            )
            .await?;

        Ok(())
    }

    async fn get_wallet_snapshots(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Vec<YieldPoint>, DatabaseError> {
        let operation = "fetch wallet snapshots";
        let wallet_address = wallet.as_str().to_string();
        let snapshots = self
            .pool
            .interact_with_context(operation.to_string(), move |conn| {
                WalletSnapshot::find_by_wallet(&wallet_address, conn)
            })
            .await?;

        snapshots
            .into_iter()
            .map(|snapshot| {
                Ok(YieldPoint {
                    protocol: parse_protocol(operation, &snapshot.protocol)?,
                    rewards: snapshot.rewards,
                    timestamp: snapshot.recorded_at,
                })
            })
            .collect()
    }
}

fn parse_protocol(operation: &str, raw: &str) -> Result<Protocol, DatabaseError> {
    raw.parse()
        .map_err(|_| DatabaseError::invalid_row(operation, format!("unknown protocol '{raw}'")))
}
