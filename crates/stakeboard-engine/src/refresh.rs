use std::sync::Arc;
use std::time::Duration;

use stakeboard_types::{Protocol, ProtocolStats};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::error::EngineError;

/// Shortest accepted delay between two passes.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of refreshing a single protocol.
#[derive(Debug)]
pub struct ProtocolRefresh {
    pub protocol: Protocol,
    pub result: Result<ProtocolStats, EngineError>,
}

/// Outcome of one refresh pass over every protocol.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub protocols: Vec<ProtocolRefresh>,
}

impl RefreshReport {
    pub fn refreshed(&self) -> usize {
        self.protocols.iter().filter(|p| p.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.protocols.len() - self.refreshed()
    }

    pub fn get(&self, protocol: Protocol) -> Option<&ProtocolRefresh> {
        self.protocols.iter().find(|p| p.protocol == protocol)
    }
}

#[async_trait::async_trait]
pub trait StatsRefresher: Send + Sync {
    /// Refresh the stats of every protocol. Failures stay per protocol.
    async fn refresh_protocol_stats(&self) -> RefreshReport;
}

/// Drives the periodic refresh: one pass right away, then one per interval
/// until shutdown. A pass that already started always runs to completion.
pub struct RefreshOrchestrator {
    refresher: Arc<dyn StatsRefresher>,
    interval: Duration,
}

impl RefreshOrchestrator {
    /// Intervals below [`MIN_REFRESH_INTERVAL`] are raised to it.
    pub fn new(refresher: Arc<dyn StatsRefresher>, interval: Duration) -> Self {
        if interval < MIN_REFRESH_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis(),
                min_ms = MIN_REFRESH_INTERVAL.as_millis(),
                "Refresh interval too short, using the minimum"
            );
        }
        let interval = interval.max(MIN_REFRESH_INTERVAL);
        Self {
            refresher,
            interval,
        }
    }

    pub async fn run_forever(&self, shutdown: CancellationToken) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "🔄 Protocol stats refresh started"
        );

        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let report = self.refresher.refresh_protocol_stats().await;
            tracing::info!(
                refreshed = report.refreshed(),
                failed = report.failed(),
                "Protocol stats refresh pass done"
            );
        }

        tracing::info!("Protocol stats refresh stopped");
    }
}
