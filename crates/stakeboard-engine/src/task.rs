use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use pragma_common::services::{Service, ServiceRunner};

use crate::refresh::RefreshOrchestrator;
use crate::service::StakingService;

/// Long-lived service refreshing protocol statistics on a fixed interval.
pub struct StatsRefreshTask {
    service: Arc<StakingService>,
    interval: Duration,
}

impl StatsRefreshTask {
    pub fn new(service: Arc<StakingService>) -> Self {
        let interval = service.config().refresh_interval;
        Self { service, interval }
    }
}

#[async_trait::async_trait]
impl Service for StatsRefreshTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> Result<()> {
        let orchestrator = RefreshOrchestrator::new(self.service.clone(), self.interval);

        runner.spawn_loop(move |ctx| async move {
            // Not wrapped in run_until_cancelled: a pass in flight must finish.
            orchestrator.run_forever(ctx.token.clone()).await;
            Ok::<(), anyhow::Error>(())
        });

        Ok(())
    }
}
