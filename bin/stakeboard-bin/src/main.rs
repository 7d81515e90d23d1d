mod cli;

use std::sync::Arc;
use std::time::Duration;

use crate::cli::StakeboardCli;
use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};

use stakeboard_api::{ApiService, AppState};
use stakeboard_db::{init_pool, run_migrations};
use stakeboard_engine::{EngineConfig, PgStakingStore, StakingService, StatsRefreshTask};
use stakeboard_metrics::MetricsRegistry;
use stakeboard_subgraph::{HttpGraphQlTransport, SubgraphDataSource, SubgraphEndpoints};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let StakeboardCli {
        database_url,
        otel_collector_endpoint,
        api_port,
        etherfi_subgraph_url,
        lido_subgraph_url,
        stats_refresh_interval_secs,
        subgraph_timeout_secs,
    } = StakeboardCli::parse();

    let app_name = "stakeboard";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let pool = init_pool(app_name, &database_url)?;
    run_migrations(&pool).await?;

    let transport = HttpGraphQlTransport::new(Duration::from_secs(subgraph_timeout_secs))?;
    let source = SubgraphDataSource::new(
        Arc::new(transport),
        SubgraphEndpoints {
            etherfi: etherfi_subgraph_url.to_string(),
            lido: lido_subgraph_url.to_string(),
        },
    );

    let config = EngineConfig {
        refresh_interval: Duration::from_secs(stats_refresh_interval_secs),
        ..EngineConfig::default()
    };
    let staking = Arc::new(StakingService::new(
        Arc::new(PgStakingStore::new(pool)),
        Arc::new(source),
        MetricsRegistry::new(),
        config,
    ));

    let api_service = ApiService::new(
        AppState {
            staking: staking.clone(),
        },
        "0.0.0.0",
        api_port,
    );
    let refresh_service = StatsRefreshTask::new(staking);

    tracing::info!(api_port, "Starting stakeboard services");

    ServiceGroup::default()
        .with(api_service)
        .with(refresh_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
