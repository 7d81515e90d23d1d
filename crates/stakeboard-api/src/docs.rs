#![allow(clippy::needless_for_each)]

use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::ServerBuilder;

use stakeboard_types::{Protocol, ProtocolStats, StakingPosition, YieldPoint};

use crate::dto::{ApiResponse, ResponseStatus};
use crate::handlers;

pub struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.servers = Some(vec![ServerBuilder::new().url("/api").build()]);
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ServerAddon),
    paths(
        handlers::staking::get_staking_positions,
        handlers::yields::get_yield_history,
        handlers::protocols::get_protocol_stats,
    ),
    components(schemas(
        ApiResponse,
        ResponseStatus,
        Protocol,
        ProtocolStats,
        StakingPosition,
        YieldPoint,
    )),
    tags(
        (name = "stakeboard", description = "Liquid-staking positions and protocol statistics"),
        (name = "Staking", description = "Wallet positions and yield history"),
        (name = "Protocols", description = "Protocol-wide statistics")
    )
)]
pub struct ApiDoc;
