use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use stakeboard_types::{StakingPosition, WalletAddress};

use crate::{AppState, dto::ApiResponse, errors::ApiError};

/// Live positions of a wallet, queried from every protocol.
#[utoipa::path(
    get,
    path = "/staking/{address}",
    tag = "Staking",
    params(
        ("address" = String, Path, description = "Wallet address, 0x followed by 40 hex characters")
    ),
    responses(
        (status = 200, description = "One position per protocol", body = Vec<StakingPosition>),
        (status = 400, description = "Invalid wallet address", body = ApiResponse),
        (status = 502, description = "A protocol subgraph could not be queried", body = ApiResponse)
    )
)]
pub async fn get_staking_positions(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let wallet: WalletAddress = address.parse()?;
    let positions = state.staking.get_staking_positions(&wallet).await?;

    Ok(Json(positions))
}
