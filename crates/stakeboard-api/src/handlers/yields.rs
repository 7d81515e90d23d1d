use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use stakeboard_types::{WalletAddress, YieldPoint};

use crate::{AppState, dto::ApiResponse, errors::ApiError};

/// Rewards history recorded for a wallet, oldest first.
#[utoipa::path(
    get,
    path = "/yields/{address}",
    tag = "Staking",
    params(
        ("address" = String, Path, description = "Wallet address, 0x followed by 40 hex characters")
    ),
    responses(
        (status = 200, description = "Recorded yield points", body = Vec<YieldPoint>),
        (status = 400, description = "Invalid wallet address", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_yield_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let wallet: WalletAddress = address.parse()?;
    let history = state.staking.get_yield_history(&wallet).await?;

    Ok(Json(history))
}
