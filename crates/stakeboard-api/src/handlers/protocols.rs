use axum::{Json, extract::State, response::IntoResponse};
use stakeboard_types::ProtocolStats;

use crate::{AppState, dto::ApiResponse, errors::ApiError};

#[utoipa::path(
    get,
    path = "/protocols",
    tag = "Protocols",
    responses(
        (status = 200, description = "Latest stats of every protocol, ordered by name", body = Vec<ProtocolStats>),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_protocol_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.staking.get_protocol_stats().await?;

    Ok(Json(stats))
}
