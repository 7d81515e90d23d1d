use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use stakeboard_engine::EngineError;
use stakeboard_types::InvalidWalletAddress;
use thiserror::Error;

use crate::dto::ApiResponse;

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Bad gateway: {0}")]
    BadGateway(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        // NOTE: Error is already logged where it was raised
        match err {
            EngineError::DataSource(e) => Self::BadGateway(e.to_string()),
            EngineError::Persistence(e) if e.is_not_found() => {
                Self::NotFound("The requested resource was not found".to_string())
            }
            // Don't expose internal database details to clients
            EngineError::Persistence(_) => Self::InternalServerError,
        }
    }
}

impl From<InvalidWalletAddress> for ApiError {
    fn from(err: InvalidWalletAddress) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ApiResponse::error(msg))).into_response()
    }
}
