use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Envelope used for health checks and error bodies. Data endpoints answer
/// with their payload directly.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ApiResponse {
    pub const fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            msg: None,
        }
    }

    pub const fn error(msg: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            msg: Some(msg),
        }
    }
}
