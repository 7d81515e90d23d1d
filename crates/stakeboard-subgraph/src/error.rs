use stakeboard_types::Protocol;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    StatusError(reqwest::StatusCode),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Failure of one upstream call. Always names the protocol it was made for.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("{protocol} subgraph request failed: {source}")]
    Transport {
        protocol: Protocol,
        source: TransportError,
    },

    #[error("{protocol} subgraph returned errors: {message}")]
    GraphQl { protocol: Protocol, message: String },

    #[error("{protocol} subgraph payload could not be decoded: {message}")]
    Decode { protocol: Protocol, message: String },

    #[error("{protocol} has no upstream data source")]
    Unsupported { protocol: Protocol },
}

impl DataSourceError {
    pub const fn protocol(&self) -> Protocol {
        match self {
            Self::Transport { protocol, .. }
            | Self::GraphQl { protocol, .. }
            | Self::Decode { protocol, .. }
            | Self::Unsupported { protocol } => *protocol,
        }
    }
}
