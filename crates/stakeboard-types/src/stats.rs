use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Protocol;

/// Latest known protocol-wide statistics. One row per protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolStats {
    pub protocol: Protocol,
    /// Annualized yield in percent, linearly extrapolated from the TVL window.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub current_apy: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub tvl: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl ProtocolStats {
    /// Zero APY and TVL, stamped at `updated_at`.
    pub const fn placeholder(protocol: Protocol, updated_at: DateTime<Utc>) -> Self {
        Self {
            protocol,
            current_apy: Decimal::ZERO,
            tvl: Decimal::ZERO,
            updated_at,
        }
    }
}

/// A raw point of an upstream TVL time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvlSample {
    pub timestamp: DateTime<Utc>,
    pub total_value_locked: Decimal,
    /// Set when a field of the sample could not be parsed upstream.
    pub degraded: bool,
}
