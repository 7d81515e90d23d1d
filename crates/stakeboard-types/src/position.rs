use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Protocol;

/// A wallet's position in one protocol, normalized across upstream schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StakingPosition {
    pub protocol: Protocol,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub staked_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub rewards: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub current_value: Decimal,
    /// Set when an upstream amount could not be parsed and was read as zero.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl StakingPosition {
    pub fn new(protocol: Protocol, staked_amount: Decimal, rewards: Decimal) -> Self {
        Self {
            protocol,
            staked_amount,
            rewards,
            current_value: staked_amount.saturating_add(rewards),
            degraded: false,
        }
    }

    /// The position of a wallet with nothing staked in `protocol`.
    pub fn zero(protocol: Protocol) -> Self {
        Self::new(protocol, Decimal::ZERO, Decimal::ZERO)
    }

    #[must_use]
    pub const fn degraded(mut self, degraded: bool) -> Self {
        self.degraded = degraded;
        self
    }
}

/// One persisted observation of a wallet's rewards in a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoint {
    pub protocol: Protocol,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub rewards: Decimal,
    pub timestamp: DateTime<Utc>,
}
