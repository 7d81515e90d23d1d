//! Response shapes of the upstream subgraphs. Numeric scalars arrive as
//! strings and are parsed later, on a best-effort basis. A null scalar is
//! read as an empty string, which then parses to a degraded zero.

use serde::{Deserialize, Deserializer};

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

// ============================================================================
// ether.fi
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EtherFiStakersData {
    #[serde(default)]
    pub stakers: Vec<EtherFiStaker>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtherFiStaker {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_staked: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_withdrawn: String,
    #[serde(default)]
    pub stakes: Vec<EtherFiStake>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtherFiStake {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amount: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
    pub validator: Option<EtherFiValidator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtherFiValidator {
    pub id: String,
    pub status: String,
}

// ============================================================================
// Lido
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LidoUsersData {
    #[serde(default)]
    pub users: Vec<LidoUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LidoUser {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_staked: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_claimed: String,
}

// ============================================================================
// Protocol TVL
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetricsData {
    #[serde(default)]
    pub protocol_metrics: Vec<ProtocolMetric>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolMetric {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub total_value_locked: String,
    pub total_stakers: Option<String>,
}
