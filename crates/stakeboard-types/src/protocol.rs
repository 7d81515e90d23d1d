use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Liquid-staking protocols tracked by stakeboard.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Protocol {
    #[serde(rename = "ether.fi")]
    #[strum(serialize = "ether.fi")]
    EtherFi,
    #[serde(rename = "lido")]
    #[strum(serialize = "lido")]
    Lido,
    #[serde(rename = "rocketpool")]
    #[strum(serialize = "rocketpool")]
    RocketPool,
}

impl Protocol {
    /// Every protocol, in the order positions are reported.
    pub const ALL: [Self; 3] = [Self::EtherFi, Self::Lido, Self::RocketPool];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EtherFi => "ether.fi",
            Self::Lido => "lido",
            Self::RocketPool => "rocketpool",
        }
    }

    /// Whether an upstream subgraph backs this protocol. Rocket Pool is a
    /// static placeholder for now.
    pub const fn is_indexed(&self) -> bool {
        !matches!(self, Self::RocketPool)
    }
}
