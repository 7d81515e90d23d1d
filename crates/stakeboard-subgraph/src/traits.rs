use chrono::{DateTime, Utc};
use stakeboard_types::{Protocol, TvlSample, WalletAddress};

use crate::{
    error::DataSourceError,
    types::{EtherFiStaker, LidoUser},
};

/// What a protocol's upstream knows about one wallet, still in that
/// protocol's own schema. An empty entity list is a wallet without position.
#[derive(Debug, Clone)]
pub enum RawPosition {
    EtherFi(Vec<EtherFiStaker>),
    Lido(Vec<LidoUser>),
    /// Not backed by an upstream yet.
    RocketPool,
}

impl RawPosition {
    pub const fn protocol(&self) -> Protocol {
        match self {
            Self::EtherFi(_) => Protocol::EtherFi,
            Self::Lido(_) => Protocol::Lido,
            Self::RocketPool => Protocol::RocketPool,
        }
    }

    /// The raw shape of a wallet with no position in `protocol`.
    pub const fn empty(protocol: Protocol) -> Self {
        match protocol {
            Protocol::EtherFi => Self::EtherFi(Vec::new()),
            Protocol::Lido => Self::Lido(Vec::new()),
            Protocol::RocketPool => Self::RocketPool,
        }
    }
}

/// Upstream staking data, one call per protocol. Calls are never retried.
#[async_trait::async_trait]
pub trait StakingDataSource: Send + Sync {
    async fn fetch_position(
        &self,
        protocol: Protocol,
        wallet: &WalletAddress,
    ) -> Result<RawPosition, DataSourceError>;

    /// TVL samples strictly after `since`, oldest first.
    async fn fetch_tvl_series(
        &self,
        protocol: Protocol,
        since: DateTime<Utc>,
    ) -> Result<Vec<TvlSample>, DataSourceError>;
}
