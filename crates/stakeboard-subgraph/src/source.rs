use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use stakeboard_types::{Protocol, TvlSample, WalletAddress, parse_amount};

use crate::{
    error::DataSourceError,
    queries::{ETHERFI_STAKE_QUERY, LIDO_STAKE_QUERY, PROTOCOL_TVL_QUERY},
    traits::{RawPosition, StakingDataSource},
    transport::GraphQlTransport,
    types::{
        EtherFiStakersData, GraphQlResponse, LidoUsersData, ProtocolMetric, ProtocolMetricsData,
    },
};

/// Subgraph endpoint per indexed protocol.
#[derive(Debug, Clone)]
pub struct SubgraphEndpoints {
    pub etherfi: String,
    pub lido: String,
}

impl SubgraphEndpoints {
    pub fn for_protocol(&self, protocol: Protocol) -> Option<&str> {
        match protocol {
            Protocol::EtherFi => Some(&self.etherfi),
            Protocol::Lido => Some(&self.lido),
            Protocol::RocketPool => None,
        }
    }
}

pub struct SubgraphDataSource {
    transport: Arc<dyn GraphQlTransport>,
    endpoints: SubgraphEndpoints,
}

impl SubgraphDataSource {
    pub fn new(transport: Arc<dyn GraphQlTransport>, endpoints: SubgraphEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    fn endpoint(&self, protocol: Protocol) -> Result<&str, DataSourceError> {
        self.endpoints
            .for_protocol(protocol)
            .ok_or(DataSourceError::Unsupported { protocol })
    }

    async fn query<T: DeserializeOwned + Default>(
        &self,
        protocol: Protocol,
        query: &str,
        variables: Value,
    ) -> Result<T, DataSourceError> {
        let endpoint = self.endpoint(protocol)?;
        let body = self
            .transport
            .post_graphql(endpoint, query, variables)
            .await
            .map_err(|source| DataSourceError::Transport { protocol, source })?;

        let response: GraphQlResponse<T> =
            serde_json::from_value(body).map_err(|e| DataSourceError::Decode {
                protocol,
                message: e.to_string(),
            })?;

        if !response.errors.is_empty() {
            let message = response
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DataSourceError::GraphQl { protocol, message });
        }

        // Without errors, a null `data` is an empty result set
        Ok(response.data.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl StakingDataSource for SubgraphDataSource {
    async fn fetch_position(
        &self,
        protocol: Protocol,
        wallet: &WalletAddress,
    ) -> Result<RawPosition, DataSourceError> {
        let variables = json!({ "user": wallet.as_str() });
        match protocol {
            Protocol::EtherFi => {
                let data: EtherFiStakersData =
                    self.query(protocol, ETHERFI_STAKE_QUERY, variables).await?;
                Ok(RawPosition::EtherFi(data.stakers))
            }
            Protocol::Lido => {
                let data: LidoUsersData = self.query(protocol, LIDO_STAKE_QUERY, variables).await?;
                Ok(RawPosition::Lido(data.users))
            }
            Protocol::RocketPool => Ok(RawPosition::RocketPool),
        }
    }

    async fn fetch_tvl_series(
        &self,
        protocol: Protocol,
        since: DateTime<Utc>,
    ) -> Result<Vec<TvlSample>, DataSourceError> {
        let data: ProtocolMetricsData = self
            .query(
                protocol,
                PROTOCOL_TVL_QUERY,
                json!({ "startTime": since.timestamp() }),
            )
            .await?;

        Ok(data
            .protocol_metrics
            .into_iter()
            .map(|metric| to_tvl_sample(protocol, metric))
            .collect())
    }
}

/// Unparsable fields read as zero (or epoch) and mark the sample degraded.
/// The series keeps the upstream order.
fn to_tvl_sample(protocol: Protocol, metric: ProtocolMetric) -> TvlSample {
    let timestamp = metric
        .timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0));
    if timestamp.is_none() {
        tracing::warn!(
            protocol = %protocol,
            raw = %metric.timestamp,
            "Unparsable TVL sample timestamp, using epoch"
        );
    }

    let tvl = parse_amount(&metric.total_value_locked);
    if tvl.degraded {
        tracing::warn!(
            protocol = %protocol,
            raw = %metric.total_value_locked,
            "Unparsable TVL value, using zero"
        );
    }

    TvlSample {
        timestamp: timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        total_value_locked: tvl.value,
        degraded: timestamp.is_none() || tvl.degraded,
    }
}
