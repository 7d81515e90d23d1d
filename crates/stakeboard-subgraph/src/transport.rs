use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

/// Posts a GraphQL document and returns the decoded JSON body.
#[async_trait::async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn post_graphql(
        &self,
        endpoint: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, TransportError>;
}

pub struct HttpGraphQlTransport {
    http_client: Client,
}

impl HttpGraphQlTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            http_client: http_client(timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl GraphQlTransport for HttpGraphQlTransport {
    async fn post_graphql(
        &self,
        endpoint: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, TransportError> {
        let response = self
            .http_client
            .post(endpoint)
            .json(&GraphQlRequest {
                query,
                variables: &variables,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::StatusError(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

pub fn http_client(timeout: Duration) -> Result<Client, TransportError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        TransportError::HttpError(e)
    })
}
