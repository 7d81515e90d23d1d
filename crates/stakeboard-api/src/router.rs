use axum::Json;
use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;

use crate::dto::ApiResponse;
use crate::errors::ApiError;
use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>() -> Router<AppState> {
    let open_api = T::openapi();

    let api = Router::new()
        .route("/health", get(health))
        .route("/staking/{address}", get(handlers::get_staking_positions))
        .route("/yields/{address}", get(handlers::get_yield_history))
        .route("/protocols", get(handlers::get_protocol_stats))
        .route(
            "/docs/openapi.json",
            get(move || {
                let doc = open_api.clone();
                async move { Json(doc) }
            }),
        );

    Router::new().nest("/api", api).fallback(handler_404)
}

async fn health() -> Json<ApiResponse> {
    Json(ApiResponse::ok())
}

async fn handler_404() -> impl IntoResponse {
    ApiError::NotFound("The requested resource was not found".to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};
    use stakeboard_db::DatabaseError;
    use stakeboard_engine::{EngineConfig, StakingService, StakingStore};
    use stakeboard_metrics::MetricsRegistry;
    use stakeboard_subgraph::types::EtherFiStaker;
    use stakeboard_subgraph::{DataSourceError, RawPosition, StakingDataSource};
    use stakeboard_types::{
        Protocol, ProtocolStats, StakingPosition, TvlSample, WalletAddress, YieldPoint,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::docs::ApiDoc;

    const WALLET: &str = "0xAbCdEf0123456789aBCDEF0123456789abcdef01";

    #[derive(Default)]
    struct Store {
        snapshots: Mutex<Vec<YieldPoint>>,
    }

    #[async_trait::async_trait]
    impl StakingStore for Store {
        async fn upsert_protocol_stats(&self, _stats: &ProtocolStats) -> Result<(), DatabaseError> {
            Ok(())
        }

        async fn get_latest_protocol_stats(&self) -> Result<Vec<ProtocolStats>, DatabaseError> {
            Ok(Protocol::ALL
                .into_iter()
                .map(|protocol| ProtocolStats::placeholder(protocol, DateTime::<Utc>::UNIX_EPOCH))
                .collect())
        }

        async fn insert_wallet_snapshot(
            &self,
            _wallet: &WalletAddress,
            position: &StakingPosition,
        ) -> Result<(), DatabaseError> {
            self.snapshots.lock().unwrap().push(YieldPoint {
                protocol: position.protocol,
                rewards: position.rewards,
                timestamp: DateTime::<Utc>::UNIX_EPOCH,
            });
            Ok(())
        }

        async fn get_wallet_snapshots(
            &self,
            _wallet: &WalletAddress,
        ) -> Result<Vec<YieldPoint>, DatabaseError> {
            Ok(self.snapshots.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct Source {
        failing: HashSet<Protocol>,
        seen_wallets: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl StakingDataSource for Source {
        async fn fetch_position(
            &self,
            protocol: Protocol,
            wallet: &WalletAddress,
        ) -> Result<RawPosition, DataSourceError> {
            self.seen_wallets.lock().unwrap().push(wallet.to_string());
            if self.failing.contains(&protocol) {
                return Err(DataSourceError::GraphQl {
                    protocol,
                    message: "indexer unavailable".to_string(),
                });
            }
            Ok(match protocol {
                Protocol::EtherFi => RawPosition::EtherFi(vec![EtherFiStaker {
                    id: wallet.to_string(),
                    total_staked: "100".to_string(),
                    total_withdrawn: "20".to_string(),
                    ..Default::default()
                }]),
                other => RawPosition::empty(other),
            })
        }

        async fn fetch_tvl_series(
            &self,
            _protocol: Protocol,
            _since: DateTime<Utc>,
        ) -> Result<Vec<TvlSample>, DataSourceError> {
            Ok(Vec::new())
        }
    }

    fn app(source: Source) -> (Router, Arc<Source>) {
        let source = Arc::new(source);
        let staking = StakingService::new(
            Arc::new(Store::default()),
            source.clone(),
            MetricsRegistry::new(),
            EngineConfig::default(),
        );
        let state = AppState {
            staking: Arc::new(staking),
        };
        (api_router::<ApiDoc>().with_state(state), source)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = app(Source::default());
        let (status, body) = get(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_staking_positions() {
        let (router, source) = app(Source::default());
        let (status, body) = get(router, &format!("/api/staking/{WALLET}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "protocol": "ether.fi", "stakedAmount": 100.0, "rewards": 80.0, "currentValue": 180.0 },
                { "protocol": "lido", "stakedAmount": 0.0, "rewards": 0.0, "currentValue": 0.0 },
                { "protocol": "rocketpool", "stakedAmount": 0.0, "rewards": 0.0, "currentValue": 0.0 },
            ])
        );
        assert!(
            source
                .seen_wallets
                .lock()
                .unwrap()
                .iter()
                .all(|wallet| wallet == &WALLET.to_lowercase())
        );
    }

    #[tokio::test]
    async fn test_invalid_address_is_rejected() {
        let (router, source) = app(Source::default());
        let (status, body) = get(router, "/api/staking/not-a-wallet").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(source.seen_wallets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let (router, _) = app(Source {
            failing: HashSet::from([Protocol::Lido]),
            ..Default::default()
        });
        let (status, body) = get(router, &format!("/api/staking/{WALLET}")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert!(body["msg"].as_str().unwrap().contains("lido"));
    }

    #[tokio::test]
    async fn test_yields_after_a_position_query() {
        let (router, _) = app(Source::default());
        get(router.clone(), &format!("/api/staking/{WALLET}")).await;
        let (status, body) = get(router, &format!("/api/yields/{WALLET}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["protocol"], "ether.fi");
        assert_eq!(body[0]["rewards"], 80.0);
    }

    #[tokio::test]
    async fn test_protocols() {
        let (router, _) = app(Source::default());
        let (status, body) = get(router, "/api/protocols").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|stats| stats["protocol"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ether.fi", "lido", "rocketpool"]);
        assert_eq!(body[0]["currentApy"], 0.0);
        assert_eq!(body[0]["tvl"], 0.0);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (router, _) = app(Source::default());
        let (status, body) = get(router, "/api/docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/protocols"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (router, _) = app(Source::default());
        let (status, body) = get(router, "/api/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }
}
