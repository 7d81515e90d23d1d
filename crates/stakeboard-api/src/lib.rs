pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use stakeboard_engine::StakingService;
use std::{env, time::Duration};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use pragma_common::services::{Service, ServiceRunner};

use docs::ApiDoc;
use router::api_router;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 10;

#[derive(Clone)]
pub struct AppState {
    pub staking: Arc<StakingService>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }
}

fn secs_from_env(name: &str, default: u64) -> Duration {
    let secs = env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

fn cors_layer_from_env() -> CorsLayer {
    match env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    match HeaderValue::from_str(trimmed) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            tracing::warn!(
                                origin = trimmed,
                                error = %err,
                                "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                            );
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
                );
                return CorsLayer::permissive();
            }

            tracing::info!(
                allowed = %origins,
                "Configured restricted CORS origins from environment",
            );

            // The API is read-only
            CorsLayer::new()
                .allow_headers(AllowHeaders::mirror_request())
                .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
                .allow_origin(AllowOrigin::list(allowed_origins))
        }
        Err(_) => {
            tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
            CorsLayer::permissive()
        }
    }
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            let request_timeout =
                secs_from_env("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);
            let shutdown_grace = secs_from_env("SHUTDOWN_GRACE_SECS", DEFAULT_SHUTDOWN_GRACE_SECS);

            tracing::info!(
                timeout_secs = request_timeout.as_secs(),
                shutdown_grace_secs = shutdown_grace.as_secs(),
                "Request timeout configured"
            );

            #[allow(clippy::default_constructed_unit_structs)]
            let app = api_router::<ApiDoc>()
                .with_state(state)
                // Trace every request and echo its trace id in the response headers
                .layer(OtelAxumLayer::default())
                .layer(OtelInResponseLayer::default())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(cors_layer_from_env());

            tracing::info!("🧩 API started at http://{}", socket_addr);

            // Create a shutdown signal from our context
            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            let server = axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown);

            // In-flight requests get a bounded time to drain once shutdown starts
            let token = ctx.token.clone();
            let drain_deadline = async move {
                token.cancelled().await;
                tokio::time::sleep(shutdown_grace).await;
            };

            tokio::select! {
                result = server.into_future() => result.context("😱 API server stopped!"),
                () = drain_deadline => {
                    tracing::warn!(
                        grace_secs = shutdown_grace.as_secs(),
                        "In-flight requests did not drain in time, stopping API server"
                    );
                    Ok(())
                }
            }
        });

        Ok(())
    }
}
