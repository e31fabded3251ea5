//! HTTP server setup and edge interception.
//!
//! # Responsibilities
//! - Create the Axum router with the edge handler in front of everything
//! - Wire up middleware (tracing, timeout, request ID)
//! - Apply routing decisions: pass, redirect, or synthesized robots body
//! - Forward passed-through requests to the upstream rendering origin
//! - Apply validated config reloads atomically

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{
        header,
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::config::validation::ValidationError;
use crate::config::{ConfigError, EdgeConfig};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::http::robots;
use crate::observability::metrics;
use crate::routing::{EdgeRouter, RoutingDecision};

/// Immutable policy view a request is served under.
///
/// Reloads swap the whole snapshot; in-flight requests keep the one they
/// started with.
pub struct PolicySnapshot {
    pub router: EdgeRouter,
    pub upstream: Authority,
}

impl PolicySnapshot {
    /// Compile a snapshot from a validated config.
    pub fn from_config(config: &EdgeConfig) -> Result<Self, ConfigError> {
        let router = EdgeRouter::from_config(&config.policy).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidCanonicalOrigin(
                config.policy.canonical_origin.clone(),
            )])
        })?;
        let upstream = config.upstream.address.parse::<Authority>().map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidUpstreamAddress(
                config.upstream.address.clone(),
            )])
        })?;

        Ok(Self { router, upstream })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<ArcSwap<PolicySnapshot>>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the edge tier.
pub struct EdgeServer {
    router: Router,
    config: EdgeConfig,
    snapshot: Arc<ArcSwap<PolicySnapshot>>,
}

impl EdgeServer {
    /// Create a new edge server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, ConfigError> {
        let snapshot = Arc::new(ArcSwap::from_pointee(PolicySnapshot::from_config(&config)?));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            snapshot: snapshot.clone(),
            client,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            snapshot,
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/_edge/health", get(health_handler))
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Validated config updates received on `config_updates` are compiled
    /// and swapped in without interrupting traffic.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Edge server starting");

        let snapshot = self.snapshot.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match PolicySnapshot::from_config(&new_config) {
                    Ok(new_snapshot) => {
                        snapshot.store(Arc::new(new_snapshot));
                        tracing::info!(
                            canonical_origin = %new_config.policy.canonical_origin,
                            upstream = %new_config.upstream.address,
                            "Edge policy reloaded"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected config update");
                    }
                }
            }
        });

        let app = self.router.into_make_service();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Edge server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }
}

/// Main edge handler.
/// Classifies the host, applies the routing decision, forwards on Pass.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let snapshot = state.snapshot.load_full();

    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        // HTTP/2 carries the host in the :authority pseudo-header.
        .or_else(|| request.uri().host().map(str::to_owned));
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_owned);

    let decision = snapshot
        .router
        .decide(host.as_deref(), &path, query.as_deref());
    metrics::record_decision(decision.label());

    tracing::debug!(
        request_id = %request_id,
        host = host.as_deref().unwrap_or("-"),
        path = %path,
        decision = decision.label(),
        "Edge decision"
    );

    match decision {
        RoutingDecision::Pass => forward_upstream(&state, &snapshot, &request_id, request).await,
        RoutingDecision::Redirect(target) => permanent_redirect(&target),
        RoutingDecision::Robots(profile) => {
            robots::robots_response(profile, snapshot.router.canonical_origin())
        }
    }
}

/// 301 with the Location header set to the canonical target.
fn permanent_redirect(target: &Url) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, target.as_str())],
    )
        .into_response()
}

/// Forward a passed-through request to the upstream rendering origin.
async fn forward_upstream(
    state: &AppState,
    snapshot: &PolicySnapshot,
    request_id: &str,
    request: Request<Body>,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(snapshot.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_upstream_failure();
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Deploy-probe endpoint on the internal surface.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
