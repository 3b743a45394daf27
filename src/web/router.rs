use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::AppState;
use super::handlers::{agents, meta, runs};

pub(crate) fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(meta::root))
        .route("/health", get(meta::health))
        .route("/status", get(meta::status))
        .route("/v1/agents", get(agents::list_agents))
        .route("/v1/health/detailed", get(agents::detailed_health))
        .route("/v1/agents/{agent_name}/runs", post(runs::run_agent))
        // Legacy playground aliases kept for older clients.
        .route("/v1/playground/agents", get(agents::list_agents))
        .route(
            "/v1/playground/agents/{agent_name}/runs",
            post(runs::run_agent_legacy),
        )
        .fallback(meta::not_found)
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

async fn log_requests(req: Request<Body>, next: Next) -> axum::response::Response {
    info!("Request: {} {}", req.method(), req.uri());
    let response = next.run(req).await;
    info!("Response: {}", response.status());
    response
}
