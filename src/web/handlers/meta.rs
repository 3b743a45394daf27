use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use super::super::AppState;
use crate::db;

#[derive(serde::Serialize)]
pub struct HealthCheck {
    status: &'static str,
    service: String,
    version: String,
}

pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": state.settings.app_name,
        "version": state.settings.version,
        "status": "running",
        "endpoints": {
            "health": "/health",
            "status": "/status",
            "agents": "/v1/agents"
        }
    }))
}

/// Static liveness check, independent of database and model availability.
pub async fn health(State(state): State<AppState>) -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "OK",
        service: state.settings.app_name.clone(),
        version: state.settings.version.clone(),
    })
}

pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_url = db::build_db_url(&state.settings);
    let db_status = match db::probe(&db_url).await {
        Ok(()) => "connected",
        Err(e) => {
            error!("Database connection failed: {}", e);
            "disconnected"
        }
    };

    Json(serde_json::json!({
        "service": state.settings.app_name,
        "version": state.settings.version,
        "status": "running",
        "database": {
            "status": db_status
        },
        "agents": {
            "count": 1,
            "names": [state.default_agent.name]
        },
        "environment": {
            "debug": state.settings.debug,
            "port": state.settings.server_port
        }
    }))
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not Found",
            "message": "The requested endpoint was not found",
            "available_endpoints": {
                "root": "/",
                "health": "/health",
                "status": "/status",
                "agents": "/v1/agents"
            }
        })),
    )
}
