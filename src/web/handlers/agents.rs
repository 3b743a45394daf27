use axum::{Json, extract::State};

use super::super::AppState;
use crate::agent::{self, AgentParams};
use crate::db;

pub async fn list_agents(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "agents": [
            {
                "name": state.default_agent.name,
                "description": "AI-powered DOM automation agent",
                "available": true
            }
        ]
    }))
}

/// Per-component health: database round trip, throwaway agent construction,
/// and API key presence. Any failing check degrades the aggregate status.
pub async fn detailed_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut status = "healthy";
    let mut components = serde_json::Map::new();

    let db_url = db::build_db_url(&state.settings);
    match db::probe(&db_url).await {
        Ok(()) => {
            components.insert(
                "database".to_string(),
                serde_json::json!({"status": "healthy", "latency": "low"}),
            );
        }
        Err(e) => {
            components.insert(
                "database".to_string(),
                serde_json::json!({"status": "unhealthy", "error": e.to_string()}),
            );
            status = "degraded";
        }
    }

    match agent::superwizard_agent(&state.settings, AgentParams::default()) {
        Ok(probe_agent) => {
            components.insert(
                "agent".to_string(),
                serde_json::json!({"status": "healthy", "name": probe_agent.name}),
            );
        }
        Err(e) => {
            components.insert(
                "agent".to_string(),
                serde_json::json!({"status": "unhealthy", "error": e.to_string()}),
            );
            status = "degraded";
        }
    }

    // Startup already warned about this; the endpoint re-checks so a missing
    // key stays observable after boot.
    if state.settings.has_valid_api_key() {
        components.insert(
            "openrouter".to_string(),
            serde_json::json!({"status": "healthy", "configured": true}),
        );
    } else {
        components.insert(
            "openrouter".to_string(),
            serde_json::json!({"status": "unhealthy", "error": "API key not configured"}),
        );
        status = "degraded";
    }

    Json(serde_json::json!({
        "status": status,
        "timestamp": "now",
        "components": components
    }))
}
