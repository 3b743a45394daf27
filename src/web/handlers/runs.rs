use axum::{
    Form, Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info};

use super::super::AppState;
use crate::agent::{self, AGENT_ID, AgentParams, runtime};

const ERROR_CONTENT: &str = "I apologize, but I encountered an error while processing your \
request. Please try again or rephrase your message.";

#[derive(serde::Deserialize)]
pub struct RunRequest {
    message: String,
    #[serde(default = "default_user_id")]
    user_id: String,
    #[serde(default = "default_stream")]
    stream: String,
}

fn default_user_id() -> String {
    "default-user".to_string()
}

fn default_stream() -> String {
    "false".to_string()
}

pub async fn run_agent(
    Path(agent_name): Path<String>,
    State(state): State<AppState>,
    Form(payload): Form<RunRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    if agent_name != AGENT_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "detail": format!("Agent '{}' not found", agent_name)
            })),
        );
    }

    info!(
        "Running agent with message: {}...",
        truncate(&payload.message, 50)
    );

    let session_id = format!("session_{}_{}", payload.user_id, agent_name);
    let stream = payload.stream.to_lowercase() == "true";

    let result = match agent::select_agent(
        "superwizard",
        &state.settings,
        AgentParams {
            user_id: Some(payload.user_id.clone()),
            session_id: Some(session_id),
            debug_mode: false,
        },
    ) {
        Ok(user_agent) => state.runtime.run(&user_agent, &payload.message, stream).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            let content = runtime::normalize(&output);
            info!(
                "Agent response generated successfully (length: {})",
                content.len()
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "content": content,
                    "user_id": payload.user_id,
                    "agent": agent_name,
                    "timestamp": "now",
                    "status": "success"
                })),
            )
        }
        // Downstream failures never surface as transport errors; the caller
        // gets a user-safe body with the raw error attached.
        Err(e) => {
            error!("Error running agent: {:#}", e);
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "content": ERROR_CONTENT,
                    "user_id": payload.user_id,
                    "agent": agent_name,
                    "timestamp": "now",
                    "status": "error",
                    "error": e.to_string()
                })),
            )
        }
    }
}

/// Legacy playground alias; same handler, byte-identical body.
pub async fn run_agent_legacy(
    path: Path<String>,
    state: State<AppState>,
    payload: Form<RunRequest>,
) -> (StatusCode, Json<serde_json::Value>) {
    run_agent(path, state, payload).await
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
