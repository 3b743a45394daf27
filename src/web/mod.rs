mod handlers;
mod router;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::agent::AgentConfig;
use crate::agent::runtime::AgentRuntime;
use crate::settings::Settings;

/// Shared, read-only request context. The default agent is the sessionless
/// instance constructed once at startup and passed in explicitly.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) settings: Arc<Settings>,
    pub(crate) default_agent: Arc<AgentConfig>,
    pub(crate) runtime: Arc<dyn AgentRuntime>,
}

pub async fn serve(
    settings: Settings,
    default_agent: AgentConfig,
    runtime: Arc<dyn AgentRuntime>,
) -> Result<()> {
    let addr = format!("0.0.0.0:{}", settings.server_port);
    let state = AppState {
        settings: Arc::new(settings),
        default_agent: Arc::new(default_agent),
        runtime,
    };
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Superwizard Server running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
