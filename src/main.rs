mod agent;
mod db;
mod settings;
mod web;

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

use crate::agent::AgentParams;
use crate::agent::runtime::HostedRuntime;
use crate::settings::Settings;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("superwizard-server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Malformed numeric settings are fatal; everything else falls back to
    // documented defaults.
    let settings = Settings::from_env()?;

    let level = if settings.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    tracing::info!(
        "Starting {} v{} (debug={}, telemetry={})",
        settings.app_name,
        settings.version,
        settings.debug,
        settings.telemetry_enabled
    );

    // Fail soft: the server starts without a key, runs will error until one
    // is configured and /v1/health/detailed reports the gap.
    if !settings.has_valid_api_key() {
        warn!("OPENROUTER_API_KEY is missing or not configured. Server may not work correctly.");
    }

    let default_agent = agent::superwizard_agent(&settings, AgentParams::default())?;
    web::serve(settings, default_agent, Arc::new(HostedRuntime::new())).await
}
