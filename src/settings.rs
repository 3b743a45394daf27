use anyhow::{Context, Result};

/// Sample value shipped in .env templates. Treated the same as a missing key.
pub const API_KEY_PLACEHOLDER: &str = "your_openrouter_api_key_here";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub version: String,
    pub debug: bool,
    pub server_port: u16,
    pub openrouter_api_key: Option<String>,
    pub db_driver: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_host: String,
    pub db_port: u16,
    pub telemetry_enabled: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup. Tests pass closures
    /// here instead of mutating the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            app_name: "Superwizard Server".to_string(),
            version: "1.0.0".to_string(),
            debug: flag(&get, "DEBUG"),
            server_port: port(&get, "SERVER_PORT", 7777)?,
            openrouter_api_key: get("OPENROUTER_API_KEY").filter(|v| !v.is_empty()),
            db_driver: var(&get, "DB_DRIVER", "postgres"),
            db_user: var(&get, "DB_USER", "superwizard"),
            db_password: var(&get, "DB_PASSWORD", "superwizard123"),
            db_name: var(&get, "DB_NAME", "superwizard_db"),
            db_host: var(&get, "DB_HOST", "localhost"),
            db_port: port(&get, "DB_PORT", 5433)?,
            telemetry_enabled: flag(&get, "TELEMETRY_ENABLED"),
        })
    }

    /// True when the OpenRouter key is set to something other than the
    /// placeholder. Checked (with a warning) at startup and again by the
    /// detailed health endpoint.
    pub fn has_valid_api_key(&self) -> bool {
        self.openrouter_api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && key != API_KEY_PLACEHOLDER)
    }
}

fn var(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

fn flag(get: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    get(key).map(|v| v.to_lowercase() == "true").unwrap_or(false)
}

// A malformed port is a configuration bug, not something to paper over with
// the default.
fn port(get: &impl Fn(&str) -> Option<String>, key: &str, default: u16) -> Result<u16> {
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}
