use std::path::PathBuf;

use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Relay process configuration, constructed once at startup and passed by
/// reference into request handling. Request logic never reads the process
/// environment directly.
#[derive(Clone)]
pub struct RelayConfig {
    pub port: u16,
    /// Upstream generation credential. Absence is not a startup failure;
    /// the suggest handler reports it per request.
    pub api_key: Option<String>,
    pub upstream_base_url: String,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub heartbeat_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("upstream_base_url", &self.upstream_base_url)
            .field("static_dir", &self.static_dir)
            .field("log_level", &self.log_level)
            .field("heartbeat_interval_secs", &self.heartbeat_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Load relay configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` first, so a local `.env` file can supply
/// values; variables already set in the process environment win, and
/// surrounding quotes in the file are stripped.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_relay_config() -> Result<RelayConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_relay_config_from_env()
}

/// Load relay configuration from variables already in the process.
///
/// Unlike [`load_relay_config`], this does NOT read `.env` files — useful in
/// tests or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_relay_config_from_env() -> Result<RelayConfig, ConfigError> {
    build_relay_config(|key| std::env::var(key))
}

/// Build relay configuration using the provided env-var lookup function.
///
/// The parsing/validation core, decoupled from the actual environment so it
/// can be tested with a plain `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn build_relay_config<F>(lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let port = parse_u16("PORT", "8989")?;
    let api_key = lookup("OPEN_AI_KEY").ok().filter(|key| !key.is_empty());
    let upstream_base_url = or_default("WEARCAST_UPSTREAM_URL", "https://api.openai.com");
    let static_dir = PathBuf::from(or_default("WEARCAST_STATIC_DIR", "./public"));
    let log_level = or_default("WEARCAST_LOG_LEVEL", "info");
    let heartbeat_interval_secs = parse_u64("WEARCAST_HEARTBEAT_INTERVAL_SECS", "300")?;
    let request_timeout_secs = parse_u64("WEARCAST_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(RelayConfig {
        port,
        api_key,
        upstream_base_url,
        static_dir,
        log_level,
        heartbeat_interval_secs,
        request_timeout_secs,
    })
}
