//! Endpoint configuration.
//!
//! Both endpoints come from the environment; absence falls back to the
//! documented local defaults so a dev setup works with no configuration.

use once_cell::sync::Lazy;

/// REST collaborator base URL (`{STOCKLINK_API_URL}/products` etc.).
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
/// Streaming transport base URL.
pub const DEFAULT_STREAM_URL: &str = "ws://localhost:50051";

pub const API_URL_VAR: &str = "STOCKLINK_API_URL";
pub const STREAM_URL_VAR: &str = "STOCKLINK_STREAM_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub stream_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: var_or_default(API_URL_VAR, DEFAULT_API_URL),
            stream_url: var_or_default(STREAM_URL_VAR, DEFAULT_STREAM_URL),
        }
    }
}

fn var_or_default(var: &str, fallback: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::warn!("{} is not set, using default: {}", var, fallback);
            fallback.to_string()
        }
    }
}

/// Process-wide configuration, resolved once on first use. Clients that need
/// a different endpoint (tests, multi-backend tools) take explicit base URLs
/// instead of reading this.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
