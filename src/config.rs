use config::{Config, Environment, File, Value, ValueKind};
use serde::Deserialize;

use crate::error::{ConfigError, Result as AppResult};

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://opentdb.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the trivia-question API; `/api.php` is appended.
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

pub fn load_settings() -> AppResult<AppSettings> {
    let mut builder = Config::builder()
        .add_source(
            Environment::with_prefix("TRIVIAD")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        )
        .add_source(File::with_name("config").required(false));

    builder = builder
        .set_default("server.port", Value::new(None, ValueKind::U64(8080)))
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .set_default(
            "server.cors_origins",
            Value::new(None, ValueKind::Array(Vec::new())),
        )
        .map_err(|e| ConfigError::Load(e.to_string()))?
        .set_default(
            "upstream.base_url",
            Value::new(None, ValueKind::String(DEFAULT_UPSTREAM_BASE_URL.to_string())),
        )
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let settings = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()).into())
}
