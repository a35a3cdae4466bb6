mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, warn};

/// Environment variables consulted for the provider credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "LLM_API_KEY"];

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from(&config_path).await?;
    config.apply_overrides(|name| env::var(name).ok());
    config.validate()?;

    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => Config::from_yaml(&config_str),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Configuration file {} not found, using defaults",
                config_path
            );
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Applies environment overrides for the credential and listen port.
    /// A non-blank environment credential replaces the one from the file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.llm.api_key = key;
        }

        if let Some(port) = lookup("PORT").and_then(|value| value.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "API key not found: set llm.api_key or one of {}",
                API_KEY_VARS.join(", ")
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(Error::config("server.max_upload_bytes must be positive"));
        }

        Ok(())
    }
}
