mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration from `CONFIG_PATH` (or `config.yaml`), then applies
/// the `IRIS_API_URL` override.
///
/// A missing `config.yaml` falls back to built-in defaults; a missing file
/// named explicitly through `CONFIG_PATH` is an error.
pub async fn load() -> Result<Config> {
    let config = match env::var("CONFIG_PATH") {
        Ok(path) => load_from(&path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(DEFAULT_CONFIG_PATH).await?,
        Err(_) => {
            debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Config::default()
        }
    };

    let config = config.with_base_url_override(env::var("IRIS_API_URL").ok());
    config.validate()?;

    Ok(config)
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            debug!("Overriding service base URL with {}", url);
            self.service.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.service.base_url).map_err(|e| {
            Error::config(format!(
                "Invalid service base_url '{}': {}",
                self.service.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Service base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.health.interval_secs == 0 {
            return Err(Error::config("health.interval_secs must be greater than 0"));
        }
        if self.health.timeout_secs == 0 {
            return Err(Error::config("health.timeout_secs must be greater than 0"));
        }
        if self.service.request_timeout_secs == Some(0) {
            return Err(Error::config(
                "service.request_timeout_secs must be greater than 0 when set",
            ));
        }

        Ok(())
    }
}
