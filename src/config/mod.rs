mod types;

pub use types::*;

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "IDEA_FORGE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "idea-forge.yaml";

/// Loads configuration from `path`, or from the default file.
///
/// An explicit path has to exist. The default file is optional and the
/// built-in defaults apply when it is missing.
pub async fn load(path: Option<&Path>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    debug!("Loading configuration from: {}", config_path.display());

    let config_str = match tokio::fs::read_to_string(&config_path).await {
        Ok(contents) => contents,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = parse(&config_str)?;
    Ok(config)
}

pub fn parse(contents: &str) -> Result<Config> {
    // An empty file deserializes to unit, not to an empty mapping
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.backend.endpoint).map_err(|e| {
            Error::config(format!(
                "Invalid backend endpoint '{}': {}",
                self.backend.endpoint, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Backend endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}
