//! Configuration schema for extsync.toml
//!
//! ```toml
//! [phonism]
//! endpoint = "https://api.example.com/v1/"
//! api_key = "..."
//! page_size = 100
//! max_pages = 10000
//!
//! [freeswitch]
//! fs_cli = "/usr/local/freeswitch/bin/fs_cli"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::local::fs_cli::DEFAULT_FS_CLI;

/// Root configuration structure for extsync.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Remote API settings
    #[serde(default)]
    pub phonism: PhonismConfig,

    /// Local registry tool settings
    #[serde(default)]
    pub freeswitch: FreeswitchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhonismConfig {
    /// API base endpoint (required)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key sent as `X-API-KEY` (required)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Records requested per listing page
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Ceiling on listing pages per run
    #[serde(default)]
    pub max_pages: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FreeswitchConfig {
    /// Path to the fs_cli binary
    #[serde(default)]
    pub fs_cli: Option<PathBuf>,
}

impl AgentConfig {
    /// Check required values and ranges.
    pub fn validate(&self) -> Result<()> {
        self.endpoint()?;
        self.api_key()?;

        if self.phonism.page_size == Some(0) {
            return Err(Error::Config(
                "phonism.page_size must be at least 1".to_string(),
            ));
        }
        if self.phonism.max_pages == Some(0) {
            return Err(Error::Config(
                "phonism.max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed API base endpoint.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = required(&self.phonism.endpoint, "phonism.endpoint")?;
        let url = Url::parse(raw)
            .map_err(|e| Error::Config(format!("phonism.endpoint '{}' is not a URL: {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "phonism.endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }

    pub fn api_key(&self) -> Result<&str> {
        required(&self.phonism.api_key, "phonism.api_key")
    }

    /// fs_cli binary, defaulting to `fs_cli` on `PATH`.
    pub fn fs_cli(&self) -> PathBuf {
        self.freeswitch
            .fs_cli
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FS_CLI))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Config(format!("missing required value '{}'", name))),
    }
}
