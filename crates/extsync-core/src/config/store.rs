//! Config store for loading extsync.toml.

use std::path::{Path, PathBuf};

use super::{AgentConfig, parser, paths::resolve_config_path};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Resolve the config location (see [`resolve_config_path`]).
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::from_path(resolve_config_path(explicit))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate the configuration. A missing file is an error.
    pub fn load(&self) -> Result<AgentConfig> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                self.config_path.display()
            )));
        }
        tracing::debug!(path = %self.config_path.display(), "Loading configuration");
        parser::parse_config(&self.config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_config_error() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let store = ConfigStore::from_path(tmp.path().join("missing.toml"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_existing_file() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let path = tmp.path().join("extsync.toml");
        std::fs::write(
            &path,
            "[phonism]\nendpoint = \"https://api.example.com/\"\napi_key = \"k\"\n",
        )
        .expect("write should succeed");

        let config = ConfigStore::from_path(path).load().unwrap();
        assert_eq!(config.api_key().unwrap(), "k");
    }

    #[test]
    fn test_missing_required_value_names_file() {
        let tmp = TempDir::new().expect("tempdir should succeed");
        let path = tmp.path().join("extsync.toml");
        std::fs::write(&path, "[phonism]\napi_key = \"k\"\n").expect("write should succeed");

        let err = ConfigStore::from_path(path).load().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("extsync.toml"));
        assert!(message.contains("phonism.endpoint"));
    }
}
