//! Agent configuration (`extsync.toml`).
//!
//! Holds the API endpoint and key plus optional pagination and local tool
//! settings.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_config, parse_config_str};
pub use paths::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH, resolve_config_path};
pub use schema::{AgentConfig, FreeswitchConfig, PhonismConfig};
pub use store::ConfigStore;
