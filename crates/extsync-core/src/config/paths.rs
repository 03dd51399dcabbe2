//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// System-wide config location used by packaged installs.
pub const DEFAULT_CONFIG_PATH: &str = "/opt/phonism/extsync.toml";

/// Environment variable overriding the config location.
pub const CONFIG_ENV_VAR: &str = "EXTSYNC_CONFIG";

/// Pick the config file to load.
///
/// Order: explicit path, `EXTSYNC_CONFIG`, the system-wide path, then the
/// user config directory. When nothing exists the system-wide path is returned
/// so the error names it.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let user = dirs::config_dir().map(|p| p.join("extsync").join("extsync.toml"));
    select_config_path(explicit, from_env, user)
}

fn select_config_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    user: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }

    let system = PathBuf::from(DEFAULT_CONFIG_PATH);
    if system.exists() {
        return system;
    }
    match user {
        Some(path) if path.exists() => path,
        _ => system,
    }
}
