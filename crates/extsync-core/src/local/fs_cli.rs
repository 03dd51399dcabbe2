//! [`RegistryTool`] backed by the FreeSWITCH `fs_cli` binary.

use std::path::PathBuf;
use std::process::Command;

use super::RegistryTool;
use crate::error::{Error, Result};

/// Default binary name, resolved through `PATH`.
pub const DEFAULT_FS_CLI: &str = "fs_cli";

/// Runs `fs_cli -x <api command>` and returns its stdout.
#[derive(Debug, Clone)]
pub struct FsCli {
    binary: PathBuf,
}

impl FsCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn execute(&self, api_command: &str) -> Result<String> {
        let command_line = format!("{} -x \"{}\"", self.binary.display(), api_command);
        tracing::trace!(command = %command_line, "Running registry command");

        let output = Command::new(&self.binary)
            .args(["-x", api_command])
            .output()
            .map_err(|e| Error::LocalSource(format!("failed to run {}: {}", command_line, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::LocalSource(format!(
                "{} exit status: {} ({})",
                command_line,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| Error::LocalSource(format!("{} printed non UTF-8 output", command_line)))
    }
}

impl Default for FsCli {
    fn default() -> Self {
        Self::new(DEFAULT_FS_CLI)
    }
}

impl RegistryTool for FsCli {
    fn list_users(&self) -> Result<String> {
        self.execute("list_users")
    }

    fn lookup_secret(&self, identifier: &str, domain: &str) -> Result<String> {
        self.execute(&format!("user_data {}@{} param password", identifier, domain))
    }
}
