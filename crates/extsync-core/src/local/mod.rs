//! Local PBX user registry.
//!
//! The registry tool is injected through [`RegistryTool`] so tests can hand in
//! canned output instead of spawning `fs_cli`.

pub mod fs_cli;
pub mod parser;

pub use fs_cli::FsCli;
pub use parser::parse_user_table;

use crate::error::Result;
use crate::types::{AttrValue, ExtensionRecord};

/// Raw access to the local registry.
pub trait RegistryTool {
    /// Full user table as pipe-delimited text.
    fn list_users(&self) -> Result<String>;

    /// Password of `identifier@domain`. Empty output means no password.
    fn lookup_secret(&self, identifier: &str, domain: &str) -> Result<String>;
}

/// Reads extension records (with credentials) from a [`RegistryTool`].
pub struct LocalRegistrySource<'a> {
    tool: &'a dyn RegistryTool,
}

impl<'a> LocalRegistrySource<'a> {
    pub fn new(tool: &'a dyn RegistryTool) -> Self {
        Self { tool }
    }

    /// Parse the user table and resolve each record's secret.
    pub fn load(&self) -> Result<Vec<ExtensionRecord>> {
        let raw = self.tool.list_users()?;
        let mut records = parse_user_table(&raw)?;
        tracing::debug!(count = records.len(), "Parsed local registry users");

        for record in &mut records {
            let output = self
                .tool
                .lookup_secret(&record.identifier, record.primary_domain())?;
            let secret = output.trim();
            if secret.is_empty() {
                tracing::debug!(user = %record.identifier, "No password set for user");
                continue;
            }
            record.secret = Some(AttrValue::from(secret));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::Error;

    struct FakeTool {
        table: String,
        secrets: HashMap<String, String>,
    }

    impl RegistryTool for FakeTool {
        fn list_users(&self) -> Result<String> {
            Ok(self.table.clone())
        }

        fn lookup_secret(&self, identifier: &str, domain: &str) -> Result<String> {
            let key = format!("{}@{}", identifier, domain);
            match self.secrets.get(&key) {
                Some(secret) => Ok(secret.clone()),
                None if key.starts_with("fail") => {
                    Err(Error::LocalSource(format!("lookup failed for {}", key)))
                }
                None => Ok(String::new()),
            }
        }
    }

    #[test]
    fn test_load_attaches_trimmed_secret() {
        let tool = FakeTool {
            table: "userid|domain\n100|a\n101|a\n+OK\n".to_string(),
            secrets: HashMap::from([("100@a".to_string(), "s1\n".to_string())]),
        };

        let records = LocalRegistrySource::new(&tool).load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].primary_secret(), Some("s1"));
        assert_eq!(records[1].secret, None);
    }

    #[test]
    fn test_load_whitespace_only_secret_is_unset() {
        let tool = FakeTool {
            table: "userid|domain\n100|a\n".to_string(),
            secrets: HashMap::from([("100@a".to_string(), "  \n".to_string())]),
        };

        let records = LocalRegistrySource::new(&tool).load().unwrap();
        assert_eq!(records[0].secret, None);
    }

    #[test]
    fn test_load_propagates_lookup_failure() {
        let tool = FakeTool {
            table: "userid|domain\nfail|a\n".to_string(),
            secrets: HashMap::new(),
        };

        let result = LocalRegistrySource::new(&tool).load();
        assert!(matches!(result, Err(Error::LocalSource(_))));
    }
}
