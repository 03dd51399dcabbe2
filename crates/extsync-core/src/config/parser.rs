//! TOML parser with helpful error messages

use std::path::Path;

use super::schema::AgentConfig;
use crate::error::{Error, Result};

/// Parse extsync.toml with detailed error messages
pub fn parse_config(path: &Path) -> Result<AgentConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("failed to read config file {}: {}", path.display(), e))
    })?;

    parse_config_str(&content).map_err(|e| match e {
        Error::ConfigParse { message, .. } => Error::ConfigParse {
            path: path.to_path_buf(),
            message,
        },
        Error::Config(message) => Error::Config(format!("{}: {}", path.display(), message)),
        other => other,
    })
}

/// Parse extsync.toml content from string
pub fn parse_config_str(content: &str) -> Result<AgentConfig> {
    let config: AgentConfig = toml::from_str(content).map_err(|e| Error::ConfigParse {
        path: Default::default(),
        message: enhance_toml_error(&e, content),
    })?;

    config.validate()?;

    Ok(config)
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: &toml::de::Error, content: &str) -> String {
    let message = error.message().to_string();

    let Some(span) = error.span() else {
        return message;
    };

    let line_num = content[..span.start.min(content.len())].matches('\n').count() + 1;
    format!(
        "TOML parsing error at line {}:\n{}\n\nError: {}",
        line_num,
        get_line_context(content, line_num),
        message
    )
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
