//! Error kinds surfaced by a reconciliation run.
//!
//! None of these are recovered inside the library. They propagate to the
//! binary, which logs them and exits non-zero.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file missing, unreadable, or lacking a required value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file exists but is not valid TOML for the schema.
    #[error("Failed to parse config file {path}:\n{message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The `integrations/mine` response had no usable tenant identity.
    #[error("Bootstrap failed: {0}. Please contact Phonism support for assistance.")]
    Bootstrap(String),

    /// The remote API answered with a non-success status.
    #[error("HTTP {verb} {url} failed with status {status}: {body}")]
    Transport {
        verb: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect, TLS, I/O).
    #[error("HTTP {verb} {url} could not be sent")]
    Http {
        verb: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote API answered with a body we could not decode.
    #[error("Could not decode response of HTTP {verb} {url}: {message}")]
    Decode {
        verb: &'static str,
        url: String,
        message: String,
    },

    /// The local registry produced malformed output or the tool failed.
    #[error("Local registry error: {0}")]
    LocalSource(String),

    /// The remote listing kept returning non-empty pages.
    #[error("Remote listing did not terminate after {0} pages")]
    PageLimitExceeded(usize),
}

impl Error {
    /// Short, stable name of the error kind for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::ConfigParse { .. } => "config",
            Error::Bootstrap(_) => "bootstrap",
            Error::Transport { .. } | Error::Http { .. } | Error::Decode { .. } => "transport",
            Error::LocalSource(_) => "local_source",
            Error::PageLimitExceeded(_) => "pagination",
        }
    }
}
