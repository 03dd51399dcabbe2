//! extsync Core Library
//!
//! Reconciles the extensions registered in a local FreeSWITCH instance with
//! the extensions of a tenant in the Phonism API.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod group;
pub mod local;
pub mod reconcile;
pub mod remote;
pub mod types;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{AgentConfig, ConfigStore};
    pub use crate::context::RunContext;

    // Local registry
    pub use crate::group::group_records;
    pub use crate::local::{FsCli, LocalRegistrySource, RegistryTool, parse_user_table};

    // Remote API
    pub use crate::remote::{HttpRemoteClient, RemoteClient, RemotePager};

    // Reconciliation
    pub use crate::commands::SyncCommand;
    pub use crate::reconcile::{MatchOutcome, ReconcileReport, Reconciler};

    // Records
    pub use crate::types::{
        AttrValue, Attributes, ExtensionRecord, ReconciliationPage, RemoteExtension, RemoteId,
        TenantIdentity,
    };

    pub use crate::error::{Error, Result};
}
