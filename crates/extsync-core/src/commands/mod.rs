//! High-level commands for extsync operations.
//!
//! Frontends build a command from the loaded configuration and execute it.

pub mod sync;

pub use sync::SyncCommand;
