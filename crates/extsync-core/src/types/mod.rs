//! Shared record types used by the local source, the grouper and the reconciler.

pub mod attributes;
pub mod record;
pub mod remote;

pub use attributes::{AttrValue, Attributes};
pub use record::ExtensionRecord;
pub use remote::{ReconciliationPage, RemoteExtension, RemoteId, TenantIdentity};
