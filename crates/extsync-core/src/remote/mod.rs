//! Remote tenant-management API.
//!
//! [`RemoteClient`] is the seam between the reconciler and the HTTP transport.
//! Every call blocks until the API answers; a failed call is returned as an
//! error and never retried.

pub mod http;
pub mod pager;

pub use http::{ApiUrls, HttpRemoteClient};
pub use pager::RemotePager;

use crate::error::Result;
use crate::types::{ReconciliationPage, RemoteExtension, RemoteId, TenantIdentity};

pub trait RemoteClient {
    /// Tenant scope of the API key (`GET integrations/mine`).
    fn integration(&self) -> Result<TenantIdentity>;

    /// One page of the tenant's extensions, starting after `offset` records.
    fn list_extensions(
        &self,
        tenant_id: i64,
        offset: usize,
        limit: usize,
    ) -> Result<ReconciliationPage>;

    fn create_extension(
        &self,
        tenant_id: i64,
        extension: &str,
        secret: Option<&str>,
    ) -> Result<RemoteExtension>;

    fn update_extension(
        &self,
        id: &RemoteId,
        tenant_id: i64,
        extension: &str,
        secret: Option<&str>,
    ) -> Result<RemoteExtension>;

    fn delete_extension(&self, id: &RemoteId) -> Result<RemoteExtension>;
}
