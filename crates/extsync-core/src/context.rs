//! Run context shared by the components of one reconciliation run.

use url::Url;

use crate::config::AgentConfig;
use crate::remote::pager::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::types::TenantIdentity;

/// Immutable per-run settings.
///
/// Built once after the tenant identity is known, then borrowed by the
/// pager and the reconciler.
#[derive(Debug, Clone)]
pub struct RunContext {
    endpoint: Url,
    identity: TenantIdentity,
    page_size: usize,
    max_pages: usize,
}

impl RunContext {
    /// Create a context with explicit pagination settings.
    pub fn new(endpoint: Url, identity: TenantIdentity, page_size: usize, max_pages: usize) -> Self {
        Self {
            endpoint,
            identity,
            page_size,
            max_pages,
        }
    }

    /// Create a context from the loaded configuration.
    pub fn from_config(config: &AgentConfig, endpoint: Url, identity: TenantIdentity) -> Self {
        Self::new(
            endpoint,
            identity,
            config.phonism.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            config.phonism.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn identity(&self) -> TenantIdentity {
        self.identity
    }

    pub fn tenant_id(&self) -> i64 {
        self.identity.tenant_id
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}
