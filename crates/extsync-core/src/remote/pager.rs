//! Offset pagination over the remote extension listing.
//!
//! The cursor is a position offset (`start_after`). Records deleted while a
//! page is processed shift every later record down, so after a page of `N`
//! records with `D` deletions the offset moves by `N - D`. Only an empty page
//! ends the listing.

use super::RemoteClient;
use crate::error::{Error, Result};
use crate::types::ReconciliationPage;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default ceiling on non-empty pages in a single run.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Lazy, finite, non-restartable sequence of listing pages.
///
/// Call [`RemotePager::advance`] after processing each page returned by
/// [`RemotePager::next_page`].
pub struct RemotePager<'a> {
    client: &'a dyn RemoteClient,
    tenant_id: i64,
    page_size: usize,
    max_pages: usize,
    offset: usize,
    pages: usize,
    exhausted: bool,
}

impl<'a> RemotePager<'a> {
    pub fn new(
        client: &'a dyn RemoteClient,
        tenant_id: i64,
        page_size: usize,
        max_pages: usize,
    ) -> Self {
        Self {
            client,
            tenant_id,
            page_size: page_size.max(1),
            max_pages,
            offset: 0,
            pages: 0,
            exhausted: false,
        }
    }

    /// Fetch the page at the current offset.
    ///
    /// Returns `None` once the remote answers with an empty page; later calls
    /// return `None` without another request.
    pub fn next_page(&mut self) -> Result<Option<ReconciliationPage>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .client
            .list_extensions(self.tenant_id, self.offset, self.page_size)?;
        tracing::debug!(
            offset = self.offset,
            records = page.len(),
            "Fetched extension page"
        );

        if page.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        if self.pages >= self.max_pages {
            return Err(Error::PageLimitExceeded(self.max_pages));
        }
        self.pages += 1;

        Ok(Some(page))
    }

    /// Move the cursor past a processed page of `fetched` records of which
    /// `deleted` were removed remotely.
    pub fn advance(&mut self, fetched: usize, deleted: usize) {
        let kept = fetched.saturating_sub(deleted);
        self.offset += kept;
        tracing::trace!(offset = self.offset, kept, deleted, "Advanced listing cursor");
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of non-empty pages handed out so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
