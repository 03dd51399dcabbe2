//! Converge the remote extension set onto the local one.
//!
//! The local set is canonicalised once. Each remote page is then walked in
//! order: a remote extension whose number matches a local identifier is
//! updated, anything else is deleted. Local records that never matched are
//! created once every page has been seen. The first failed call ends the run.

mod report;


pub use report::{ExtensionOutcome, MatchOutcome, ReconcileReport};

use std::collections::HashMap;

use chrono::Utc;

use crate::context::RunContext;
use crate::error::Result;
use crate::group::group_records;
use crate::remote::{RemoteClient, RemotePager};
use crate::types::{ExtensionRecord, ReconciliationPage, RemoteId};

/// Step of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetching,
    Reconciling { page: usize },
    Advancing,
    Finalizing,
    Done,
}

pub struct Reconciler<'a> {
    ctx: &'a RunContext,
    client: &'a dyn RemoteClient,
}

/// Mutable bookkeeping of one run.
struct RunState {
    outcomes: Vec<Option<MatchOutcome>>,
    deleted: Vec<RemoteId>,
    duplicate_matches: usize,
    phase: Phase,
}

impl RunState {
    fn enter(&mut self, phase: Phase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "Reconciler phase");
        self.phase = phase;
    }
}

impl<'a> Reconciler<'a> {
    pub fn new(ctx: &'a RunContext, client: &'a dyn RemoteClient) -> Self {
        Self { ctx, client }
    }

    /// Run a full reconciliation of `local` against the tenant's extensions.
    ///
    /// `local` may contain repeated identifiers; they are grouped first.
    pub fn run(&self, local: Vec<ExtensionRecord>) -> Result<ReconcileReport> {
        let started_at = Utc::now();
        let canonical = group_records(local);
        let index: HashMap<&str, usize> = canonical
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.identifier.as_str(), pos))
            .collect();

        tracing::debug!(
            endpoint = %self.ctx.endpoint(),
            tenant_id = self.ctx.tenant_id(),
            company_id = self.ctx.identity().company_id,
            local = canonical.len(),
            "Starting reconciliation"
        );

        let mut state = RunState {
            outcomes: vec![None; canonical.len()],
            deleted: Vec::new(),
            duplicate_matches: 0,
            phase: Phase::Fetching,
        };

        let mut pager = RemotePager::new(
            self.client,
            self.ctx.tenant_id(),
            self.ctx.page_size(),
            self.ctx.max_pages(),
        );

        while let Some(page) = pager.next_page()? {
            state.enter(Phase::Reconciling {
                page: pager.pages(),
            });
            let deletions = self.reconcile_page(&page, &canonical, &index, &mut state)?;

            state.enter(Phase::Advancing);
            pager.advance(page.len(), deletions);
            state.enter(Phase::Fetching);
        }
        drop(index);

        state.enter(Phase::Finalizing);
        for (pos, record) in canonical.iter().enumerate() {
            if state.outcomes[pos].is_some() {
                continue;
            }
            let created = self.client.create_extension(
                self.ctx.tenant_id(),
                &record.identifier,
                record.primary_secret(),
            )?;
            tracing::info!("Created extension \"{}\"", record.identifier);
            state.outcomes[pos] = Some(MatchOutcome::Created {
                remote_id: created.id,
            });
        }
        state.enter(Phase::Done);

        let outcomes = canonical
            .into_iter()
            .zip(state.outcomes)
            .filter_map(|(record, outcome)| {
                outcome.map(|outcome| ExtensionOutcome {
                    identifier: record.identifier,
                    outcome,
                })
            })
            .collect();

        Ok(ReconcileReport {
            tenant_id: self.ctx.tenant_id(),
            started_at,
            finished_at: Utc::now(),
            pages: pager.pages(),
            outcomes,
            deleted: state.deleted,
            duplicate_matches: state.duplicate_matches,
        })
    }

    /// Update or delete every extension on `page`. Returns the deletion count.
    fn reconcile_page(
        &self,
        page: &ReconciliationPage,
        canonical: &[ExtensionRecord],
        index: &HashMap<&str, usize>,
        state: &mut RunState,
    ) -> Result<usize> {
        let mut deletions = 0;

        for remote in &page.extensions {
            let Some(&pos) = index.get(remote.extension.as_str()) else {
                self.client.delete_extension(&remote.id)?;
                tracing::info!("Deleted extension id #{}", remote.id);
                state.deleted.push(remote.id.clone());
                deletions += 1;
                continue;
            };

            let record = &canonical[pos];
            self.client.update_extension(
                &remote.id,
                self.ctx.tenant_id(),
                &record.identifier,
                record.primary_secret(),
            )?;
            tracing::info!("Updated extension \"{}\"", record.identifier);

            if state.outcomes[pos].is_some() {
                tracing::warn!(
                    extension = %record.identifier,
                    remote_id = %remote.id,
                    "Extension listed more than once remotely"
                );
                state.duplicate_matches += 1;
            }
            state.outcomes[pos] = Some(MatchOutcome::Updated {
                remote_id: remote.id.clone(),
            });
        }

        Ok(deletions)
    }
}
