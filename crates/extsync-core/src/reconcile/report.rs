//! Outcome of a reconciliation run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::RemoteId;

/// Terminal remote call issued for one local record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Matched a listed remote extension, which was updated.
    Updated { remote_id: RemoteId },
    /// Never matched on any page, so it was created.
    Created { remote_id: RemoteId },
}

impl MatchOutcome {
    pub fn remote_id(&self) -> &RemoteId {
        match self {
            MatchOutcome::Updated { remote_id } | MatchOutcome::Created { remote_id } => remote_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionOutcome {
    pub identifier: String,
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub tenant_id: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Non-empty listing pages processed
    pub pages: usize,
    /// One entry per local identifier, in first-seen order
    pub outcomes: Vec<ExtensionOutcome>,
    /// Remote extensions removed because no local record matched
    pub deleted: Vec<RemoteId>,
    /// Remote entries that matched an already reconciled identifier
    pub duplicate_matches: usize,
}

impl ReconcileReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, MatchOutcome::Created { .. }))
            .count()
    }

    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, MatchOutcome::Updated { .. }))
            .count()
    }

    pub fn deleted(&self) -> usize {
        self.deleted.len()
    }

    pub fn outcome_for(&self, identifier: &str) -> Option<&MatchOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.identifier == identifier)
            .map(|o| &o.outcome)
    }
}
