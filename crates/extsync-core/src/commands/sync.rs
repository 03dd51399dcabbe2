//! Sync command implementation.
//!
//! Bootstraps the tenant identity, reads the local registry and runs the
//! reconciler against the remote API.

use crate::config::AgentConfig;
use crate::context::RunContext;
use crate::error::Result;
use crate::local::{FsCli, LocalRegistrySource, RegistryTool};
use crate::reconcile::{ReconcileReport, Reconciler};
use crate::remote::{HttpRemoteClient, RemoteClient};

/// One full reconciliation run.
#[derive(Debug, Clone)]
pub struct SyncCommand {
    config: AgentConfig,
}

impl SyncCommand {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    /// Run against the configured HTTP API and the `fs_cli` registry tool.
    pub fn execute(&self) -> Result<ReconcileReport> {
        let client = HttpRemoteClient::new(self.config.endpoint()?, self.config.api_key()?)?;
        let tool = FsCli::new(self.config.fs_cli());
        self.execute_with(&client, &tool)
    }

    /// Run against explicit collaborators.
    pub fn execute_with(
        &self,
        client: &dyn RemoteClient,
        tool: &dyn RegistryTool,
    ) -> Result<ReconcileReport> {
        let identity = client.integration()?;
        tracing::debug!(
            tenant_id = identity.tenant_id,
            company_id = identity.company_id,
            "Resolved tenant identity"
        );

        let ctx = RunContext::from_config(&self.config, self.config.endpoint()?, identity);

        let records = LocalRegistrySource::new(tool).load()?;
        for record in &records {
            tracing::debug!(?record, "Local registry user");
        }

        let report = Reconciler::new(&ctx, client).run(records)?;
        tracing::info!(
            created = report.created(),
            updated = report.updated(),
            deleted = report.deleted(),
            pages = report.pages,
            "Reconciliation finished"
        );
        Ok(report)
    }
}
