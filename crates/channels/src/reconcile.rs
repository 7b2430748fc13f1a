//! Aligns a destination's channel set with the organization's
//! repositories.

use std::{collections::HashSet, sync::Arc};

use tracing::{info, warn};

use forgecord_hosting::RepoSource;

use crate::{
    error::Result,
    outbound::{ChatOutbound, Destination},
    panel::ActionPanel,
    registry::MembershipRegistry,
};

/// Outcome of one per-destination reconciliation pass.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Repositories whose channel was created this pass.
    pub created: Vec<String>,
    /// Repositories whose channel creation (or announcement) failed.
    pub failed: Vec<String>,
}

pub struct ChannelReconciler {
    source: Arc<dyn RepoSource>,
    org: String,
}

impl ChannelReconciler {
    pub fn new(source: Arc<dyn RepoSource>, org: impl Into<String>) -> Self {
        Self {
            source,
            org: org.into(),
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    /// Reconcile every destination in the registry snapshot. Failed
    /// passes are logged and do not stop the remaining destinations.
    pub async fn reconcile_all(&self, outbound: &dyn ChatOutbound, registry: &MembershipRegistry) {
        for destination in registry.snapshot() {
            match self.reconcile(outbound, &destination).await {
                Ok(report) if report.created.is_empty() => {},
                Ok(report) => {
                    info!(
                        destination = %destination.id,
                        created = report.created.len(),
                        failed = report.failed.len(),
                        "reconciled channels"
                    );
                },
                Err(e) => {
                    warn!(
                        destination = %destination.id,
                        error = %e,
                        "reconciliation pass aborted"
                    );
                },
            }
        }
    }

    /// Reconcile one destination.
    ///
    /// The repository list is fetched fresh for this pass; if that fetch
    /// (or the channel listing) fails, the pass aborts with state
    /// untouched. A failure while provisioning a single repository is
    /// isolated: it is recorded and the remaining repositories still get
    /// their channels.
    pub async fn reconcile(
        &self,
        outbound: &dyn ChatOutbound,
        destination: &Destination,
    ) -> Result<ReconcileReport> {
        let repos = self.source.list_repositories(&self.org).await?;
        let existing: HashSet<String> = outbound
            .channel_names(destination.id)
            .await?
            .into_iter()
            .collect();

        let mut report = ReconcileReport::default();
        for repo in repos {
            // A same-named channel counts as "already exists" even when it
            // was not created by us.
            if existing.contains(&repo.name) {
                continue;
            }
            match self.provision(outbound, destination, &repo.name).await {
                Ok(()) => report.created.push(repo.name),
                Err(e) => {
                    warn!(
                        destination = %destination.id,
                        repo = %repo.name,
                        error = %e,
                        "failed to provision channel"
                    );
                    report.failed.push(repo.name);
                },
            }
        }
        Ok(report)
    }

    /// Create the channel, announce it, attach the action panel.
    async fn provision(
        &self,
        outbound: &dyn ChatOutbound,
        destination: &Destination,
        repo: &str,
    ) -> Result<()> {
        let channel = outbound.create_channel(destination.id, repo).await?;
        outbound.send_text(channel, &intro_text(repo)).await?;
        let panel = ActionPanel::new(repo);
        outbound.send_panel(channel, &panel.prompt(), &panel).await?;
        Ok(())
    }
}

/// Announcement posted into a freshly created channel.
pub fn intro_text(repo: &str) -> String {
    format!("Channel created for repository `{repo}`.")
}
