//! Routes inbound push events to the matching channel of every tracked
//! destination.

use {serde::Deserialize, tracing::{debug, warn}};

use crate::outbound::{ChatOutbound, Destination};

/// Inbound push-event payload, as delivered by the hosting platform's
/// webhook. Transient: parsed, routed once, dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEvent {
    /// Event kind; transports may also carry this out-of-band in a
    /// header. Only `push` reaches the router.
    #[serde(default)]
    pub event: String,
    pub repository: RepositoryRef,
    pub pusher: Pusher,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pusher {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    pub message: String,
}

impl PushEvent {
    /// Branch name: the final path segment of the ref
    /// (`refs/heads/main` → `main`).
    pub fn branch(&self) -> &str {
        self.git_ref.rsplit('/').next().unwrap_or(&self.git_ref)
    }
}

/// Relays push events on the configured branch to the channel named
/// after the repository, in every tracked destination.
pub struct PushRouter {
    branch: String,
}

impl Default for PushRouter {
    fn default() -> Self {
        Self::new("main")
    }
}

impl PushRouter {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
        }
    }

    /// Route one event. Returns the number of notifications delivered.
    ///
    /// Pushes to other branches and destinations without a matching
    /// channel are silent no-ops by design. A failed send is logged and
    /// skipped; it never aborts delivery to the remaining destinations.
    pub async fn route(
        &self,
        event: &PushEvent,
        outbound: &dyn ChatOutbound,
        destinations: &[Destination],
    ) -> usize {
        let branch = event.branch();
        if branch != self.branch {
            debug!(
                branch,
                repo = %event.repository.name,
                "ignoring push outside the notify branch"
            );
            return 0;
        }

        let text = notification_text(event);
        let mut delivered = 0;
        for destination in destinations {
            match outbound
                .find_channel(destination.id, &event.repository.name)
                .await
            {
                Ok(Some(channel)) => match outbound.send_text(channel, &text).await {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        warn!(
                            destination = %destination.id,
                            channel = %channel,
                            error = %e,
                            "failed to deliver push notification"
                        );
                    },
                },
                // No channel for this repository here; not a failure.
                Ok(None) => {},
                Err(e) => {
                    warn!(
                        destination = %destination.id,
                        error = %e,
                        "channel lookup failed while routing push"
                    );
                },
            }
        }
        delivered
    }
}

fn notification_text(event: &PushEvent) -> String {
    let message = event
        .head_commit
        .as_ref()
        .map(|c| c.message.as_str())
        .unwrap_or("(no commit message)");
    format!(
        "**Push to `{}` in `{}`**\nPusher: {}\nMessage: {}",
        event.branch(),
        event.repository.name,
        event.pusher.name,
        message
    )
}
