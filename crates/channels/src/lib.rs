//! Channel-reconciliation and event-relay engine.
//!
//! Keeps each tracked destination's channel set aligned with the
//! organization's repositories, serves the per-repository query actions,
//! and routes inbound push events to the matching channel. The chat
//! platform sits behind the [`ChatOutbound`] trait; the hosting platform
//! behind `forgecord_hosting::RepoSource`.

pub mod error;
pub mod outbound;
pub mod panel;
pub mod reconcile;
pub mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod testutil;

pub use {
    error::{Error, Result},
    outbound::{ChannelId, ChatOutbound, Destination, DestinationId},
    panel::{ActionPanel, PanelButton, RepoAction, run_action},
    reconcile::{ChannelReconciler, ReconcileReport},
    registry::MembershipRegistry,
    router::{PushEvent, PushRouter},
};
