//! Trait seam to the chat platform.
//!
//! The engine never talks to Discord directly; everything it needs from
//! the platform (channel listing, creation, sends) goes through
//! [`ChatOutbound`]. The discord crate provides the production
//! implementation, tests provide recording mocks.

use async_trait::async_trait;

use crate::{error::Result, panel::ActionPanel};

/// Identifier of a connected community/server (a Discord guild).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DestinationId(pub u64);

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a channel within a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A destination the engine currently serves.
///
/// The engine holds a reference to the platform's guild, never its
/// lifecycle: channel membership is re-read through [`ChatOutbound`] on
/// every pass rather than cached here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
}

/// Outbound chat-platform calls the engine depends on.
#[async_trait]
pub trait ChatOutbound: Send + Sync {
    /// Names of all text channels in the destination.
    async fn channel_names(&self, dest: DestinationId) -> Result<Vec<String>>;

    /// Create a text channel with the given name.
    async fn create_channel(&self, dest: DestinationId, name: &str) -> Result<ChannelId>;

    /// Send a plain text message.
    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()>;

    /// Send a message with the panel's action buttons attached.
    async fn send_panel(&self, channel: ChannelId, text: &str, panel: &ActionPanel) -> Result<()>;

    /// Look up a text channel by exact name.
    async fn find_channel(&self, dest: DestinationId, name: &str) -> Result<Option<ChannelId>>;
}
