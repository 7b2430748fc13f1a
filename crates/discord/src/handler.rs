//! Discord event handler for serenity.
//!
//! Bridges gateway events into the engine: guild membership into the
//! registry, guild arrival into a reconciliation pass, button presses
//! into panel actions.

use std::sync::Arc;

use {
    serenity::{
        all::{
            Context, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
            Guild, Interaction, Ready, UnavailableGuild,
        },
        async_trait,
    },
    tracing::{debug, info, warn},
};

use {
    forgecord_channels::{
        ChannelReconciler, Destination, DestinationId, MembershipRegistry, RepoAction, run_action,
    },
    forgecord_hosting::RepoSource,
};

use crate::outbound::DiscordOutbound;

/// Handler wiring Discord gateway events to the engine.
pub struct BridgeHandler {
    registry: Arc<MembershipRegistry>,
    reconciler: Arc<ChannelReconciler>,
    source: Arc<dyn RepoSource>,
}

impl BridgeHandler {
    pub fn new(
        registry: Arc<MembershipRegistry>,
        reconciler: Arc<ChannelReconciler>,
        source: Arc<dyn RepoSource>,
    ) -> Self {
        Self {
            registry,
            reconciler,
            source,
        }
    }
}

#[async_trait]
impl EventHandler for BridgeHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        // Guild registration happens in guild_create, which the gateway
        // fires once per guild right after ready.
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        let destination = Destination {
            id: DestinationId(guild.id.get()),
            name: guild.name.clone(),
        };
        self.registry.add(destination.clone());
        info!(
            guild = %guild.id,
            name = %guild.name,
            joined = is_new.unwrap_or(false),
            tracked = self.registry.len(),
            "guild available"
        );

        let outbound = DiscordOutbound::new(ctx.http.clone());
        match self.reconciler.reconcile(&outbound, &destination).await {
            Ok(report) => {
                if !report.created.is_empty() || !report.failed.is_empty() {
                    info!(
                        guild = %guild.id,
                        created = report.created.len(),
                        failed = report.failed.len(),
                        "reconciled repository channels"
                    );
                }
            },
            Err(e) => {
                warn!(guild = %guild.id, error = %e, "reconciliation pass aborted");
            },
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        // Also fires when a guild merely goes unavailable; dropping it is
        // fine either way, guild_create re-registers it on return.
        self.registry.remove(DestinationId(incomplete.id.get()));
        info!(
            guild = %incomplete.id,
            tracked = self.registry.len(),
            "guild removed"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        let Some((action, repo)) = RepoAction::parse_component_id(&component.data.custom_id) else {
            debug!(custom_id = %component.data.custom_id, "ignoring foreign component");
            return;
        };

        debug!(?action, repo, "panel action triggered");
        let reply = run_action(action, repo, self.source.as_ref(), self.reconciler.org()).await;

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(reply),
        );
        if let Err(e) = component.create_response(&ctx.http, response).await {
            warn!(repo, error = %e, "failed to respond to panel action");
        }
    }
}
