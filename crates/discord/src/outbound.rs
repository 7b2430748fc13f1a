//! `ChatOutbound` implemented over serenity's HTTP client.

use std::sync::Arc;

use {
    async_trait::async_trait,
    serenity::all::{
        ButtonStyle, ChannelType, CreateActionRow, CreateButton, CreateChannel, CreateMessage,
        GuildChannel, GuildId, Http,
    },
};

use forgecord_channels::{
    ActionPanel, ChannelId, ChatOutbound, DestinationId,
    error::{Context as _, Result},
};

pub struct DiscordOutbound {
    http: Arc<Http>,
}

impl DiscordOutbound {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    async fn text_channels(&self, dest: DestinationId) -> Result<Vec<GuildChannel>> {
        let channels = GuildId::new(dest.0)
            .channels(&self.http)
            .await
            .with_context(|| format!("list channels of guild {dest}"))?;
        Ok(channels
            .into_values()
            .filter(|c| c.kind == ChannelType::Text)
            .collect())
    }
}

#[async_trait]
impl ChatOutbound for DiscordOutbound {
    async fn channel_names(&self, dest: DestinationId) -> Result<Vec<String>> {
        Ok(self
            .text_channels(dest)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    async fn create_channel(&self, dest: DestinationId, name: &str) -> Result<ChannelId> {
        let channel = GuildId::new(dest.0)
            .create_channel(
                &self.http,
                CreateChannel::new(name).kind(ChannelType::Text),
            )
            .await
            .with_context(|| format!("create channel `{name}` in guild {dest}"))?;
        Ok(ChannelId(channel.id.get()))
    }

    async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()> {
        serenity::all::ChannelId::new(channel.0)
            .say(&self.http, text)
            .await
            .with_context(|| format!("send message to channel {channel}"))?;
        Ok(())
    }

    async fn send_panel(&self, channel: ChannelId, text: &str, panel: &ActionPanel) -> Result<()> {
        let buttons: Vec<CreateButton> = panel
            .buttons()
            .into_iter()
            .map(|b| {
                CreateButton::new(b.custom_id)
                    .label(b.label)
                    .style(ButtonStyle::Secondary)
            })
            .collect();
        let message = CreateMessage::new()
            .content(text)
            .components(vec![CreateActionRow::Buttons(buttons)]);
        serenity::all::ChannelId::new(channel.0)
            .send_message(&self.http, message)
            .await
            .with_context(|| format!("send action panel for `{}`", panel.repo))?;
        Ok(())
    }

    async fn find_channel(&self, dest: DestinationId, name: &str) -> Result<Option<ChannelId>> {
        Ok(self
            .text_channels(dest)
            .await?
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| ChannelId(c.id.get())))
    }
}
