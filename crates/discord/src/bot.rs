use {
    secrecy::{ExposeSecret, Secret},
    serenity::all::{Client, GatewayIntents},
};

use crate::handler::BridgeHandler;

/// Gateway intents the bridge needs: guild lifecycle and channel
/// metadata. Component interactions arrive regardless of intents.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
}

/// Build the serenity client with the bridge handler attached.
///
/// The caller keeps the returned client to clone its `http` handle (for
/// the webhook side) before running `client.start()`.
pub async fn connect(
    token: &Secret<String>,
    handler: BridgeHandler,
) -> serenity::Result<Client> {
    Client::builder(token.expose_secret(), intents())
        .event_handler(handler)
        .await
}
