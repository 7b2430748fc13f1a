//! Discord glue for the forgecord engine.
//!
//! Implements the engine's `ChatOutbound` trait over serenity's HTTP
//! client and wires gateway events (ready, guild join/leave, button
//! presses) into the registry, reconciler, and action panel.

pub mod bot;
pub mod handler;
pub mod outbound;

pub use {bot::connect, handler::BridgeHandler, outbound::DiscordOutbound};
