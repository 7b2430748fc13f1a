//! Inbound transport for push events.
//!
//! A small axum server: `POST /webhooks/github` feeds the engine's push
//! router, `GET /health` answers liveness probes. This is the webhook
//! receiver the hosting platform is pointed at.

pub mod server;
pub mod webhook;

pub use server::{AppState, build_app, start};
