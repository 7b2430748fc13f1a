//! Configuration loading, validation, and env substitution.
//!
//! Config files: `forgecord.toml` or `forgecord.json`, searched in `./`
//! then `~/.config/forgecord/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values, plus
//! `FORGECORD_*` env overrides applied after load.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::{
        DiscordSection, ForgecordConfig, HostingSection, NotifySection, WebhookSection,
    },
};
