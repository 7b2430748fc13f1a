//! Shared error plumbing used across all forgecord crates.

pub mod error;

pub use error::{Error, FromMessage, Result};
