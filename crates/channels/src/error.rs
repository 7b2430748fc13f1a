use forgecord_common::FromMessage;

/// Crate-wide result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A hosting-API query failed; the status code is carried inside.
    #[error(transparent)]
    Hosting(#[from] forgecord_hosting::Error),

    /// A chat-platform call failed (create channel, send, lookup).
    #[error("{0}")]
    Message(String),
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

forgecord_common::impl_context!();
