use thiserror::Error;

/// Crate-wide result type for hosting queries.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-200 status.
    #[error("hosting API returned status {status}")]
    Status { status: u16 },

    /// The request never produced a usable response (connect failure,
    /// timeout, malformed body).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Status code to show in user-facing error text. Transport failures
    /// have no HTTP status and render as 0.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Status { status } => *status,
            Self::Transport(e) => e.status().map(|s| s.as_u16()).unwrap_or(0),
        }
    }
}
