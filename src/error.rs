//! Unified error handling for the daledou crate
//!
//! Domain-specific errors ([`FetchError`], [`MissionError`], [`NotifyError`])
//! live next to the code that raises them; this module wraps them into a
//! single [`Error`] enum for use across module boundaries.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::client::FetchError;
pub use crate::mission::MissionError;
pub use crate::notify::NotifyError;

/// Unified error type for the daledou crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-layer errors (transport, timeout)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Mission execution errors
    #[error("Mission error: {0}")]
    Mission(#[from] MissionError),

    /// Report delivery errors
    #[error("Notify error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: format!("{err:#}"),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
