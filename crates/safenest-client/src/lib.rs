//! # SafeNest Client
//!
//! HTTP client for the SafeNest child-safety API.
//!
//! All detection, scoring, and governance logic lives behind the API; this
//! crate only shapes requests, authenticates with an API key, and decodes
//! the typed results. The [`SafeNestApi`] trait is the seam consumers code
//! against: the real [`SafeNestClient`] implements it over HTTPS, and tests
//! substitute stubs without touching the process environment.

pub mod client;
pub mod types;

pub use client::{ClientConfig, SafeNestApi, SafeNestClient};

/// Result type for SafeNest client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the SafeNest API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is not set. Export your SafeNest API key.")]
    MissingCredential(&'static str),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl Error {
    /// The fault text callers should surface, or `"Unknown error"` when the
    /// backend supplied none.
    pub fn message(&self) -> String {
        let text = match self {
            Self::MissingCredential(var) => format!("{} is not set", var),
            Self::ConnectionFailed(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Parse(msg) => msg.clone(),
        };

        if text.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            text
        }
    }
}
