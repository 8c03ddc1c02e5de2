use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum VcsError {
    // Driver applicability
    #[error("Unsupported repository URL: {0}")]
    UnsupportedUrl(String),

    #[error("Driver used before initialize() was called")]
    NotInitialized,

    #[error("Missing capability: {0}")]
    MissingCapability(String),

    // Transport errors
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: HttpError,
    },

    // Decoding errors
    #[error("Failed to parse JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, VcsError>;
