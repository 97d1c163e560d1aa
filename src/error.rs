// Error types for summit.
// Covers summarization service failures, history storage, and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummitError {
    #[error("Summarization request failed: {0}")]
    Api(#[from] reqwest::Error),

    /// The service answered without a usable summary.
    /// `message` is whatever diagnostic the service sent, possibly empty.
    #[error("{message}")]
    Service {
        status: Option<u16>,
        message: String,
    },

    #[error("Missing {0} environment variable")]
    MissingConfig(&'static str),

    #[error("Invalid article URL: {0}")]
    InvalidUrl(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl SummitError {
    /// HTTP status of a service error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SummitError::Service { status, .. } => *status,
            SummitError::Api(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text shown in the result panel for a failed lookup.
    pub fn display_message(&self) -> String {
        match self {
            SummitError::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SummitError>;
