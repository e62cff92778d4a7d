//! Error types for evalctl-state

use thiserror::Error;

/// Errors returned by the cluster control plane or the path to it
#[derive(Error, Debug)]
pub enum ApiError {
    /// The cluster could not be reached, or the connection failed mid-request
    #[error("Failed to reach cluster: {0}")]
    Transport(String),

    /// The control plane answered with a non-success status
    #[error("Unexpected response code {status}: {message}")]
    Api { status: u16, message: String },

    /// The requested record does not exist remotely
    #[error("{message}")]
    NotFound { message: String },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Client-side configuration is unusable
    #[error("Invalid cluster configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.trim().to_string();
        if status == 404 {
            ApiError::NotFound { message }
        } else {
            ApiError::Api { status, message }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
