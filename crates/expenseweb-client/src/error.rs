//! Error types for expenseweb-client
//!
//! Only `NotFound` (HTTP 404) is a fallback-eligible failure; every
//! other variant must surface immediately so genuine backend failures
//! are never masked as false negatives.

use thiserror::Error;

/// Main error type for expenseweb-client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Backend returned status {status} for {endpoint}")]
    Upstream { status: u16, endpoint: String },

    #[error("Network error talking to the backend: {message}")]
    Network { message: String },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ClientError {
    /// True for the not-found class of failure, the only class that
    /// triggers probing the other collection
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        let endpoint = error
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        if error.is_decode() {
            ClientError::Decode {
                endpoint,
                message: error.to_string(),
            }
        } else {
            ClientError::Network {
                message: error.to_string(),
            }
        }
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
