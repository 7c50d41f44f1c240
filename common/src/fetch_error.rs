//! Errors raised while fetching remote data for the overview.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    /// The request could not be sent, or the remote rejected it.
    #[error("network error: {0}")]
    Network(String),
    /// The remote answered, but not with the shape we expect.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn network(message: impl std::fmt::Display) -> Self {
        FetchError::Network(message.to_string())
    }

    pub fn malformed(message: impl std::fmt::Display) -> Self {
        FetchError::MalformedResponse(message.to_string())
    }
}
