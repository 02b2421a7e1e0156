//! Remote client error types.

use thiserror::Error;

/// Result type for remote client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur talking to the remote server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a JSON-RPC error object.
    #[error("API error {code}: {message} {data}")]
    Api {
        code: i64,
        message: String,
        data: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("credentials required")]
    MissingCredentials,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid API version: {0}")]
    InvalidVersion(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
