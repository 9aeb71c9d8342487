//! Client error types.

use ledger_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when talking to the ledger server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, or the status reason when it was empty.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// An endpoint the request needs is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
