//! Form controller error types.

use thiserror::Error;

use crate::view::RowId;

#[derive(Debug, Error)]
pub enum FormError {
    /// The row was already removed or never existed.
    #[error("Unknown attachment row {0}")]
    UnknownRow(RowId),

    /// An attachment input name that is not one of the five row inputs.
    #[error("Unknown attachment field '{0}'")]
    UnknownField(String),

    /// Attachment list could not be encoded.
    #[error("Failed to serialize attachments: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The session event loop is no longer running.
    #[error("Form session has stopped")]
    SessionClosed,
}
