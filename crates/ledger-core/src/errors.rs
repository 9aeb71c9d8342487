//! Cross-cutting error types for the ledger client.
//!
//! Domain-specific errors (e.g., `FormError`, `ClientError`) are defined in
//! their respective crates. Everything converges on `anyhow` in `ledger-cli`.

use thiserror::Error;

/// Errors that can be raised by any ledger crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A step number outside `1..=total`.
    #[error("Invalid step {step}: expected 1..={total}")]
    InvalidStep { step: u32, total: u32 },

    /// An unknown enum value arrived from the command line or the wire.
    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}
