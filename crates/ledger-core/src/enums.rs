//! Batch actions, toast kinds, and step indicator states.
//!
//! Enums that travel over the wire use `snake_case` serialization and expose
//! `as_str()` for the exact wire spelling.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// StepIndicator
// ---------------------------------------------------------------------------

/// Visual state of one step indicator in the progress header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIndicator {
    Completed,
    Active,
    Pending,
}

// ---------------------------------------------------------------------------
// BatchAction
// ---------------------------------------------------------------------------

/// An operation applied to a user-selected subset of list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    Approve,
    Reject,
    Delete,
    Export,
    Submit,
}

impl BatchAction {
    /// Value posted in the `action` field of the ledger detail form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "batch_approve",
            Self::Reject => "batch_reject",
            Self::Delete => "batch_delete",
            Self::Export => "batch_export",
            Self::Submit => "submit",
        }
    }

    /// Destructive and approval actions ask before doing anything.
    #[must_use]
    pub const fn requires_confirmation(self) -> bool {
        !matches!(self, Self::Export)
    }

    /// Human verb used in prompts.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "approve" | "batch_approve" => Ok(Self::Approve),
            "reject" | "batch_reject" => Ok(Self::Reject),
            "delete" | "batch_delete" => Ok(Self::Delete),
            "export" | "batch_export" => Ok(Self::Export),
            "submit" => Ok(Self::Submit),
            _ => Err(CoreError::UnknownValue {
                kind: "batch action",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ToastKind
// ---------------------------------------------------------------------------

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
