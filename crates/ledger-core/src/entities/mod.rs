//! Entity structs for the ledger form domain.
//!
//! All wire-facing structs derive `Serialize` and `JsonSchema` so the JSON
//! contracts can be checked against generated schemas in tests.

mod attachment;
mod draft;
mod step;

pub use attachment::{AttachmentField, AttachmentRecord};
pub use draft::{DraftSnapshot, RecordIds};
pub use step::{FormStep, ProgressState};
