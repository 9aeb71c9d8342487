//! # ledger-form
//!
//! Controllers behind the multi-step valve creation form.
//!
//! - [`StepNavigator`] gates forward moves on the current step's required fields
//! - [`AttachmentListEditor`] owns the variable-length attachment rows
//! - [`DraftAutoSaver`] pushes a debounced snapshot of the form to the server
//! - [`TagUniquenessChecker`] asks the server whether the tag is taken
//! - [`FormSubmitGate`] composes the final payload or blocks submission
//!
//! Everything renders through the [`FormView`] trait. [`FormSession`] ties the
//! pieces together on one task and feeds them events from a channel.

pub mod attachments;
pub mod autosave;
pub mod debounce;
pub mod error;
pub mod memory;
pub mod session;
pub mod steps;
pub mod submit;
pub mod tag_check;
pub mod validation;
pub mod view;

#[cfg(test)]
mod test_support;

pub use attachments::AttachmentListEditor;
pub use autosave::{DraftAutoSaver, SaveApplied};
pub use debounce::Debounce;
pub use error::FormError;
pub use memory::{FormDocument, MemoryField, MemoryForm};
pub use session::{FormEvent, FormHandle, FormSession, SessionSettings};
pub use steps::{StepNavigator, StepOutcome};
pub use submit::{FormSubmitGate, SubmitDecision, SubmittedForm};
pub use tag_check::{TagUniquenessChecker, TagVerdict};
pub use view::{FieldScope, FormView, RowId};
