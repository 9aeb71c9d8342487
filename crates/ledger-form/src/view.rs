//! The rendering surface the form controllers drive.
//!
//! A browser page, a terminal, or the in-memory [`crate::MemoryForm`] can sit
//! behind [`FormView`]. Controllers never look elements up themselves; they
//! only read and write through these capabilities.

use std::fmt;

use ledger_core::entities::{AttachmentField, AttachmentRecord, FormStep, ProgressState};

/// Handle of one rendered attachment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which required fields a validation pass looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    /// Only the fields inside one step's panel.
    Step(FormStep),
    /// Every field of the form.
    WholeForm,
}

pub trait FormView {
    /// Every named field in document order, hidden fields included,
    /// attachment row inputs excluded.
    fn field_names(&self) -> Vec<String>;

    fn read_field(&self, name: &str) -> Option<String>;

    fn write_field(&mut self, name: &str, value: &str);

    /// Names of the required fields within `scope`.
    fn required_fields(&self, scope: FieldScope) -> Vec<String>;

    fn set_field_invalid(&mut self, name: &str, invalid: bool);

    /// Show inline feedback under a field, creating the element on first use.
    /// `None` hides it.
    fn show_feedback(&mut self, name: &str, message: Option<&str>);

    /// Set a hidden input, appending it to the form if it does not exist yet.
    fn set_hidden_field(&mut self, name: &str, value: &str);

    fn render_progress(&mut self, progress: &ProgressState);

    /// Whether the attachments container exists on this surface.
    fn rows_mounted(&self) -> bool;

    fn render_row(&mut self, row: RowId, data: &AttachmentRecord);

    fn remove_row(&mut self, row: RowId);

    /// Raw (untrimmed) values of a row.
    fn read_row(&self, row: RowId) -> Option<AttachmentRecord>;

    /// Returns false when the row does not exist.
    fn write_row_field(&mut self, row: RowId, field: AttachmentField, value: &str) -> bool;
}
