//! In-memory [`FormView`] used by the CLI and by tests.

use std::collections::BTreeMap;

use ledger_core::entities::{AttachmentField, AttachmentRecord, FormStep, ProgressState};
use ledger_core::ids::RecordId;
use serde::Deserialize;

use crate::view::{FieldScope, FormView, RowId};

/// One visible input of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryField {
    pub name: String,
    pub value: String,
    pub step: FormStep,
    pub required: bool,
    pub invalid: bool,
}

impl MemoryField {
    #[must_use]
    pub fn new(name: impl Into<String>, step: FormStep) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            step,
            required: false,
            invalid: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Inline feedback element under a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryForm {
    fields: Vec<MemoryField>,
    hidden: Vec<(String, String)>,
    rows: Vec<(RowId, AttachmentRecord)>,
    rows_mounted: bool,
    feedback: BTreeMap<String, Feedback>,
    progress: Option<ProgressState>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            hidden: Vec::new(),
            rows: Vec::new(),
            rows_mounted: true,
            feedback: BTreeMap::new(),
            progress: None,
        }
    }

    /// A form whose page has no attachments container.
    #[must_use]
    pub fn without_attachments_container(mut self) -> Self {
        self.rows_mounted = false;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: MemoryField) -> Self {
        self.push_field(field);
        self
    }

    pub fn push_field(&mut self, field: MemoryField) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_invalid(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.invalid)
    }

    #[must_use]
    pub fn hidden_field(&self, name: &str) -> Option<&str> {
        self.hidden
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn hidden_field_count(&self) -> usize {
        self.hidden.len()
    }

    #[must_use]
    pub fn feedback(&self, name: &str) -> Option<&Feedback> {
        self.feedback.get(name)
    }

    #[must_use]
    pub const fn progress(&self) -> Option<&ProgressState> {
        self.progress.as_ref()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }
}

impl FormView for MemoryForm {
    fn field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.name.clone())
            .chain(self.hidden.iter().map(|(name, _)| name.clone()))
            .collect()
    }

    fn read_field(&self, name: &str) -> Option<String> {
        self.field(name)
            .map(|f| f.value.clone())
            .or_else(|| self.hidden_field(name).map(str::to_string))
    }

    fn write_field(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.to_string();
        } else {
            tracing::debug!(field = name, "write to unknown field ignored");
        }
    }

    fn required_fields(&self, scope: FieldScope) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| match scope {
                FieldScope::Step(step) => f.step == step,
                FieldScope::WholeForm => true,
            })
            .map(|f| f.name.clone())
            .collect()
    }

    fn set_field_invalid(&mut self, name: &str, invalid: bool) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.invalid = invalid;
        }
    }

    fn show_feedback(&mut self, name: &str, message: Option<&str>) {
        match message {
            Some(message) => {
                let entry = self.feedback.entry(name.to_string()).or_insert(Feedback {
                    message: String::new(),
                    visible: false,
                });
                entry.message = message.to_string();
                entry.visible = true;
            }
            None => {
                if let Some(entry) = self.feedback.get_mut(name) {
                    entry.visible = false;
                }
            }
        }
    }

    fn set_hidden_field(&mut self, name: &str, value: &str) {
        if let Some((_, slot)) = self.hidden.iter_mut().find(|(key, _)| key == name) {
            *slot = value.to_string();
        } else {
            self.hidden.push((name.to_string(), value.to_string()));
        }
    }

    fn render_progress(&mut self, progress: &ProgressState) {
        self.progress = Some(progress.clone());
    }

    fn rows_mounted(&self) -> bool {
        self.rows_mounted
    }

    fn render_row(&mut self, row: RowId, data: &AttachmentRecord) {
        if self.rows_mounted {
            self.rows.push((row, data.clone()));
        }
    }

    fn remove_row(&mut self, row: RowId) {
        self.rows.retain(|(id, _)| *id != row);
    }

    fn read_row(&self, row: RowId) -> Option<AttachmentRecord> {
        self.rows
            .iter()
            .find(|(id, _)| *id == row)
            .map(|(_, data)| data.clone())
    }

    fn write_row_field(&mut self, row: RowId, field: AttachmentField, value: &str) -> bool {
        match self.rows.iter_mut().find(|(id, _)| *id == row) {
            Some((_, data)) => {
                data.set_field(field, value);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// FormDocument
// ---------------------------------------------------------------------------

/// A form described as JSON, used by `ledgerctl` to drive the controllers.
///
/// ```json
/// {
///   "valve_id": null,
///   "ledger_id": "3",
///   "fields": [{"name": "位号", "value": "FV-101", "step": 1, "required": true}],
///   "attachments": [{"attachment_type": "positioner", "name": "SVI"}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormDocument {
    #[serde(default)]
    pub valve_id: Option<RecordId>,
    #[serde(default)]
    pub ledger_id: Option<RecordId>,
    #[serde(default)]
    pub fields: Vec<DocumentField>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentField {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "first_step")]
    pub step: u32,
    #[serde(default)]
    pub required: bool,
}

const fn first_step() -> u32 {
    1
}

impl FormDocument {
    /// Build the field layout for a form of `total_steps` steps.
    ///
    /// # Errors
    ///
    /// Returns [`ledger_core::errors::CoreError::InvalidStep`] for a field
    /// placed on a step the form does not have.
    pub fn to_view(&self, total_steps: u32) -> Result<MemoryForm, ledger_core::errors::CoreError> {
        let mut form = MemoryForm::new();
        for doc in &self.fields {
            let mut field =
                MemoryField::new(doc.name.clone(), FormStep::new(doc.step, total_steps)?)
                    .value(doc.value.clone());
            field.required = doc.required;
            form.push_field(field);
        }
        Ok(form)
    }
}
