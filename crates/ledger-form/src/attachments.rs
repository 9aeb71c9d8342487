//! Variable-length list of attachment rows.

use ledger_core::entities::{AttachmentField, AttachmentRecord};

use crate::error::FormError;
use crate::view::{FormView, RowId};

/// Owns the row order of the attachments section and serializes it on demand.
///
/// The editor never holds zero rows after [`Self::load`]: removing the last
/// row immediately renders a fresh empty one.
#[derive(Debug, Default)]
pub struct AttachmentListEditor {
    rows: Vec<RowId>,
    next_row: u64,
}

impl AttachmentListEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from existing attachments, or start with one empty row.
    pub fn load<V: FormView>(&mut self, view: &mut V, existing: &[AttachmentRecord]) {
        if existing.is_empty() {
            self.add_attachment(view, None);
        } else {
            for record in existing {
                self.add_attachment(view, Some(record));
            }
        }
    }

    /// Append a row, empty or filled from `data`.
    pub fn add_attachment<V: FormView>(
        &mut self,
        view: &mut V,
        data: Option<&AttachmentRecord>,
    ) -> RowId {
        self.next_row += 1;
        let row = RowId::new(self.next_row);
        let empty = AttachmentRecord::default();
        view.render_row(row, data.unwrap_or(&empty));
        self.rows.push(row);
        row
    }

    /// Remove `row`; an emptied editor gets a fresh blank row.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownRow`] when `row` is not part of the editor.
    pub fn remove_attachment<V: FormView>(
        &mut self,
        view: &mut V,
        row: RowId,
    ) -> Result<(), FormError> {
        let index = self
            .rows
            .iter()
            .position(|r| *r == row)
            .ok_or(FormError::UnknownRow(row))?;
        self.rows.remove(index);
        view.remove_row(row);
        if self.rows.is_empty() {
            self.add_attachment(view, None);
        }
        Ok(())
    }

    /// Write one input of a row.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownRow`] when the row is gone.
    pub fn edit<V: FormView>(
        &self,
        view: &mut V,
        row: RowId,
        field: AttachmentField,
        value: &str,
    ) -> Result<(), FormError> {
        if !self.rows.contains(&row) || !view.write_row_field(row, field, value) {
            return Err(FormError::UnknownRow(row));
        }
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    /// Trimmed records of every row with at least one non-empty value.
    pub fn collect_records<V: FormView>(&self, view: &V) -> Vec<AttachmentRecord> {
        if !view.rows_mounted() {
            tracing::error!("attachments container not found");
            return Vec::new();
        }
        self.rows
            .iter()
            .filter_map(|row| view.read_row(*row))
            .map(|record| record.trimmed())
            .filter(|record| !record.is_blank())
            .collect()
    }

    /// The JSON array of [`Self::collect_records`], `"[]"` when nothing is filled.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Serialize`] if encoding fails.
    pub fn collect_attachments<V: FormView>(&self, view: &V) -> Result<String, FormError> {
        let records = self.collect_records(view);
        tracing::debug!(count = records.len(), "collected attachments");
        Ok(serde_json::to_string(&records)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryForm;

    fn record(kind: &str, name: &str) -> AttachmentRecord {
        AttachmentRecord {
            attachment_type: kind.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn load_without_existing_starts_with_one_empty_row() {
        let mut view = MemoryForm::new();
        let mut editor = AttachmentListEditor::new();
        editor.load(&mut view, &[]);
        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.collect_attachments(&view).unwrap(), "[]");
    }

    #[test]
    fn load_prefills_existing_rows() {
        let mut view = MemoryForm::new();
        let mut editor = AttachmentListEditor::new();
        editor.load(&mut view, &[record("positioner", "a"), record("limit switch", "b")]);
        assert_eq!(view.row_count(), 2);
        assert_eq!(editor.collect_records(&view).len(), 2);
    }

    #[test]
    fn collect_skips_blank_rows_and_trims() {
        let mut view = MemoryForm::new();
        let mut editor = AttachmentListEditor::new();
        let first = editor.add_attachment(&mut view, None);
        let second = editor.add_attachment(&mut view, None);
        editor.add_attachment(&mut view, None);
        editor
            .edit(&mut view, first, AttachmentField::Name, "  solenoid ")
            .unwrap();
        editor
            .edit(&mut view, second, AttachmentField::Model, "   ")
            .unwrap();

        let records = editor.collect_records(&view);
        assert_eq!(
            records,
            vec![AttachmentRecord {
                name: "solenoid".into(),
                ..Default::default()
            }]
        );
        assert_eq!(
            editor.collect_attachments(&view).unwrap(),
            r#"[{"attachment_type":"","name":"solenoid","device_grade":"","model":"","manufacturer":""}]"#
        );
    }

    #[test]
    fn removing_last_row_leaves_one_empty_row() {
        let mut view = MemoryForm::new();
        let mut editor = AttachmentListEditor::new();
        editor.load(&mut view, &[record("positioner", "a")]);
        let only = editor.rows()[0];

        editor.remove_attachment(&mut view, only).unwrap();

        assert_eq!(editor.rows().len(), 1);
        assert_ne!(editor.rows()[0], only);
        assert_eq!(view.row_count(), 1);
        assert_eq!(editor.collect_attachments(&view).unwrap(), "[]");
    }

    #[test]
    fn removing_unknown_row_fails() {
        let mut view = MemoryForm::new();
        let mut editor = AttachmentListEditor::new();
        editor.load(&mut view, &[]);
        let err = editor
            .remove_attachment(&mut view, RowId::new(99))
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownRow(_)));
    }

    #[test]
    fn missing_container_collects_empty_array() {
        let mut view = MemoryForm::new().without_attachments_container();
        let mut editor = AttachmentListEditor::new();
        editor.load(&mut view, &[record("positioner", "a")]);
        assert_eq!(editor.collect_attachments(&view).unwrap(), "[]");
    }
}
