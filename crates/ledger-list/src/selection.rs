//! Checkbox bookkeeping shared by the list and ledger detail pages.

use crate::error::ListError;

/// The two "select all" boxes, above and inside the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    Top,
    Table,
}

impl HeaderCheckbox {
    pub const BOTH: [Self; 2] = [Self::Top, Self::Table];
}

/// Where the selection is reflected on the page.
pub trait SelectionView {
    fn render_count(&mut self, count: usize);

    fn set_row_checked(&mut self, id: &str, checked: bool);

    fn set_header_checked(&mut self, header: HeaderCheckbox, checked: bool);
}

/// Selection state of one table of checkable rows.
///
/// `id_field` is the form field the checked ids are posted under (`ids` on
/// the valve list, `valve_ids` on a ledger page).
#[derive(Debug, Clone)]
pub struct SelectionController {
    id_field: String,
    rows: Vec<(String, bool)>,
}

impl SelectionController {
    /// One row per distinct id, in first-seen order.
    pub fn new<I, S>(id_field: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<(String, bool)> = Vec::new();
        for id in ids {
            let id = id.into();
            if !rows.iter().any(|(seen, _)| *seen == id) {
                rows.push((id, false));
            }
        }
        Self {
            id_field: id_field.into(),
            rows,
        }
    }

    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Per-row checkbox `change`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnknownRow`] for an id that is not in the table.
    pub fn toggle_row<V: SelectionView>(
        &mut self,
        view: &mut V,
        id: &str,
        checked: bool,
    ) -> Result<(), ListError> {
        let row = self
            .rows
            .iter_mut()
            .find(|(row_id, _)| row_id == id)
            .ok_or_else(|| ListError::UnknownRow(id.to_string()))?;
        row.1 = checked;
        view.set_row_checked(id, checked);
        self.sync_headers(view);
        Ok(())
    }

    /// A header checkbox `change`: every row and the other header follow it.
    pub fn toggle_all<V: SelectionView>(&mut self, view: &mut V, checked: bool) {
        for (id, state) in &mut self.rows {
            *state = checked;
            view.set_row_checked(id, checked);
        }
        for header in HeaderCheckbox::BOTH {
            view.set_header_checked(header, checked);
        }
        view.render_count(self.count());
    }

    fn sync_headers<V: SelectionView>(&self, view: &mut V) {
        let all = self.all_checked();
        for header in HeaderCheckbox::BOTH {
            view.set_header_checked(header, all);
        }
        view.render_count(self.count());
    }

    #[must_use]
    pub fn all_checked(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|(_, checked)| *checked)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.iter().filter(|(_, checked)| *checked).count()
    }

    /// Checked ids in table order.
    #[must_use]
    pub fn selected(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// One `(id_field, id)` pair per checked row.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.selected()
            .into_iter()
            .map(|id| (self.id_field.clone(), id.to_string()))
            .collect()
    }
}

/// In-memory [`SelectionView`], used by the CLI and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub count: usize,
    pub checked_rows: Vec<String>,
    pub top: bool,
    pub table: bool,
}

impl SelectionView for SelectionState {
    fn render_count(&mut self, count: usize) {
        self.count = count;
    }

    fn set_row_checked(&mut self, id: &str, checked: bool) {
        self.checked_rows.retain(|row| row != id);
        if checked {
            self.checked_rows.push(id.to_string());
        }
    }

    fn set_header_checked(&mut self, header: HeaderCheckbox, checked: bool) {
        match header {
            HeaderCheckbox::Top => self.top = checked,
            HeaderCheckbox::Table => self.table = checked,
        }
    }
}
