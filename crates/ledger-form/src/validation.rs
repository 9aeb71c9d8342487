//! Required-field checks shared by step navigation and the submit gate.

use crate::view::{FieldScope, FormView};

/// Alert shown when forward navigation is blocked.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in the required fields";

/// Alert shown when submission is blocked.
pub const ALL_REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Mark every blank required field in `scope` invalid and clear the marker on
/// the filled ones. Returns the names of the blank fields.
pub fn check_required<V: FormView>(view: &mut V, scope: FieldScope) -> Vec<String> {
    let mut invalid = Vec::new();
    for name in view.required_fields(scope) {
        let filled = view
            .read_field(&name)
            .is_some_and(|value| !value.trim().is_empty());
        view.set_field_invalid(&name, !filled);
        if !filled {
            invalid.push(name);
        }
    }
    invalid
}

/// `input` listener for required fields: a non-blank value clears the marker.
pub fn clear_if_filled<V: FormView>(view: &mut V, name: &str) {
    let required = view
        .required_fields(FieldScope::WholeForm)
        .iter()
        .any(|field| field == name);
    if required
        && view
            .read_field(name)
            .is_some_and(|value| !value.trim().is_empty())
    {
        view.set_field_invalid(name, false);
    }
}
