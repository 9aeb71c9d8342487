//! Final submission check and payload composition.

use ledger_core::entities::RecordIds;
use ledger_core::ports::UserPrompt;

use crate::attachments::AttachmentListEditor;
use crate::validation::{ALL_REQUIRED_FIELDS_MESSAGE, check_required};
use crate::view::{FieldScope, FormView};

/// The payload handed to native form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedForm {
    pub fields: Vec<(String, String)>,
}

impl SubmittedForm {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed(SubmittedForm),
    Blocked { invalid: Vec<String> },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormSubmitGate;

impl FormSubmitGate {
    pub const VALVE_ID_FIELD: &'static str = "valve_id";
    pub const ATTACHMENTS_FIELD: &'static str = "attachments";

    /// Populate the hidden fields, then block on any blank required field.
    pub fn submit<V: FormView, P: UserPrompt>(
        view: &mut V,
        attachments: &AttachmentListEditor,
        ids: &RecordIds,
        prompt: &P,
    ) -> SubmitDecision {
        let valve_id = ids
            .valve_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        view.set_hidden_field(Self::VALVE_ID_FIELD, &valve_id);

        let encoded = attachments.collect_attachments(view).unwrap_or_else(|error| {
            tracing::error!(%error, "failed to collect attachments on submit");
            "[]".to_string()
        });
        view.set_hidden_field(Self::ATTACHMENTS_FIELD, &encoded);

        let invalid = check_required(view, FieldScope::WholeForm);
        if !invalid.is_empty() {
            tracing::debug!(?invalid, "submission blocked");
            prompt.alert(ALL_REQUIRED_FIELDS_MESSAGE);
            return SubmitDecision::Blocked { invalid };
        }

        let fields = view
            .field_names()
            .into_iter()
            .filter_map(|name| view.read_field(&name).map(|value| (name, value)))
            .collect();
        SubmitDecision::Proceed(SubmittedForm { fields })
    }
}
