use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// The full in-progress form pushed to the draft endpoint on every auto-save tick.
///
/// `attachments` is the already-serialized JSON array produced by the
/// attachment editor, not a nested array.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub valve_id: Option<RecordId>,
    pub ledger_id: Option<RecordId>,
    #[serde(rename = "formData")]
    pub form_data: BTreeMap<String, String>,
    pub attachments: String,
}

/// Identifiers the form is currently editing under.
///
/// `valve_id` starts as whatever the page injected and is replaced by the
/// server-assigned id after the first successful draft save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordIds {
    pub valve_id: Option<RecordId>,
    pub ledger_id: Option<RecordId>,
}
