//! Response types returned as JSON by the ledger server endpoints.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// Response from the tag uniqueness check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TagCheckResponse {
    pub valid: bool,
    /// Present when `valid` is false.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from the draft save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SaveDraftResponse {
    pub success: bool,
    /// Server-assigned id of the draft record, on success. A blank string
    /// reads as no id.
    #[serde(default, deserialize_with = "crate::ids::blank_as_none")]
    pub valve_id: Option<RecordId>,
    /// Reason for a refusal (missing ledger, no edit permission).
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveDraftResponse {
    /// The id to adopt for later saves, if the save succeeded and returned one.
    #[must_use]
    pub fn assigned_id(&self) -> Option<&RecordId> {
        if self.success {
            self.valve_id.as_ref()
        } else {
            None
        }
    }
}

/// Where a urlencoded POST ended up after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedPage {
    pub url: String,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tag_response_without_message() {
        let resp: TagCheckResponse = serde_json::from_str(r#"{"valid":true}"#).unwrap();
        assert!(resp.valid);
        assert!(resp.message.is_none());
    }

    #[test]
    fn invalid_tag_response_with_null_message() {
        let resp: TagCheckResponse =
            serde_json::from_str(r#"{"valid":false,"message":null}"#).unwrap();
        assert!(!resp.valid);
        assert!(resp.message.is_none());
    }

    #[test]
    fn numeric_valve_id_is_adopted() {
        let resp: SaveDraftResponse =
            serde_json::from_str(r#"{"success":true,"valve_id":17}"#).unwrap();
        assert_eq!(resp.assigned_id().map(RecordId::as_str), Some("17"));
    }

    #[test]
    fn blank_valve_id_is_a_save_without_id() {
        let resp: SaveDraftResponse =
            serde_json::from_str(r#"{"success":true,"valve_id":""}"#).unwrap();
        assert!(resp.success);
        assert!(resp.assigned_id().is_none());

        let resp: SaveDraftResponse =
            serde_json::from_str(r#"{"success":true,"valve_id":null}"#).unwrap();
        assert!(resp.assigned_id().is_none());
    }

    #[test]
    fn failed_save_assigns_nothing() {
        let resp: SaveDraftResponse =
            serde_json::from_str(r#"{"success":false,"message":"no permission"}"#).unwrap();
        assert!(resp.assigned_id().is_none());
        assert_eq!(resp.message.as_deref(), Some("no permission"));
    }
}
