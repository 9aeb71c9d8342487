//! Server endpoint URLs.
//!
//! Paths are injected at runtime by the server-rendered page, so every URL is
//! configuration rather than a constant.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EndpointsConfig {
    /// Tag uniqueness check (`GET`).
    #[serde(default)]
    pub check_tag_url: String,

    /// Draft auto-save (`POST` JSON).
    #[serde(default)]
    pub save_draft_url: String,

    /// Final form submission (`POST` urlencoded).
    #[serde(default)]
    pub form_submit_url: String,

    /// Ledger detail page; approve/reject decisions post here with an `action` field.
    #[serde(default)]
    pub ledger_detail_url: String,

    #[serde(default)]
    pub batch_approve_url: String,

    #[serde(default)]
    pub batch_reject_url: String,

    #[serde(default)]
    pub batch_delete_url: String,

    #[serde(default)]
    pub batch_export_url: String,

    /// Ledger page: submit the checked valves for approval (`valve_ids`).
    #[serde(default)]
    pub batch_submit_url: String,

    /// Ledger page: delete the checked valves (`valve_ids`).
    #[serde(default)]
    pub ledger_batch_delete_url: String,
}

impl EndpointsConfig {
    /// Check that the two endpoints the form itself needs are present.
    pub fn is_configured(&self) -> bool {
        !self.check_tag_url.is_empty() && !self.save_draft_url.is_empty()
    }

    /// Look up an endpoint by its config key, failing when it is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEndpoint`] when the value is empty.
    pub fn require(&self, endpoint: &'static str) -> Result<&str, ConfigError> {
        let value = match endpoint {
            "check_tag_url" => &self.check_tag_url,
            "save_draft_url" => &self.save_draft_url,
            "form_submit_url" => &self.form_submit_url,
            "ledger_detail_url" => &self.ledger_detail_url,
            "batch_approve_url" => &self.batch_approve_url,
            "batch_reject_url" => &self.batch_reject_url,
            "batch_delete_url" => &self.batch_delete_url,
            "batch_export_url" => &self.batch_export_url,
            "batch_submit_url" => &self.batch_submit_url,
            "ledger_batch_delete_url" => &self.ledger_batch_delete_url,
            _ => return Err(ConfigError::MissingEndpoint { endpoint }),
        };
        if value.is_empty() {
            Err(ConfigError::MissingEndpoint { endpoint })
        } else {
            Ok(value)
        }
    }
}
