//! Draft auto-save endpoint.

use ledger_core::entities::DraftSnapshot;
use ledger_core::ports::DraftStore;
use ledger_core::responses::SaveDraftResponse;

use crate::LedgerClient;
use crate::error::ClientError;
use crate::http::{check_response, read_json};

impl DraftStore for LedgerClient {
    type Error = ClientError;

    async fn save_draft(&self, snapshot: &DraftSnapshot) -> Result<SaveDraftResponse, ClientError> {
        let url = self.endpoints.require("save_draft_url")?;
        let resp = check_response(self.http.post(url).json(snapshot).send().await?).await?;
        read_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use ledger_core::ids::RecordId;
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{"success": true, "valve_id": 318}"#;

    #[test]
    fn parse_numeric_draft_id() {
        let resp: SaveDraftResponse = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(resp.assigned_id(), Some(&RecordId::from(318)));
    }

    #[test]
    fn parse_refusal() {
        let resp: SaveDraftResponse =
            serde_json::from_str(r#"{"success": false, "message": "no permission"}"#).unwrap();
        assert!(resp.assigned_id().is_none());
        assert_eq!(resp.message.as_deref(), Some("no permission"));
    }

    #[tokio::test]
    async fn unconfigured_endpoint_fails_before_sending() {
        let client = LedgerClient::new(&ledger_config::LedgerConfig::default()).unwrap();
        let err = client.save_draft(&DraftSnapshot::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
