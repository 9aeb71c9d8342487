//! Tag uniqueness endpoint.

use ledger_core::ids::RecordId;
use ledger_core::ports::TagValidator;
use ledger_core::responses::TagCheckResponse;

use crate::error::ClientError;
use crate::http::{check_response, read_json};
use crate::{LedgerClient, with_query};

impl LedgerClient {
    /// `<check_tag_url>?<tag_field>=<tag>[&exclude_id=<id>]`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when `check_tag_url` is not set.
    pub fn check_tag_url(
        &self,
        tag: &str,
        exclude_id: Option<&RecordId>,
    ) -> Result<String, ClientError> {
        let base = self.endpoints.require("check_tag_url")?;
        let mut query = format!(
            "{}={}",
            urlencoding::encode(&self.tag_field),
            urlencoding::encode(tag)
        );
        if let Some(id) = exclude_id {
            query.push_str(&format!("&exclude_id={}", urlencoding::encode(id.as_str())));
        }
        Ok(with_query(base, &query))
    }
}

impl TagValidator for LedgerClient {
    type Error = ClientError;

    async fn check_tag(
        &self,
        tag: &str,
        exclude_id: Option<&RecordId>,
    ) -> Result<TagCheckResponse, ClientError> {
        let url = self.check_tag_url(tag, exclude_id)?;
        tracing::debug!(%url, "checking tag");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        read_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use ledger_config::LedgerConfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn client(check_tag_url: &str) -> LedgerClient {
        let mut config = LedgerConfig::default();
        config.endpoints.check_tag_url = check_tag_url.to_string();
        LedgerClient::new(&config).unwrap()
    }

    #[test]
    fn encodes_tag_field_and_value() {
        let url = client("http://ledger.local/valve/check-tag")
            .check_tag_url("FV 101", None)
            .unwrap();
        assert_eq!(
            url,
            "http://ledger.local/valve/check-tag?%E4%BD%8D%E5%8F%B7=FV%20101"
        );
    }

    #[test]
    fn appends_exclude_id() {
        let id = RecordId::from(42);
        let url = client("http://ledger.local/valve/check-tag")
            .check_tag_url("FV-1", Some(&id))
            .unwrap();
        assert!(url.ends_with("=FV-1&exclude_id=42"));
    }

    #[test]
    fn missing_endpoint_is_a_config_error() {
        let err = client("").check_tag_url("FV-1", None).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
