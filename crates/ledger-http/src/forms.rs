//! Urlencoded form posts: batch actions, ledger decisions, final submission.

use ledger_core::ports::BatchGateway;
use ledger_core::responses::PostedPage;

use crate::LedgerClient;
use crate::error::ClientError;
use crate::http::check_response;

impl BatchGateway for LedgerClient {
    type Error = ClientError;

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<PostedPage, ClientError> {
        tracing::debug!(%url, fields = fields.len(), "posting form");
        let resp = check_response(self.http.post(url).form(fields).send().await?).await?;
        Ok(PostedPage {
            url: resp.url().to_string(),
            status: resp.status().as_u16(),
        })
    }
}
