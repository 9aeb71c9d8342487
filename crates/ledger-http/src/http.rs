//! Response checks shared by the endpoint modules.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Turn any non-2xx answer into [`ClientError::Api`]. The message is the
/// trimmed body, or the status reason when the body is empty.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("request failed").to_string(),
        text => text.to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Decode a checked response body as JSON. A body that is not the expected
/// shape (an HTML login page, say) becomes [`ClientError::Parse`].
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}
