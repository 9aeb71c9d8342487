//! # ledger-http
//!
//! reqwest client for the ledger server. [`LedgerClient`] implements the
//! network ports of `ledger-core`:
//! - [`DraftStore`](ledger_core::ports::DraftStore): JSON `POST` of draft snapshots
//! - [`TagValidator`](ledger_core::ports::TagValidator): `GET` tag uniqueness check
//! - [`BatchGateway`](ledger_core::ports::BatchGateway): urlencoded form posts

mod drafts;
mod error;
mod forms;
mod http;
mod tags;

pub use error::ClientError;

use std::time::Duration;

use ledger_config::{EndpointsConfig, LedgerConfig};

const USER_AGENT: &str = concat!("ledgerctl/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one server's endpoints.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    endpoints: EndpointsConfig,
    tag_field: String,
}

impl LedgerClient {
    /// Build a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &LedgerConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.form.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoints: config.endpoints.clone(),
            tag_field: config.form.tag_field.clone(),
        })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }
}

/// Append `query` to `base`, with `&` when `base` already carries a query.
pub(crate) fn with_query(base: &str, query: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
