//! List controller error types.

use ledger_config::ConfigError;
use ledger_core::enums::BatchAction;
use thiserror::Error;

use crate::batch::PageLayout;

#[derive(Debug, Error)]
pub enum ListError {
    /// A checkbox for an id that is not on the page.
    #[error("No row with id '{0}'")]
    UnknownRow(String),

    #[error("'{action}' is not available on the {page} page")]
    UnsupportedAction {
        action: BatchAction,
        page: PageLayout,
    },

    #[error("Invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The POST itself failed.
    #[error("Batch request failed: {0}")]
    Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}
