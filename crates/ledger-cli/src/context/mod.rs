mod config_warnings;

use std::sync::Arc;

use anyhow::Context;
use ledger_config::LedgerConfig;
use ledger_http::LedgerClient;

pub use config_warnings::warn_unconfigured;

/// Loaded configuration plus the HTTP client built from it.
pub struct AppContext {
    pub config: LedgerConfig,
    pub client: Arc<LedgerClient>,
}

impl AppContext {
    pub fn init() -> anyhow::Result<Self> {
        let config = LedgerConfig::load_with_dotenv().context("failed to load configuration")?;
        warn_unconfigured(&config);
        let client = LedgerClient::new(&config).context("failed to build HTTP client")?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }
}
