//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_page() -> String {
    "list".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Which page layout batch actions target by default (`list` or `detail`).
    #[serde(default = "default_page")]
    pub default_page: String,

    /// Current ledger id, used when the form is opened inside a ledger.
    #[serde(default)]
    pub ledger_id: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            ledger_id: String::new(),
        }
    }
}
