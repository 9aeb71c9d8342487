//! # ledger-config
//!
//! Layered configuration loading for the valve ledger client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LEDGER_*` prefix, `__` as separator)
//! 2. Project-level `.ledger/config.toml`
//! 3. User-level `~/.config/ledger/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LEDGER_ENDPOINTS__SAVE_DRAFT_URL` -> `endpoints.save_draft_url`,
//! `LEDGER_FORM__TOTAL_STEPS` -> `form.total_steps`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ledger_config::LedgerConfig;
//!
//! let config = LedgerConfig::load_with_dotenv().expect("config");
//! if config.endpoints.is_configured() {
//!     println!("drafts go to {}", config.endpoints.save_draft_url);
//! }
//! ```

mod endpoints;
mod error;
mod form;
mod general;

pub use endpoints::EndpointsConfig;
pub use error::ConfigError;
pub use form::FormConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LedgerConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source fails to parse or the form
    /// section holds unusable values.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on extraction failure or invalid form settings.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.form.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ledger/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LEDGER_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ledger").join("config.toml"))
    }
}
