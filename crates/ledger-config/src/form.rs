//! Multi-step form behaviour.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_total_steps() -> u32 {
    6
}

const fn default_autosave_debounce_ms() -> u64 {
    3000
}

fn default_tag_field() -> String {
    "位号".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    /// Number of steps in the creation form.
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,

    /// Quiet period after the last edit before a draft is pushed.
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Name of the business-key field checked for uniqueness on blur.
    #[serde(default = "default_tag_field")]
    pub tag_field: String,

    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            total_steps: default_total_steps(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            tag_field: default_tag_field(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl FormConfig {
    /// Reject settings the form controllers cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero step count or a blank tag field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_steps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "form.total_steps".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.tag_field.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "form.tag_field".into(),
                reason: "must not be blank".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = FormConfig::default();
        assert_eq!(config.total_steps, 6);
        assert_eq!(config.autosave_debounce_ms, 3000);
        assert_eq!(config.tag_field, "位号");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_steps_is_invalid() {
        let config = FormConfig {
            total_steps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
