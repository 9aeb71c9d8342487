use ledger_config::LedgerConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &LedgerConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LedgerConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.endpoints.is_configured() && has_env_prefix(&env_keys, "LEDGER_ENDPOINTS") {
        warnings.push(
            "Endpoints appear unset while LEDGER_ENDPOINTS* env vars exist. Use double underscores (example: LEDGER_ENDPOINTS__SAVE_DRAFT_URL)."
                .to_string(),
        );
    }

    if config.general.ledger_id.is_empty() && has_env_prefix(&env_keys, "LEDGER_GENERAL_LEDGER") {
        warnings.push(
            "general.ledger_id is empty while LEDGER_GENERAL_LEDGER* env vars exist. Use double underscores (example: LEDGER_GENERAL__LEDGER_ID)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
