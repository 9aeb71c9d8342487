//! Helpers shared by the form commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ledger_config::LedgerConfig;
use ledger_core::entities::RecordIds;
use ledger_core::ids::RecordId;
use ledger_form::{FormDocument, FormHandle, FormSession, MemoryForm, SessionSettings};
use ledger_http::LedgerClient;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::terminal::TerminalPrompt;

pub type CliSession = FormSession<MemoryForm, LedgerClient, LedgerClient, TerminalPrompt>;

/// Read a form document from disk.
pub fn read_document(path: &Path) -> anyhow::Result<FormDocument> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form document {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid form document {}", path.display()))
}

/// Ids from the document, falling back to `general.ledger_id` for the ledger.
pub fn record_ids(doc: &FormDocument, config: &LedgerConfig) -> RecordIds {
    RecordIds {
        valve_id: doc.valve_id.clone(),
        ledger_id: doc
            .ledger_id
            .clone()
            .or_else(|| RecordId::parse(&config.general.ledger_id)),
    }
}

/// Open a session over the document and start its event loop.
pub fn start_session(
    doc: &FormDocument,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<(FormHandle, tokio::task::JoinHandle<CliSession>)> {
    let view = doc
        .to_view(ctx.config.form.total_steps)
        .context("form document does not fit the configured steps")?;
    let settings = SessionSettings::from_config(&ctx.config.form, record_ids(doc, &ctx.config));
    let session = FormSession::open(
        view,
        Arc::clone(&ctx.client),
        Arc::clone(&ctx.client),
        TerminalPrompt::new(flags.yes, flags.quiet),
        settings,
        &doc.attachments,
    )?;
    let (handle, events) = FormHandle::channel(16);
    Ok((handle, tokio::spawn(session.run(events))))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_document_and_falls_back_to_configured_ledger() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"fields": [{{"name": "位号", "value": "FV-1", "required": true}}],
                "attachments": [{{"attachment_type": "定位器", "设备等级": "A"}}]}}"#
        )
        .unwrap();

        let doc = read_document(file.path()).unwrap();
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields[0].step, 1);
        assert_eq!(doc.attachments[0].device_grade, "A");

        let mut config = LedgerConfig::default();
        config.general.ledger_id = "12".into();
        let ids = record_ids(&doc, &config);
        assert_eq!(ids.ledger_id, RecordId::parse("12"));
        assert!(ids.valve_id.is_none());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = read_document(Path::new("/nonexistent/form.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/form.json"));
    }
}
