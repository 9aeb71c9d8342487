use ledger_form::SaveApplied;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DraftCommands;
use crate::commands::shared::{read_document, start_session};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DraftPushOutput {
    status: &'static str,
    valve_id: Option<String>,
    message: Option<String>,
}

/// Handle `ledgerctl draft`.
pub async fn handle(
    action: &DraftCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DraftCommands::Push { file } => {
            let doc = read_document(file)?;
            let (handle, task) = start_session(&doc, ctx, flags)?;
            let applied = handle.flush().await?;
            drop(handle);
            let session = task.await?;

            let (status, message) = describe(applied);
            output(
                &DraftPushOutput {
                    status,
                    valve_id: session.autosaver().valve_id().map(ToString::to_string),
                    message,
                },
                flags.format,
            )
        }
        DraftCommands::Show { file } => {
            let doc = read_document(file)?;
            let (handle, task) = start_session(&doc, ctx, flags)?;
            drop(handle);
            let session = task.await?;
            let snapshot = session
                .autosaver()
                .snapshot(session.view(), session.attachments());
            output(&snapshot, flags.format)
        }
    }
}

fn describe(applied: SaveApplied) -> (&'static str, Option<String>) {
    match applied {
        SaveApplied::Adopted(_) => ("adopted", None),
        SaveApplied::Saved => ("saved", None),
        SaveApplied::Stale => ("stale", None),
        SaveApplied::Refused(message) => ("refused", message),
        SaveApplied::Failed => ("failed", Some("see log output for the transport error".into())),
    }
}
