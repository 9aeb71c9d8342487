use ledger_core::enums::ToastKind;
use ledger_core::ids::RecordId;
use ledger_core::ports::{TagValidator, UserPrompt};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckTagArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::TerminalPrompt;

#[derive(Debug, Serialize)]
struct CheckTagOutput {
    tag: String,
    valid: bool,
    message: Option<String>,
}

/// Handle `ledgerctl check-tag`.
pub async fn handle(
    args: &CheckTagArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let tag = args.tag.trim();
    anyhow::ensure!(!tag.is_empty(), "tag must not be blank");

    let exclude_id = args.exclude_id.as_deref().and_then(RecordId::parse);
    let response = ctx.client.check_tag(tag, exclude_id.as_ref()).await?;

    if !response.valid {
        let prompt = TerminalPrompt::new(flags.yes, flags.quiet);
        prompt.toast(
            response
                .message
                .as_deref()
                .unwrap_or(ledger_form::tag_check::DUPLICATE_TAG_MESSAGE),
            ToastKind::Warning,
        );
    }

    output(
        &CheckTagOutput {
            tag: tag.to_string(),
            valid: response.valid,
            message: response.message,
        },
        flags.format,
    )
}
