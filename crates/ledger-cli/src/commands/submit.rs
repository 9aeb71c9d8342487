use ledger_core::enums::ToastKind;
use ledger_core::ports::{BatchGateway, UserPrompt};
use ledger_form::SubmitDecision;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::commands::shared::{read_document, start_session};
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::TerminalPrompt;

#[derive(Debug, Serialize)]
struct SubmitOutput {
    url: String,
    status: u16,
    fields: usize,
}

/// Handle `ledgerctl submit`.
pub async fn handle(
    args: &SubmitArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let doc = read_document(&args.file)?;
    let url = match &args.url {
        Some(url) => url.clone(),
        None => ctx.config.endpoints.require("form_submit_url")?.to_string(),
    };

    let (handle, task) = start_session(&doc, ctx, flags)?;
    let decision = handle.submit().await?;
    drop(handle);
    task.await?;

    let form = match decision {
        SubmitDecision::Proceed(form) => form,
        SubmitDecision::Blocked { invalid } => {
            anyhow::bail!("submission blocked, required fields are empty: {}", invalid.join(", "))
        }
    };

    let page = ctx.client.post_form(&url, &form.fields).await?;
    TerminalPrompt::new(flags.yes, flags.quiet).toast("Form submitted", ToastKind::Success);
    output(
        &SubmitOutput {
            url: page.url,
            status: page.status,
            fields: form.fields.len(),
        },
        flags.format,
    )
}
