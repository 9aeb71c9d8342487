use ledger_core::enums::BatchAction;
use ledger_list::{BatchActionRunner, LedgerDecision, PageLayout};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{DecideArgs, Decision};
use crate::commands::batch::summarize;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::{RecordingNavigator, TerminalPrompt};

/// Handle `ledgerctl decide`.
pub async fn handle(
    args: &DecideArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (decision, action) = match args.decision {
        Decision::Approve => (LedgerDecision::Approve, BatchAction::Approve),
        Decision::Reject => (LedgerDecision::Reject, BatchAction::Reject),
    };
    let fields: Vec<(String, String)> = args
        .comment
        .iter()
        .map(|comment| ("comment".to_string(), comment.clone()))
        .collect();

    let runner = BatchActionRunner::new(
        ctx.client.as_ref().clone(),
        TerminalPrompt::new(flags.yes, flags.quiet),
        RecordingNavigator::default(),
    );
    let outcome = runner.decide(decision, &args.url, &fields).await?;
    let summary = summarize(action, PageLayout::Detail, 0, &outcome, runner.navigator());
    output(&summary, flags.format)
}
