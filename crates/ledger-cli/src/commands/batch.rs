use anyhow::Context;
use ledger_core::enums::{BatchAction, ToastKind};
use ledger_core::ports::UserPrompt;
use ledger_list::{BatchActionRunner, BatchOutcome, BatchTarget, PageLayout, SelectionState};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BatchArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::terminal::{RecordingNavigator, TerminalPrompt};

#[derive(Debug, Serialize)]
pub struct BatchOutput {
    pub action: String,
    pub page: String,
    pub selected: usize,
    pub outcome: &'static str,
    /// Page the browser would be on after the action.
    pub url: Option<String>,
    pub reloaded: bool,
}

/// Handle `ledgerctl batch`.
pub async fn handle(
    args: &BatchArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let page = match args.page {
        Some(page) => page,
        None => ctx
            .config
            .general
            .default_page
            .parse::<PageLayout>()
            .context("invalid general.default_page")?,
    };
    let target = BatchTarget::resolve(args.action, page, &ctx.config.endpoints)?;

    let ids = args
        .ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty());
    let mut selection = page.selection(ids);
    selection.toggle_all(&mut SelectionState::default(), true);

    let runner = BatchActionRunner::new(
        ctx.client.as_ref().clone(),
        TerminalPrompt::new(flags.yes, flags.quiet),
        RecordingNavigator::default(),
    );
    let outcome = runner.run(args.action, &target, &selection).await?;
    if matches!(outcome, BatchOutcome::Reloaded | BatchOutcome::Navigated { .. }) {
        runner.prompt().toast(
            &format!("{} sent for {} records", args.action, selection.count()),
            ToastKind::Success,
        );
    }

    let summary = summarize(
        args.action,
        page,
        selection.count(),
        &outcome,
        runner.navigator(),
    );
    output(&summary, flags.format)
}

pub fn summarize(
    action: BatchAction,
    page: PageLayout,
    selected: usize,
    outcome: &BatchOutcome,
    navigator: &RecordingNavigator,
) -> BatchOutput {
    let outcome = match outcome {
        BatchOutcome::NothingSelected => "nothing_selected",
        BatchOutcome::Cancelled => "cancelled",
        BatchOutcome::Reloaded => "reloaded",
        BatchOutcome::Navigated { .. } => "navigated",
    };
    BatchOutput {
        action: action.to_string(),
        page: page.to_string(),
        selected,
        outcome,
        url: navigator.visited(),
        reloaded: navigator.reloaded(),
    }
}
