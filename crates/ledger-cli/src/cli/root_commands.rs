use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use ledger_core::enums::BatchAction;
use ledger_list::PageLayout;

use crate::cli::subcommands::{DraftCommands, FilterCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Ask the server whether a tag is already in use.
    CheckTag(CheckTagArgs),
    /// Draft auto-save.
    Draft {
        #[command(subcommand)]
        action: DraftCommands,
    },
    /// Run the submit gate on a form document and post it.
    Submit(SubmitArgs),
    /// Apply a batch action to a set of record ids.
    Batch(BatchArgs),
    /// Approve or reject a whole ledger.
    Decide(DecideArgs),
    /// Rewrite a list URL's filter parameters.
    Filter {
        #[command(subcommand)]
        action: FilterCommands,
    },
    /// Print the JSON schema of a wire type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CheckTagArgs {
    /// Tag value to check.
    pub tag: String,
    /// Id of the record being edited, so its own tag does not count.
    #[arg(long)]
    pub exclude_id: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    /// Form document (JSON).
    pub file: PathBuf,
    /// Target URL (defaults to endpoints.form_submit_url).
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct BatchArgs {
    /// approve, reject, delete, export or submit.
    #[arg(value_parser = parse_batch_action)]
    pub action: BatchAction,
    /// Checked record ids (repeatable or comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,
    /// Page layout the ids come from (defaults to general.default_page).
    #[arg(long, value_parser = parse_page_layout)]
    pub page: Option<PageLayout>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Clone, Debug, Args)]
pub struct DecideArgs {
    pub decision: Decision,
    /// The ledger's approve or reject URL.
    #[arg(long)]
    pub url: String,
    /// Reviewer comment.
    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    DraftSnapshot,
    Attachment,
    TagCheckResponse,
    SaveDraftResponse,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Wire type to describe.
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

fn parse_batch_action(raw: &str) -> Result<BatchAction, String> {
    raw.parse().map_err(|e: ledger_core::errors::CoreError| e.to_string())
}

fn parse_page_layout(raw: &str) -> Result<PageLayout, String> {
    raw.parse().map_err(|e: ledger_core::errors::CoreError| e.to_string())
}
