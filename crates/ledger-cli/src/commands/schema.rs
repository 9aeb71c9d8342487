use ledger_core::entities::{AttachmentRecord, DraftSnapshot};
use ledger_core::responses::{SaveDraftResponse, TagCheckResponse};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `ledgerctl schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::DraftSnapshot => schema_for!(DraftSnapshot),
        SchemaType::Attachment => schema_for!(AttachmentRecord),
        SchemaType::TagCheckResponse => schema_for!(TagCheckResponse),
        SchemaType::SaveDraftResponse => schema_for!(SaveDraftResponse),
    };
    output(&schema, flags.format)
}
