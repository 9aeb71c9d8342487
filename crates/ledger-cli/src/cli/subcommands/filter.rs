use std::path::PathBuf;

use clap::Subcommand;

/// Column filters on list URLs.
#[derive(Clone, Debug, Subcommand)]
pub enum FilterCommands {
    /// Replace a field's filter values.
    Apply {
        /// Current page URL.
        url: String,
        #[arg(long)]
        field: String,
        /// Values to check. Without `--catalog` they are also the options.
        #[arg(long = "value")]
        values: Vec<String>,
        /// Page filter maps (`{"options": {..}, "active": {..}}`). The
        /// dropdown starts from the active filter unless values are given.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Remove a field's filter.
    Clear {
        /// Current page URL.
        url: String,
        #[arg(long)]
        field: String,
    },
}
