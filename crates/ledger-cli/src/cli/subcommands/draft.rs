use std::path::PathBuf;

use clap::Subcommand;

/// Draft auto-save.
#[derive(Clone, Debug, Subcommand)]
pub enum DraftCommands {
    /// Load a form document and push one draft snapshot right away.
    Push {
        /// Form document (JSON).
        file: PathBuf,
    },
    /// Print the snapshot that would be pushed, without sending it.
    Show {
        /// Form document (JSON).
        file: PathBuf,
    },
}
