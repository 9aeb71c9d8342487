use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::CheckTag(args) => commands::check_tag::handle(&args, ctx, flags).await,
        Commands::Draft { action } => commands::draft::handle(&action, ctx, flags).await,
        Commands::Submit(args) => commands::submit::handle(&args, ctx, flags).await,
        Commands::Batch(args) => commands::batch::handle(&args, ctx, flags).await,
        Commands::Decide(args) => commands::decide::handle(&args, ctx, flags).await,
        Commands::Filter { action } => commands::filter::handle(&action, flags),
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
