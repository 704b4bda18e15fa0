use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Shell(args) => commands::shell::handle(&args, ctx, flags).await,
        Commands::Speak(args) => commands::speak::handle(&args, ctx, flags).await,
        Commands::Export(args) => commands::export::handle(&args, ctx, flags),
        Commands::Schema => commands::schema::handle(flags),
    }
}
