use clap::{Args, Subcommand};
use orgchart_app::context::AppContext;

mod create;
mod delete;
mod list;
mod update;

#[derive(Debug, Args)]
pub(crate) struct CollaboratorCommand {
    #[command(subcommand)]
    command: CollaboratorSubcommand,
}

#[derive(Debug, Subcommand)]
enum CollaboratorSubcommand {
    /// List a company's collaborators
    List(list::ListCollaboratorsArgs),

    /// Add a collaborator to a company
    Create(create::CreateCollaboratorArgs),

    /// Change a collaborator's details or manager
    Update(update::UpdateCollaboratorArgs),

    /// Remove a collaborator; their reports become top-level
    Delete(delete::DeleteCollaboratorArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: CollaboratorCommand) -> Result<(), String> {
    match command.command {
        CollaboratorSubcommand::List(args) => list::run(ctx, args).await,
        CollaboratorSubcommand::Create(args) => create::run(ctx, args).await,
        CollaboratorSubcommand::Update(args) => update::run(ctx, args).await,
        CollaboratorSubcommand::Delete(args) => delete::run(ctx, args).await,
    }
}
