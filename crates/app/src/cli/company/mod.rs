use clap::{Args, Subcommand};
use orgchart_app::context::AppContext;

mod create;
mod delete;
mod list;
mod show;
mod update;

#[derive(Debug, Args)]
pub(crate) struct CompanyCommand {
    #[command(subcommand)]
    command: CompanySubcommand,
}

#[derive(Debug, Subcommand)]
enum CompanySubcommand {
    /// List all companies
    List,

    /// Show one company
    Show(show::ShowCompanyArgs),

    /// Register a company
    Create(create::CreateCompanyArgs),

    /// Change a company's details
    Update(update::UpdateCompanyArgs),

    /// Delete a company, its collaborators and its published site
    Delete(delete::DeleteCompanyArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: CompanyCommand) -> Result<(), String> {
    match command.command {
        CompanySubcommand::List => list::run(ctx).await,
        CompanySubcommand::Show(args) => show::run(ctx, args).await,
        CompanySubcommand::Create(args) => create::run(ctx, args).await,
        CompanySubcommand::Update(args) => update::run(ctx, args).await,
        CompanySubcommand::Delete(args) => delete::run(ctx, args).await,
    }
}
