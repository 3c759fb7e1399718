use clap::{Args, Subcommand};
use orgchart_app::context::AppContext;

mod generate;

#[derive(Debug, Args)]
pub(crate) struct SiteCommand {
    #[command(subcommand)]
    command: SiteSubcommand,
}

#[derive(Debug, Subcommand)]
enum SiteSubcommand {
    /// Render and publish a company's org chart
    Generate(generate::GenerateSiteArgs),
}

pub(crate) async fn run(ctx: &AppContext, command: SiteCommand) -> Result<(), String> {
    match command.command {
        SiteSubcommand::Generate(args) => generate::run(ctx, args).await,
    }
}
