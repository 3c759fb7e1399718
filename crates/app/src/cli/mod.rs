use std::{error::Error, fmt::Write as _};

use clap::{Parser, Subcommand};
use orgchart_app::{config::AppConfig, context::AppContext, logging};

mod collaborator;
mod company;
mod output;
mod site;

#[derive(Debug, Parser)]
#[command(name = "orgchart-app", about = "Org chart builder CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Company(company::CompanyCommand),
    Collaborator(collaborator::CollaboratorCommand),
    Site(site::SiteCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init_subscriber(&self.config.logging)
            .map_err(|error| failure("failed to initialise logging", &error))?;

        let ctx = AppContext::from_config(&self.config)
            .await
            .map_err(|error| failure("failed to start", &error))?;

        match self.command {
            Commands::Company(command) => company::run(&ctx, command).await,
            Commands::Collaborator(command) => collaborator::run(&ctx, command).await,
            Commands::Site(command) => site::run(&ctx, command).await,
        }
    }
}

/// `context: error: source: ...`, since service errors keep their cause in
/// the source chain.
pub(crate) fn failure(context: &str, error: &dyn Error) -> String {
    let mut message = format!("{context}: {error}");
    let mut source = error.source();

    while let Some(cause) = source {
        _ = write!(message, ": {cause}");
        source = cause.source();
    }

    message
}
