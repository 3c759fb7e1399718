use clap::Args;
use orgchart_app::{context::AppContext, domain::companies::records::CompanyUuid};

use crate::cli::{failure, output::print_collaborator};

#[derive(Debug, Args)]
pub(crate) struct ListCollaboratorsArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,
}

pub(crate) async fn run(ctx: &AppContext, args: ListCollaboratorsArgs) -> Result<(), String> {
    let collaborators = ctx
        .collaborators
        .list_collaborators(args.company)
        .await
        .map_err(|error| failure("failed to list collaborators", &error))?;

    if collaborators.is_empty() {
        println!("no collaborators found for company {}", args.company);
        return Ok(());
    }

    for collaborator in collaborators {
        print_collaborator(&collaborator);
        println!();
    }

    Ok(())
}
