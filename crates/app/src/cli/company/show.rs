use clap::Args;
use orgchart_app::{context::AppContext, domain::companies::records::CompanyUuid};

use crate::cli::{failure, output::print_company};

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct ShowCompanyArgs {
    /// Company UUID
    #[arg(long)]
    company: Option<CompanyUuid>,

    /// Company slug
    #[arg(long)]
    slug: Option<String>,
}

pub(crate) async fn run(ctx: &AppContext, args: ShowCompanyArgs) -> Result<(), String> {
    let company = match (args.company, args.slug) {
        (Some(uuid), _) => ctx.companies.get_company(uuid).await,
        (None, Some(slug)) => ctx.companies.get_company_by_slug(&slug).await,
        (None, None) => return Err("either --company or --slug is required".to_string()),
    }
    .map_err(|error| failure("failed to load company", &error))?;

    print_company(&company);

    Ok(())
}
