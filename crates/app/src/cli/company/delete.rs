use clap::Args;
use orgchart_app::{context::AppContext, domain::companies::records::CompanyUuid};

use crate::cli::failure;

#[derive(Debug, Args)]
pub(crate) struct DeleteCompanyArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,
}

pub(crate) async fn run(ctx: &AppContext, args: DeleteCompanyArgs) -> Result<(), String> {
    let company = ctx
        .companies
        .get_company(args.company)
        .await
        .map_err(|error| failure("failed to load company", &error))?;

    let collaborators = ctx
        .collaborators
        .list_collaborators(args.company)
        .await
        .map_err(|error| failure("failed to load collaborators", &error))?;

    ctx.companies
        .delete_company(args.company)
        .await
        .map_err(|error| failure("failed to delete company", &error))?;

    let media = company
        .logo_path
        .iter()
        .chain(collaborators.iter().filter_map(|c| c.photo_path.as_ref()));

    for path in media {
        ctx.assets.discard(path).await;
    }

    let unpublished = ctx
        .sites
        .unpublish_site(&company.slug)
        .await
        .map_err(|error| failure("failed to remove published site", &error))?;

    println!("deleted: {}", company.uuid);
    println!("collaborators_deleted: {}", collaborators.len());
    println!("site_unpublished: {unpublished}");

    Ok(())
}
