use clap::Args;
use orgchart_app::{context::AppContext, domain::companies::records::CompanyUuid};

use crate::cli::failure;

#[derive(Debug, Args)]
pub(crate) struct GenerateSiteArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,
}

pub(crate) async fn run(ctx: &AppContext, args: GenerateSiteArgs) -> Result<(), String> {
    let site = ctx
        .sites
        .generate_site(args.company, ctx.public_base_url.clone())
        .await
        .map_err(|error| failure("failed to generate site", &error))?;

    println!("slug: {}", site.slug);
    println!("public_url: {}", site.public_url);
    println!("path: {}", site.path.display());

    Ok(())
}
