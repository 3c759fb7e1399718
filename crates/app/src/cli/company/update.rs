use std::path::PathBuf;

use clap::Args;
use orgchart_app::{
    context::AppContext,
    domain::companies::{data::CompanyUpdate, records::CompanyUuid, theme::Theme},
    uploads::AssetKind,
};

use crate::cli::{failure, output::print_company};

/// Fields left out keep their value, except `--tax-id` and `--description`,
/// which are cleared when omitted.
#[derive(Debug, Args)]
pub(crate) struct UpdateCompanyArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,

    /// New display name; the slug is re-derived when it changes
    #[arg(long)]
    name: Option<String>,

    /// Tax identifier
    #[arg(long)]
    tax_id: Option<String>,

    /// Short description
    #[arg(long)]
    description: Option<String>,

    /// Replacement logo image
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Background theme: `solid[:color]`, `gradient:<spec>` or `image:<url>`
    #[arg(long)]
    theme: Option<Theme>,
}

pub(crate) async fn run(ctx: &AppContext, args: UpdateCompanyArgs) -> Result<(), String> {
    let existing = ctx
        .companies
        .get_company(args.company)
        .await
        .map_err(|error| failure("failed to load company", &error))?;

    let logo_path = match &args.logo {
        Some(source) => Some(
            ctx.assets
                .import(AssetKind::Logo, source)
                .await
                .map_err(|error| failure("failed to import logo", &error))?,
        ),
        None => None,
    };

    let result = ctx
        .companies
        .update_company(
            args.company,
            CompanyUpdate {
                name: args.name,
                tax_id: args.tax_id,
                logo_path: logo_path.clone(),
                description: args.description,
                theme: args.theme,
            },
        )
        .await;

    let company = match result {
        Ok(company) => company,
        Err(error) => {
            if let Some(logo_path) = &logo_path {
                ctx.assets.discard(logo_path).await;
            }

            return Err(failure("failed to update company", &error));
        }
    };

    if let (Some(_), Some(previous)) = (&logo_path, &existing.logo_path) {
        ctx.assets.discard(previous).await;
    }

    if company.slug != existing.slug {
        let removed = ctx
            .sites
            .unpublish_site(&existing.slug)
            .await
            .map_err(|error| failure("failed to remove site under previous slug", &error))?;

        if removed {
            println!("unpublished: {}", existing.slug);
        }
    }

    print_company(&company);

    Ok(())
}
