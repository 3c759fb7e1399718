use std::path::PathBuf;

use clap::Args;
use orgchart_app::{
    context::AppContext,
    domain::companies::{data::NewCompany, theme::Theme},
    uploads::AssetKind,
};

use crate::cli::{failure, output::print_company};

#[derive(Debug, Args)]
pub(crate) struct CreateCompanyArgs {
    /// Company display name
    #[arg(long)]
    name: String,

    /// Tax identifier (e.g. CNPJ)
    #[arg(long)]
    tax_id: Option<String>,

    /// Short description shown under the name
    #[arg(long)]
    description: Option<String>,

    /// Logo image to import into the uploads directory
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Background theme: `solid[:color]`, `gradient:<spec>` or `image:<url>`
    #[arg(long, default_value = "solid")]
    theme: Theme,
}

pub(crate) async fn run(ctx: &AppContext, args: CreateCompanyArgs) -> Result<(), String> {
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
        .create_company(NewCompany {
            name: args.name,
            tax_id: args.tax_id,
            logo_path: logo_path.clone(),
            description: args.description,
            theme: args.theme,
        })
        .await;

    let company = match result {
        Ok(company) => company,
        Err(error) => {
            if let Some(logo_path) = &logo_path {
                ctx.assets.discard(logo_path).await;
            }

            return Err(failure("failed to create company", &error));
        }
    };

    print_company(&company);

    Ok(())
}
