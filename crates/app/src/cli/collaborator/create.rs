use std::path::PathBuf;

use clap::Args;
use orgchart_app::{
    context::AppContext,
    domain::{
        collaborators::{data::NewCollaborator, records::CollaboratorUuid},
        companies::records::CompanyUuid,
    },
    uploads::AssetKind,
};

use crate::cli::{failure, output::print_collaborator};

#[derive(Debug, Args)]
pub(crate) struct CreateCollaboratorArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,

    /// Full name
    #[arg(long)]
    name: String,

    /// Job title
    #[arg(long)]
    role: String,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    department: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Photo to import into the uploads directory
    #[arg(long)]
    photo: Option<PathBuf>,

    /// UUID of the collaborator this one reports to
    #[arg(long)]
    manager: Option<CollaboratorUuid>,
}

pub(crate) async fn run(ctx: &AppContext, args: CreateCollaboratorArgs) -> Result<(), String> {
    let photo_path = match &args.photo {
        Some(source) => Some(
            ctx.assets
                .import(AssetKind::Photo, source)
                .await
                .map_err(|error| failure("failed to import photo", &error))?,
        ),
        None => None,
    };

    let result = ctx
        .collaborators
        .create_collaborator(
            args.company,
            NewCollaborator {
                name: args.name,
                role: args.role,
                email: args.email,
                department: args.department,
                phone: args.phone,
                photo_path: photo_path.clone(),
                manager_uuid: args.manager,
            },
        )
        .await;

    let collaborator = match result {
        Ok(collaborator) => collaborator,
        Err(error) => {
            if let Some(photo_path) = &photo_path {
                ctx.assets.discard(photo_path).await;
            }

            return Err(failure("failed to create collaborator", &error));
        }
    };

    print_collaborator(&collaborator);

    Ok(())
}
