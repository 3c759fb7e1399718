use std::path::PathBuf;

use clap::Args;
use orgchart_app::{
    context::AppContext,
    domain::{
        collaborators::{data::CollaboratorUpdate, records::CollaboratorUuid},
        companies::records::CompanyUuid,
    },
    uploads::AssetKind,
};

use crate::cli::{failure, output::print_collaborator};

/// `--name`, `--role` and `--photo` keep their value when omitted; contact
/// fields and `--manager` are replaced, so leaving out `--manager` makes the
/// collaborator top-level.
#[derive(Debug, Args)]
pub(crate) struct UpdateCollaboratorArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,

    /// Collaborator UUID
    #[arg(long)]
    collaborator: CollaboratorUuid,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    role: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    department: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Replacement photo
    #[arg(long)]
    photo: Option<PathBuf>,

    /// UUID of the collaborator this one reports to
    #[arg(long)]
    manager: Option<CollaboratorUuid>,
}

pub(crate) async fn run(ctx: &AppContext, args: UpdateCollaboratorArgs) -> Result<(), String> {
    let existing = ctx
        .collaborators
        .get_collaborator(args.company, args.collaborator)
        .await
        .map_err(|error| failure("failed to load collaborator", &error))?;

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
        .update_collaborator(
            args.company,
            args.collaborator,
            CollaboratorUpdate {
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

            return Err(failure("failed to update collaborator", &error));
        }
    };

    if let (Some(_), Some(previous)) = (&photo_path, &existing.photo_path) {
        ctx.assets.discard(previous).await;
    }

    print_collaborator(&collaborator);

    Ok(())
}
