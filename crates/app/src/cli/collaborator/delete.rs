use clap::Args;
use orgchart_app::{
    context::AppContext,
    domain::{collaborators::records::CollaboratorUuid, companies::records::CompanyUuid},
};

use crate::cli::failure;

#[derive(Debug, Args)]
pub(crate) struct DeleteCollaboratorArgs {
    /// Company UUID
    #[arg(long)]
    company: CompanyUuid,

    /// Collaborator UUID
    #[arg(long)]
    collaborator: CollaboratorUuid,
}

pub(crate) async fn run(ctx: &AppContext, args: DeleteCollaboratorArgs) -> Result<(), String> {
    let collaborator = ctx
        .collaborators
        .get_collaborator(args.company, args.collaborator)
        .await
        .map_err(|error| failure("failed to load collaborator", &error))?;

    ctx.collaborators
        .delete_collaborator(args.company, args.collaborator)
        .await
        .map_err(|error| failure("failed to delete collaborator", &error))?;

    if let Some(photo_path) = &collaborator.photo_path {
        ctx.assets.discard(photo_path).await;
    }

    println!("deleted: {}", collaborator.uuid);

    Ok(())
}
