//! Test Helpers

use crate::{
    domain::{
        collaborators::{
            CollaboratorsService,
            data::NewCollaborator,
            records::{CollaboratorRecord, CollaboratorUuid},
        },
        companies::{
            CompaniesService,
            data::NewCompany,
            records::{CompanyRecord, CompanyUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_company(ctx: &TestContext, name: &str) -> CompanyRecord {
    ctx.companies
        .create_company(NewCompany {
            name: name.to_string(),
            ..NewCompany::default()
        })
        .await
        .expect("create_company should succeed")
}

pub(crate) async fn create_collaborator(
    ctx: &TestContext,
    company: CompanyUuid,
    name: &str,
    manager: Option<CollaboratorUuid>,
) -> CollaboratorRecord {
    ctx.collaborators
        .create_collaborator(company, new_collaborator(name, manager))
        .await
        .expect("create_collaborator should succeed")
}

pub(crate) fn new_collaborator(name: &str, manager: Option<CollaboratorUuid>) -> NewCollaborator {
    NewCollaborator {
        name: name.to_string(),
        role: "Analyst".to_string(),
        manager_uuid: manager,
        ..NewCollaborator::default()
    }
}
