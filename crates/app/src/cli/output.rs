//! `key: value` printing shared by the commands.

use std::path::Path;

use orgchart_app::domain::{
    collaborators::records::CollaboratorRecord, companies::records::CompanyRecord,
};

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

fn path_or_none(value: Option<&Path>) -> String {
    value.map_or_else(|| "none".to_string(), |path| path.display().to_string())
}

pub(crate) fn print_company(company: &CompanyRecord) {
    println!("company_uuid: {}", company.uuid);
    println!("name: {}", company.name);
    println!("slug: {}", company.slug);
    println!("tax_id: {}", or_none(company.tax_id.as_deref()));
    println!("description: {}", or_none(company.description.as_deref()));
    println!("logo_path: {}", path_or_none(company.logo_path.as_deref()));
    println!("theme: {}", company.theme);
    println!("created_at: {}", company.created_at);
    println!("updated_at: {}", company.updated_at);
}

pub(crate) fn print_collaborator(collaborator: &CollaboratorRecord) {
    println!("collaborator_uuid: {}", collaborator.uuid);
    println!("company_uuid: {}", collaborator.company_uuid);
    println!("name: {}", collaborator.name);
    println!("role: {}", collaborator.role);
    println!("email: {}", or_none(collaborator.email.as_deref()));
    println!("department: {}", or_none(collaborator.department.as_deref()));
    println!("phone: {}", or_none(collaborator.phone.as_deref()));
    println!(
        "photo_path: {}",
        path_or_none(collaborator.photo_path.as_deref())
    );
    println!(
        "manager_uuid: {}",
        collaborator
            .manager_uuid
            .map_or_else(|| "none".to_string(), |manager| manager.to_string())
    );
}
