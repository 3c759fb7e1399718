use orgchart_app::context::AppContext;

use crate::cli::failure;

pub(crate) async fn run(ctx: &AppContext) -> Result<(), String> {
    let companies = ctx
        .companies
        .list_companies()
        .await
        .map_err(|error| failure("failed to list companies", &error))?;

    if companies.is_empty() {
        println!("no companies found");
        return Ok(());
    }

    for company in companies {
        println!("company_uuid: {}", company.uuid);
        println!("name: {}", company.name);
        println!("slug: {}", company.slug);
        println!();
    }

    Ok(())
}
