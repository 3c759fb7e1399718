//! Company Data

use std::path::PathBuf;

use crate::domain::companies::theme::Theme;

/// New Company Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCompany {
    pub name: String,
    pub tax_id: Option<String>,
    pub logo_path: Option<PathBuf>,
    pub description: Option<String>,
    pub theme: Theme,
}

/// Company Update Data
///
/// `name`, `theme` and `logo_path` keep the stored value when `None`.
/// `tax_id` and `description` are always replaced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub logo_path: Option<PathBuf>,
    pub description: Option<String>,
    pub theme: Option<Theme>,
}
