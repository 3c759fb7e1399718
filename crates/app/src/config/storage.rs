//! Filesystem Config

use std::path::PathBuf;

use clap::Args;

/// Where generated sites are written and how they are reached.
#[derive(Debug, Clone, Args)]
pub struct SitesConfig {
    /// Directory holding one published site per company slug
    #[arg(long, env = "SITES_DIR", default_value = "public/organogramas", global = true)]
    pub sites_dir: PathBuf,

    /// Public base URL sites are served under (e.g. `https://org.example.com`)
    #[arg(long, env = "PUBLIC_BASE_URL", global = true)]
    pub public_base_url: Option<String>,
}

/// Uploaded media settings.
#[derive(Debug, Clone, Args)]
pub struct UploadsConfig {
    /// Directory holding imported logos and photos
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads", global = true)]
    pub uploads_dir: PathBuf,
}
