//! Copies logo and photo files into a site's `assets/` directory.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::debug;

use crate::domain::{collaborators::records::CollaboratorRecord, companies::records::CompanyRecord};

/// Directory, relative to the site root, holding copied media.
pub const ASSETS_DIR: &str = "assets";

/// Result of staging a company's media into a site directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedAssets {
    /// Site-relative logo URL, when the logo file exists.
    pub logo: Option<String>,

    /// Input collaborators with `photo_path` rewritten to a site-relative
    /// path, or cleared when the photo file is missing.
    pub collaborators: Vec<CollaboratorRecord>,
}

/// Copy every referenced media file that still exists into
/// `<destination>/assets/`.
///
/// Files are renamed after their owner (`logo.<ext>`, `<collaborator>.<ext>`),
/// so repeated runs produce the same layout and two uploads sharing a file
/// name cannot overwrite each other.
///
/// # Errors
///
/// Returns an error when the assets directory cannot be created or an existing
/// file fails to copy. Missing files are skipped.
pub async fn publish_assets(
    company: &CompanyRecord,
    collaborators: Vec<CollaboratorRecord>,
    destination: &Path,
) -> io::Result<PublishedAssets> {
    let assets_dir = destination.join(ASSETS_DIR);

    fs::create_dir_all(&assets_dir).await?;

    let logo = match company.logo_path.as_deref() {
        Some(source) => copy_asset(source, &assets_dir, "logo").await?,
        None => None,
    };

    let mut published = Vec::with_capacity(collaborators.len());

    for mut collaborator in collaborators {
        collaborator.photo_path = match collaborator.photo_path.take() {
            Some(source) => copy_asset(&source, &assets_dir, &collaborator.uuid.to_string())
                .await?
                .map(PathBuf::from),
            None => None,
        };

        published.push(collaborator);
    }

    Ok(PublishedAssets {
        logo,
        collaborators: published,
    })
}

async fn copy_asset(source: &Path, assets_dir: &Path, stem: &str) -> io::Result<Option<String>> {
    match fs::metadata(source).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) | Err(_) => {
            debug!(source = %source.display(), "referenced asset missing, skipping");
            return Ok(None);
        }
    }

    let file_name = match source
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        Some(ext) => format!("{stem}.{}", ext.to_ascii_lowercase()),
        None => stem.to_string(),
    };

    fs::copy(source, assets_dir.join(&file_name)).await?;

    Ok(Some(format!("{ASSETS_DIR}/{file_name}")))
}
