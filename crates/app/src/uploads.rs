//! Canonical storage for uploaded logos and photos.
//!
//! Records reference files by the path returned from [`AssetStore::import`];
//! generated sites copy from there.

use std::{
    ffi::OsStr,
    io,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Extension used when the source file has none.
const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Photo,
}

impl AssetKind {
    fn dir(self) -> &'static str {
        match self {
            Self::Logo => "logos",
            Self::Photo => "photos",
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("file {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("could not store asset")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Copy `source` into the store under a fresh name and return the stored
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`AssetStoreError::SourceMissing`] when `source` is not a file,
    /// or an I/O error when the copy fails.
    pub async fn import(&self, kind: AssetKind, source: &Path) -> Result<PathBuf, AssetStoreError> {
        match fs::metadata(source).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(AssetStoreError::SourceMissing(source.to_path_buf())),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(AssetStoreError::SourceMissing(source.to_path_buf()));
            }
            Err(error) => return Err(error.into()),
        }

        let dir = self.root.join(kind.dir());
        fs::create_dir_all(&dir).await?;

        let extension = source
            .extension()
            .and_then(OsStr::to_str)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase);

        let stored = dir.join(format!("{}.{extension}", Uuid::now_v7()));

        fs::copy(source, &stored).await?;

        info!(source = %source.display(), stored = %stored.display(), "imported asset");

        Ok(stored)
    }

    /// Delete a stored asset. Paths outside the store are left alone.
    ///
    /// Returns whether a file was removed; failures are logged, not raised,
    /// since the owning record has already been written.
    pub async fn discard(&self, path: &Path) -> bool {
        if !self.owns(path) {
            debug!(path = %path.display(), "not a stored asset, keeping");
            return false;
        }

        match fs::remove_file(path).await {
            Ok(()) => {
                info!(path = %path.display(), "discarded asset");
                true
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => false,
            Err(error) => {
                warn!(%error, path = %path.display(), "could not discard asset");
                false
            }
        }
    }

    fn owns(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
            && path != self.root
            && !path
                .components()
                .any(|component| matches!(component, Component::ParentDir))
    }
}
