//! Writes generated sites under the sites root.
//!
//! Each run is staged in a hidden sibling directory and swapped into
//! `<root>/<slug>` by rename, so readers see either the previous site or the
//! new one. Runs for the same company are serialized.

use std::{
    collections::hash_map::Entry,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use rustc_hash::FxHashMap;
use tokio::{fs, sync::Mutex as AsyncMutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    collaborators::records::CollaboratorRecord,
    companies::records::{CompanyRecord, CompanyUuid},
    sites::{
        assets::publish_assets, errors::SitesServiceError, hierarchy::build_hierarchy,
        render::render_page,
    },
};

/// File name of the rendered page inside a site directory.
pub const INDEX_FILE: &str = "index.html";

const STAGING_PREFIX: &str = ".staging-";
const RETIRED_PREFIX: &str = ".retired-";

type CompanyLocks = FxHashMap<CompanyUuid, Arc<AsyncMutex<()>>>;

#[derive(Debug, Clone)]
pub struct SitePublisher {
    root: PathBuf,
    locks: Arc<Mutex<CompanyLocks>>,
}

impl SitePublisher {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::default(),
        }
    }

    /// Directory a site with `slug` is published to.
    ///
    /// # Errors
    ///
    /// Returns [`SitesServiceError::InvalidSlug`] unless the slug is a
    /// non-empty run of lowercase ASCII letters, digits and hyphens.
    pub fn site_dir(&self, slug: &str) -> Result<PathBuf, SitesServiceError> {
        let valid = !slug.is_empty()
            && !slug.starts_with('-')
            && slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');

        if !valid {
            return Err(SitesServiceError::InvalidSlug(slug.to_string()));
        }

        Ok(self.root.join(slug))
    }

    /// Render `company` and its collaborators and publish the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the slug is unusable, or when staging or swapping
    /// fails. In both cases the previously published site is left in place.
    pub async fn publish(
        &self,
        company: &CompanyRecord,
        collaborators: Vec<CollaboratorRecord>,
    ) -> Result<PathBuf, SitesServiceError> {
        let target = self.site_dir(&company.slug)?;

        let lock = self.company_lock(company.uuid);

        let published = {
            let _guard = lock.lock().await;
            self.publish_locked(company, collaborators, &target).await
        };

        self.release_lock(company.uuid, lock);

        published?;

        info!(
            company_uuid = %company.uuid,
            slug = %company.slug,
            path = %target.display(),
            "published site"
        );

        Ok(target)
    }

    async fn publish_locked(
        &self,
        company: &CompanyRecord,
        collaborators: Vec<CollaboratorRecord>,
        target: &Path,
    ) -> Result<(), SitesServiceError> {
        fs::create_dir_all(&self.root).await?;

        let staging = self.root.join(format!("{STAGING_PREFIX}{}", Uuid::now_v7()));

        if let Err(error) = stage(&staging, company, collaborators).await {
            remove_dir_quietly(&staging).await;
            return Err(error);
        }

        self.swap(&staging, target).await
    }

    /// Remove the site published under `slug`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error for an unusable slug or when the directory cannot be
    /// moved out of the way.
    pub async fn unpublish(&self, slug: &str) -> Result<bool, SitesServiceError> {
        let target = self.site_dir(slug)?;
        let retired = self.root.join(format!("{RETIRED_PREFIX}{}", Uuid::now_v7()));

        match fs::rename(&target, &retired).await {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(error) => return Err(error.into()),
        }

        remove_dir_quietly(&retired).await;

        info!(slug, "unpublished site");

        Ok(true)
    }

    fn company_lock(&self, company: CompanyUuid) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        match locks.entry(company) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::default())),
        }
    }

    /// Drop the map's entry for `company` once no other run holds or waits on
    /// it. Clones are only handed out under the map lock, so the count cannot
    /// grow while it is held.
    fn release_lock(&self, company: CompanyUuid, lock: Arc<AsyncMutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        if Arc::strong_count(&lock) == 2 {
            locks.remove(&company);
        }
    }

    /// Move `staging` into place at `target`, restoring the previous site if
    /// the final rename fails.
    async fn swap(&self, staging: &Path, target: &Path) -> Result<(), SitesServiceError> {
        let retired = self.root.join(format!("{RETIRED_PREFIX}{}", Uuid::now_v7()));

        let replaced = match fs::rename(target, &retired).await {
            Ok(()) => true,
            Err(error) if error.kind() == io::ErrorKind::NotFound => false,
            Err(error) => {
                remove_dir_quietly(staging).await;
                return Err(error.into());
            }
        };

        if let Err(error) = fs::rename(staging, target).await {
            if replaced && let Err(restore) = fs::rename(&retired, target).await {
                warn!(
                    error = %restore,
                    retired = %retired.display(),
                    "could not restore previous site"
                );
            }

            remove_dir_quietly(staging).await;

            return Err(error.into());
        }

        if replaced {
            remove_dir_quietly(&retired).await;
        }

        Ok(())
    }
}

async fn stage(
    staging: &Path,
    company: &CompanyRecord,
    collaborators: Vec<CollaboratorRecord>,
) -> Result<(), SitesServiceError> {
    fs::create_dir_all(staging).await?;

    let assets = publish_assets(company, collaborators, staging).await?;
    let forest = build_hierarchy(assets.collaborators);

    debug!(
        roots = forest.len(),
        collaborators = forest.iter().map(|root| root.size()).sum::<usize>(),
        "built hierarchy"
    );

    let html = render_page(company, assets.logo.as_deref(), &forest)?;

    fs::write(staging.join(INDEX_FILE), html).await?;

    Ok(())
}

async fn remove_dir_quietly(path: &Path) {
    match fs::remove_dir_all(path).await {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => warn!(%error, path = %path.display(), "could not remove directory"),
    }
}
