//! Remove action - drops a package from the registry and deletes its
//! working copy.

use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::error::GitgetError;
use crate::registry::RegistryStore;
use crate::runtime::Runtime;

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Keep the working copy on disk
    pub soft: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry is gone; `deleted` tells whether files were removed too.
    Removed {
        name: String,
        location: PathBuf,
        deleted: bool,
    },
    /// The user declined; nothing changed.
    Cancelled,
}

pub struct RemoveAction<'a, R: Runtime> {
    runtime: &'a R,
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime> RemoveAction<'a, R> {
    pub fn new(runtime: &'a R, registry_path: &Path) -> Self {
        Self {
            runtime,
            store: RegistryStore::new(runtime, registry_path),
        }
    }

    /// Remove `name`.
    ///
    /// The registry entry is removed and saved first; the working copy is
    /// deleted afterwards. If deletion fails the entry stays removed and
    /// `DeleteFailed` is returned.
    #[tracing::instrument(skip(self))]
    pub fn remove(&self, name: &str, options: RemoveOptions) -> Result<RemoveOutcome> {
        let mut registry = self.store.load()?;

        let location = registry
            .location(name)
            .map(Path::to_path_buf)
            .ok_or_else(|| GitgetError::PackageNotFound {
                name: name.to_string(),
            })?;

        if !options.soft && !options.yes {
            let prompt = format!("Are you sure you want to delete {}?", location.display());
            if !self.runtime.confirm(&prompt)? {
                debug!("Removal of {} declined", name);
                return Ok(RemoveOutcome::Cancelled);
            }
        }

        registry.remove(name);
        self.store.save(&registry)?;
        debug!("Removed {} from the package list", name);

        if options.soft {
            debug!("Soft remove, leaving {:?} in place", location);
            return Ok(RemoveOutcome::Removed {
                name: name.to_string(),
                location,
                deleted: false,
            });
        }

        if !self.runtime.exists(&location) {
            warn!("{} was already gone", location.display());
            return Ok(RemoveOutcome::Removed {
                name: name.to_string(),
                location,
                deleted: false,
            });
        }

        self.runtime
            .remove_dir_all(&location)
            .map_err(|e| GitgetError::DeleteFailed {
                name: name.to_string(),
                path: location.clone(),
                message: format!("{:#}", e),
            })?;

        Ok(RemoveOutcome::Removed {
            name: name.to_string(),
            location,
            deleted: true,
        })
    }
}
