//! List action - retrieves tracked packages.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::registry::RegistryStore;
use crate::runtime::Runtime;

/// Information about a tracked package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Package name (owner/repo or local_<dir>)
    pub name: String,
    /// Absolute path of the working copy
    pub location: PathBuf,
}

/// List action - queries the registry
pub struct ListAction<'a, R: Runtime> {
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime> ListAction<'a, R> {
    pub fn new(runtime: &'a R, registry_path: &Path) -> Self {
        Self {
            store: RegistryStore::new(runtime, registry_path),
        }
    }

    /// All packages, sorted by name
    pub fn list_packages(&self) -> Result<Vec<PackageInfo>> {
        let registry = self.store.load()?;

        Ok(registry
            .iter()
            .map(|(name, record)| PackageInfo {
                name: name.clone(),
                location: record.location.clone(),
            })
            .collect())
    }
}
