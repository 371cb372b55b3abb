//! Install action - clones a repository (or adopts a local working copy)
//! and records it in the registry.

use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::error::GitgetError;
use crate::reachability::Reachability;
use crate::registry::{PackageRecord, RegistryStore};
use crate::resolver::{RemoteSource, resolve_local_name, resolve_remote_name};
use crate::runtime::{Runtime, absolutize};
use crate::vcs::VersionControl;

/// Options for the install action
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Package name to use instead of the derived one
    pub name: Option<String>,
    /// Directory to clone into (remote installs only)
    pub target_dir: Option<PathBuf>,
}

/// A package that was just added to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub location: PathBuf,
}

pub struct InstallAction<'a, R: Runtime, V: VersionControl, P: Reachability> {
    runtime: &'a R,
    vcs: &'a V,
    reach: &'a P,
    store: RegistryStore<'a, R>,
    default_host: &'a str,
}

impl<'a, R: Runtime, V: VersionControl, P: Reachability> InstallAction<'a, R, V, P> {
    pub fn new(
        runtime: &'a R,
        vcs: &'a V,
        reach: &'a P,
        registry_path: &Path,
        default_host: &'a str,
    ) -> Self {
        Self {
            runtime,
            vcs,
            reach,
            store: RegistryStore::new(runtime, registry_path),
            default_host,
        }
    }

    /// Clone `descriptor` and track the new working copy.
    ///
    /// Preconditions are checked in order before anything touches the disk:
    /// the name is free, the target directory does not exist, the host
    /// answers. A failed clone leaves the registry untouched.
    #[tracing::instrument(skip(self, options))]
    pub async fn install_remote(
        &self,
        descriptor: &str,
        options: &InstallOptions,
    ) -> Result<InstalledPackage> {
        let mut registry = self.store.load()?;
        let source = RemoteSource::parse(descriptor, self.default_host)?;
        debug!("Resolved source {}", source);

        let name = resolve_remote_name(&registry, &source, options.name.as_deref())?;

        let cwd = self.runtime.current_dir()?;
        let target = match (&options.target_dir, &options.name) {
            (Some(dir), _) => absolutize(&cwd, dir),
            (None, Some(name)) => absolutize(&cwd, Path::new(name)),
            (None, None) => cwd.join(&source.dir_name),
        };
        debug!("Target directory {:?}", target);

        if self.runtime.exists(&target) {
            return Err(GitgetError::DirectoryExists { path: target }.into());
        }

        let reachable = match (&source.check_url, source.url.strip_prefix("file://")) {
            (Some(check_url), _) => {
                debug!("Checking that {} can be reached", check_url);
                self.reach.is_reachable(check_url).await
            }
            (None, Some(local)) => self.runtime.exists(Path::new(local)),
            (None, None) => true,
        };
        if !reachable {
            let host = source.check_url.clone().unwrap_or_else(|| source.url.clone());
            return Err(GitgetError::SourceUnreachable { host }.into());
        }

        info!("Cloning {} into {}", source.url, target.display());
        if let Err(e) = self.vcs.clone_repo(&source.url, &target) {
            if self.runtime.exists(&target) {
                warn!(
                    "Clone of {} failed, partial files may remain at {}",
                    source.url,
                    target.display()
                );
            }
            return Err(GitgetError::CloneFailed {
                url: source.url.clone(),
                message: format!("{:#}", e),
            }
            .into());
        }

        registry.insert(name.clone(), PackageRecord::new(&target));
        self.store.save(&registry)?;

        Ok(InstalledPackage {
            name,
            location: target,
        })
    }

    /// Track an existing directory without cloning anything.
    #[tracing::instrument(skip(self, options))]
    pub fn install_local(&self, path: &Path, options: &InstallOptions) -> Result<InstalledPackage> {
        let mut registry = self.store.load()?;

        let location = absolutize(&self.runtime.current_dir()?, path);
        if !self.runtime.is_dir(&location) {
            return Err(GitgetError::NotADirectory { path: location }.into());
        }

        let name = resolve_local_name(&registry, &location, options.name.as_deref())?;
        debug!("Using package name {} for {:?}", name, location);

        registry.insert(name.clone(), PackageRecord::new(&location));
        self.store.save(&registry)?;

        Ok(InstalledPackage { name, location })
    }
}
