//! Durable storage for the registry.

use anyhow::Result;
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::GitgetError;
use crate::runtime::Runtime;

use super::Registry;

/// What currently sits at the registry path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryStatus {
    Missing,
    Directory,
    File,
}

/// Loads and saves the registry file through a [`Runtime`].
///
/// Every operation loads a fresh copy; nothing is cached between calls.
pub struct RegistryStore<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> RegistryStore<'a, R> {
    pub fn new(runtime: &'a R, path: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> RegistryStatus {
        if !self.runtime.exists(&self.path) {
            RegistryStatus::Missing
        } else if self.runtime.is_dir(&self.path) {
            RegistryStatus::Directory
        } else {
            RegistryStatus::File
        }
    }

    /// Read the persisted registry.
    ///
    /// An empty file (or one holding only `null`) is an empty registry.
    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Result<Registry> {
        match self.status() {
            RegistryStatus::Missing => {
                return Err(GitgetError::RegistryMissing {
                    path: self.path.clone(),
                }
                .into());
            }
            RegistryStatus::Directory => {
                return Err(GitgetError::InvalidLocation {
                    path: self.path.clone(),
                }
                .into());
            }
            RegistryStatus::File => {}
        }

        debug!("Loading package list from {:?}", self.path);
        let content = self.runtime.read_to_string(&self.path)?;
        self.parse(&content)
    }

    fn parse(&self, content: &str) -> Result<Registry> {
        if content.trim().is_empty() {
            debug!("Package list has no content");
            return Ok(Registry::new());
        }

        let registry: Option<Registry> =
            serde_yaml_ng::from_str(content).map_err(|e| GitgetError::RegistryCorrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        let registry = registry.unwrap_or_default();
        debug!("Loaded {} package(s)", registry.len());
        Ok(registry)
    }

    /// Replace the persisted registry.
    ///
    /// The content is written to a sibling temp file and renamed over the
    /// target, so a failed save leaves the previous file intact. A symlinked
    /// package file is written through to the file it points at.
    #[tracing::instrument(skip(self, registry))]
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let content = serde_yaml_ng::to_string(registry).map_err(|e| self.write_error(e))?;
        let target = self.write_target();
        let tmp_path = tmp_path(&target);

        debug!("Writing {} package(s) to {:?}", registry.len(), target);
        self.runtime
            .write(&tmp_path, content.as_bytes())
            .map_err(|e| self.write_error(e))?;

        if let Err(e) = self.runtime.rename(&tmp_path, &target) {
            let _ = self.runtime.remove_file(&tmp_path);
            return Err(self.write_error(e).into());
        }
        Ok(())
    }

    /// The real file behind the registry path. Falls back to the path itself
    /// when it cannot be resolved, e.g. before the first save.
    fn write_target(&self) -> PathBuf {
        match self.runtime.canonicalize(&self.path) {
            Ok(resolved) => {
                if resolved != self.path {
                    debug!("Package file {:?} resolves to {:?}", self.path, resolved);
                }
                resolved
            }
            Err(e) => {
                debug!("Keeping {:?} as is: {:#}", self.path, e);
                self.path.clone()
            }
        }
    }

    /// Create an empty registry file, refusing to overwrite anything.
    #[tracing::instrument(skip(self))]
    pub fn initialize(&self) -> Result<()> {
        match self.status() {
            RegistryStatus::File => {
                return Err(GitgetError::AlreadyExists {
                    path: self.path.clone(),
                }
                .into());
            }
            RegistryStatus::Directory => {
                return Err(GitgetError::InvalidLocation {
                    path: self.path.clone(),
                }
                .into());
            }
            RegistryStatus::Missing => {}
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !self.runtime.exists(parent)
        {
            self.runtime
                .create_dir_all(parent)
                .map_err(|e| self.write_error(e))?;
        }

        self.runtime
            .write(&self.path, b"")
            .map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn write_error(&self, e: impl std::fmt::Display) -> GitgetError {
        GitgetError::RegistryWrite {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("gitget"));
    name.push(".tmp");
    path.with_file_name(name)
}
