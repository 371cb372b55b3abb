//! Doctor action - read-only consistency check between the registry and
//! the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::debug;

use crate::error::GitgetError;
use crate::registry::{RegistryStatus, RegistryStore};
use crate::runtime::Runtime;

/// One problem found by the doctor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    RegistryMissing { path: PathBuf },
    RegistryIsDirectory { path: PathBuf },
    RegistryCorrupt { path: PathBuf, message: String },
    PackageMissing { name: String, location: PathBuf },
    NotADirectory { name: String, location: PathBuf },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::RegistryMissing { path } => {
                write!(f, "package list {} does not exist", path.display())
            }
            Finding::RegistryIsDirectory { path } => {
                write!(f, "package list {} is a directory", path.display())
            }
            Finding::RegistryCorrupt { path, message } => {
                write!(f, "package list {} cannot be parsed: {}", path.display(), message)
            }
            Finding::PackageMissing { name, location } => {
                write!(f, "{}: {} does not exist", name, location.display())
            }
            Finding::NotADirectory { name, location } => {
                write!(f, "{}: {} is not a directory", name, location.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub packages_checked: usize,
    pub findings: Vec<Finding>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.findings.is_empty()
    }
}

pub struct DoctorAction<'a, R: Runtime> {
    runtime: &'a R,
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime> DoctorAction<'a, R> {
    pub fn new(runtime: &'a R, registry_path: &Path) -> Self {
        Self {
            runtime,
            store: RegistryStore::new(runtime, registry_path),
        }
    }

    /// Check the registry file and every tracked location.
    ///
    /// Never modifies anything. All findings are collected rather than
    /// stopping at the first one.
    #[tracing::instrument(skip(self))]
    pub fn check(&self) -> Result<DoctorReport> {
        let path = self.store.path().to_path_buf();
        let mut report = DoctorReport::default();

        match self.store.status() {
            RegistryStatus::Missing => {
                report.findings.push(Finding::RegistryMissing { path });
                return Ok(report);
            }
            RegistryStatus::Directory => {
                report.findings.push(Finding::RegistryIsDirectory { path });
                return Ok(report);
            }
            RegistryStatus::File => {}
        }

        let registry = match self.store.load() {
            Ok(registry) => registry,
            Err(e) => match e.downcast::<GitgetError>() {
                Ok(GitgetError::RegistryCorrupt { path, message }) => {
                    report.findings.push(Finding::RegistryCorrupt { path, message });
                    return Ok(report);
                }
                Ok(other) => return Err(other.into()),
                Err(e) => return Err(e),
            },
        };

        for (name, record) in registry.iter() {
            report.packages_checked += 1;
            let location = &record.location;
            debug!("Checking {} at {:?}", name, location);

            if !self.runtime.exists(location) {
                report.findings.push(Finding::PackageMissing {
                    name: name.clone(),
                    location: location.clone(),
                });
            } else if !self.runtime.is_dir(location) {
                report.findings.push(Finding::NotADirectory {
                    name: name.clone(),
                    location: location.clone(),
                });
            }
        }

        Ok(report)
    }
}
