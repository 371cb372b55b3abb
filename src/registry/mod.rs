//! Package registry
//!
//! The registry is the single source of truth mapping a package name to the
//! location of its working copy. It is persisted as YAML by [`RegistryStore`].

mod store;

pub use store::{RegistryStatus, RegistryStore};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One tracked working copy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(from = "RecordRepr")]
pub struct PackageRecord {
    pub location: PathBuf,
    /// Keys written by other tools or by hand; kept as-is on save.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml_ng::Value>,
}

impl PackageRecord {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// On-disk shapes accepted for a record. Older package files stored the
/// location directly as the value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordRepr {
    Bare(PathBuf),
    Full {
        location: PathBuf,
        #[serde(flatten)]
        extra: BTreeMap<String, serde_yaml_ng::Value>,
    },
}

impl From<RecordRepr> for PackageRecord {
    fn from(repr: RecordRepr) -> Self {
        match repr {
            RecordRepr::Bare(location) => PackageRecord::new(location),
            RecordRepr::Full { location, extra } => PackageRecord { location, extra },
        }
    }
}

/// Mapping from package name to record, ordered by name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Registry {
    packages: BTreeMap<String, PackageRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.get(name)
    }

    pub fn location(&self, name: &str) -> Option<&Path> {
        self.packages.get(name).map(|r| r.location.as_path())
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, record: PackageRecord) -> Option<PackageRecord> {
        self.packages.insert(name.into(), record)
    }

    /// Point an existing record at a new location, keeping its other keys.
    /// Returns false if `name` is not tracked.
    pub fn relocate(&mut self, name: &str, location: PathBuf) -> bool {
        match self.packages.get_mut(name) {
            Some(record) => {
                record.location = location;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PackageRecord> {
        self.packages.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PackageRecord)> {
        self.packages.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }
}

impl FromIterator<(String, PackageRecord)> for Registry {
    fn from_iter<T: IntoIterator<Item = (String, PackageRecord)>>(iter: T) -> Self {
        Self {
            packages: iter.into_iter().collect(),
        }
    }
}
