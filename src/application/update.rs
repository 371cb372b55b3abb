//! Update action - pulls every tracked working copy, one at a time.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::GitgetError;
use crate::registry::RegistryStore;
use crate::runtime::Runtime;
use crate::vcs::{UpdateOutcome, VersionControl};

/// What happened to one package during a batch update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Updated,
    AlreadyCurrent,
    NoRemote,
    /// Always a [`GitgetError::PullFailed`] naming the package
    Failed(GitgetError),
}

impl From<UpdateOutcome> for PackageOutcome {
    fn from(outcome: UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Updated => PackageOutcome::Updated,
            UpdateOutcome::AlreadyCurrent => PackageOutcome::AlreadyCurrent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    pub name: String,
    pub location: PathBuf,
    pub outcome: PackageOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub packages: Vec<PackageUpdate>,
}

impl UpdateReport {
    pub fn failed(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| matches!(p.outcome, PackageOutcome::Failed(_)))
            .count()
    }

    /// A package without a remote is reported but does not fail the run.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

pub struct UpdateAction<'a, R: Runtime, V: VersionControl> {
    runtime: &'a R,
    vcs: &'a V,
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime, V: VersionControl> UpdateAction<'a, R, V> {
    pub fn new(runtime: &'a R, vcs: &'a V, registry_path: &Path) -> Self {
        Self {
            runtime,
            vcs,
            store: RegistryStore::new(runtime, registry_path),
        }
    }

    /// Update all packages in registry order.
    ///
    /// `on_progress` is called after each package with its 1-based index,
    /// the total, and the outcome. A failing package never stops the batch.
    #[tracing::instrument(skip(self, on_progress))]
    pub fn update_all<F>(&self, mut on_progress: F) -> Result<UpdateReport>
    where
        F: FnMut(usize, usize, &PackageUpdate),
    {
        let registry = self.store.load()?;
        let total = registry.len();
        let mut report = UpdateReport::default();

        for (index, (name, record)) in registry.iter().enumerate() {
            debug!("Attempting to update {}", name);
            let update = PackageUpdate {
                name: name.clone(),
                location: record.location.clone(),
                outcome: self.update_one(name, &record.location),
            };
            on_progress(index + 1, total, &update);
            report.packages.push(update);
        }

        Ok(report)
    }

    fn update_one(&self, name: &str, location: &Path) -> PackageOutcome {
        let failed = |message: String| {
            PackageOutcome::Failed(GitgetError::PullFailed {
                name: name.to_string(),
                message,
            })
        };

        if !self.runtime.is_dir(location) {
            return failed(format!("working copy not found at {}", location.display()));
        }
        if !self.vcs.has_remote(location) {
            return PackageOutcome::NoRemote;
        }
        match self.vcs.pull(location) {
            Ok(outcome) => outcome.into(),
            Err(e) => failed(format!("{:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{MemoryRegistry, test_registry_path};
    use crate::vcs::MockVersionControl;
    use mockall::predicate::eq;

    #[test]
    fn test_update_continues_after_failure() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("a/a", "/w/a"), ("b/b", "/w/b"), ("c/c", "/w/c")]);
        memory.attach(&mut runtime);
        runtime.expect_is_dir().returning(|_| true);

        let mut vcs = MockVersionControl::new();
        vcs.expect_has_remote()
            .with(eq(PathBuf::from("/w/a")))
            .returning(|_| false);
        vcs.expect_has_remote().returning(|_| true);
        vcs.expect_pull()
            .with(eq(PathBuf::from("/w/a")))
            .never();
        vcs.expect_pull()
            .with(eq(PathBuf::from("/w/b")))
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("merge conflict")));
        vcs.expect_pull()
            .with(eq(PathBuf::from("/w/c")))
            .times(1)
            .returning(|_| Ok(UpdateOutcome::Updated));

        let action = UpdateAction::new(&runtime, &vcs, &test_registry_path());
        let mut seen = Vec::new();
        let report = action
            .update_all(|i, n, update| seen.push((i, n, update.name.clone())))
            .unwrap();

        let outcomes: Vec<_> = report.packages.iter().map(|p| p.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                PackageOutcome::NoRemote,
                PackageOutcome::Failed(GitgetError::PullFailed {
                    name: "b/b".into(),
                    message: "merge conflict".into(),
                }),
                PackageOutcome::Updated,
            ]
        );
        assert_eq!(
            seen,
            vec![
                (1, 3, "a/a".to_string()),
                (2, 3, "b/b".to_string()),
                (3, 3, "c/c".to_string()),
            ]
        );
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        assert_eq!(memory.saves(), 0);
    }

    #[test]
    fn test_update_already_current_and_no_remote_succeed() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("a/a", "/w/a"), ("local_b", "/w/b")]);
        memory.attach(&mut runtime);
        runtime.expect_is_dir().returning(|_| true);

        let mut vcs = MockVersionControl::new();
        vcs.expect_has_remote()
            .with(eq(PathBuf::from("/w/a")))
            .returning(|_| true);
        vcs.expect_has_remote()
            .with(eq(PathBuf::from("/w/b")))
            .returning(|_| false);
        vcs.expect_pull()
            .returning(|_| Ok(UpdateOutcome::AlreadyCurrent));

        let action = UpdateAction::new(&runtime, &vcs, &test_registry_path());
        let report = action.update_all(|_, _, _| {}).unwrap();

        assert_eq!(report.packages[0].outcome, PackageOutcome::AlreadyCurrent);
        assert_eq!(report.packages[1].outcome, PackageOutcome::NoRemote);
        assert!(report.is_success());
    }

    #[test]
    fn test_update_missing_working_copy_fails_softly() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("gone/pkg", "/w/gone"), ("ok/pkg", "/w/ok")]);
        memory.attach(&mut runtime);
        runtime
            .expect_is_dir()
            .with(eq(PathBuf::from("/w/gone")))
            .returning(|_| false);
        runtime.expect_is_dir().returning(|_| true);

        let mut vcs = MockVersionControl::new();
        vcs.expect_has_remote().returning(|_| true);
        vcs.expect_pull()
            .times(1)
            .returning(|_| Ok(UpdateOutcome::Updated));

        let action = UpdateAction::new(&runtime, &vcs, &test_registry_path());
        let report = action.update_all(|_, _, _| {}).unwrap();

        match &report.packages[0].outcome {
            PackageOutcome::Failed(GitgetError::PullFailed { name, message }) => {
                assert_eq!(name, "gone/pkg");
                assert!(message.contains("/w/gone"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(report.packages[1].outcome, PackageOutcome::Updated);
    }

    #[test]
    fn test_update_empty_registry() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::empty();
        memory.attach(&mut runtime);
        let vcs = MockVersionControl::new();

        let action = UpdateAction::new(&runtime, &vcs, &test_registry_path());
        let report = action.update_all(|_, _, _| {}).unwrap();

        assert!(report.packages.is_empty());
        assert!(report.is_success());
    }
}
