//! Move action - relocates a working copy and records its new location.

use anyhow::Result;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::error::GitgetError;
use crate::registry::RegistryStore;
use crate::runtime::{Runtime, SourceNotRemoved, absolutize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedPackage {
    pub name: String,
    pub from: PathBuf,
    pub to: PathBuf,
}

pub struct MoveAction<'a, R: Runtime> {
    runtime: &'a R,
    store: RegistryStore<'a, R>,
}

impl<'a, R: Runtime> MoveAction<'a, R> {
    pub fn new(runtime: &'a R, registry_path: &Path) -> Self {
        Self {
            runtime,
            store: RegistryStore::new(runtime, registry_path),
        }
    }

    /// Move the working copy of `name` into the directory `destination`.
    ///
    /// The registry is saved only after the files have been moved.
    #[tracing::instrument(skip(self))]
    pub fn move_package(&self, name: &str, destination: &Path) -> Result<MovedPackage> {
        let mut registry = self.store.load()?;

        let from = registry
            .location(name)
            .map(Path::to_path_buf)
            .ok_or_else(|| GitgetError::PackageNotFound {
                name: name.to_string(),
            })?;

        let destination = absolutize(&self.runtime.current_dir()?, destination);
        if !self.runtime.is_dir(&destination) {
            return Err(GitgetError::InvalidDestination { path: destination }.into());
        }

        let dir_name = from.file_name().ok_or_else(|| GitgetError::MoveFailed {
            name: name.to_string(),
            message: format!("{} has no directory name", from.display()),
        })?;
        let to = destination.join(dir_name);
        if self.runtime.exists(&to) {
            return Err(GitgetError::DirectoryExists { path: to }.into());
        }

        debug!("Moving {:?} to {:?}", from, to);
        if let Err(e) = self.runtime.move_dir(&from, &to) {
            match e.downcast_ref::<SourceNotRemoved>() {
                Some(leftover) => warn!(
                    "Moved {} to {}, but the old files remain at {}: {}",
                    name,
                    to.display(),
                    from.display(),
                    leftover.message
                ),
                None => {
                    self.discard_partial_copy(&to);
                    return Err(GitgetError::MoveFailed {
                        name: name.to_string(),
                        message: format!("{:#}", e),
                    }
                    .into());
                }
            }
        }

        registry.relocate(name, to.clone());
        self.store.save(&registry)?;

        Ok(MovedPackage {
            name: name.to_string(),
            from,
            to,
        })
    }

    /// Best-effort cleanup after a failed move; `to` did not exist before.
    fn discard_partial_copy(&self, to: &Path) {
        if !self.runtime.exists(to) {
            return;
        }
        debug!("Removing partial copy at {:?}", to);
        if let Err(e) = self.runtime.remove_dir_all(to) {
            warn!(
                "Move failed, partial files may remain at {}: {:#}",
                to.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{MemoryRegistry, test_home, test_registry_path};
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn kind(err: &anyhow::Error) -> &GitgetError {
        err.downcast_ref::<GitgetError>().expect("expected a GitgetError")
    }

    #[test]
    fn test_move_updates_location() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime
            .expect_is_dir()
            .with(eq(PathBuf::from("/archive")))
            .returning(|_| true);
        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/archive/repo")))
            .returning(|_| false);
        runtime
            .expect_move_dir()
            .with(eq(PathBuf::from("/work/repo")), eq(PathBuf::from("/archive/repo")))
            .times(1)
            .returning(|_, _| Ok(()));

        let action = MoveAction::new(&runtime, &test_registry_path());
        let moved = action.move_package("owner/repo", Path::new("/archive")).unwrap();

        assert_eq!(moved.to, PathBuf::from("/archive/repo"));
        assert_eq!(
            memory.current().location("owner/repo"),
            Some(Path::new("/archive/repo"))
        );
    }

    #[test]
    fn test_move_relative_destination() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home().join("src")));
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_exists().returning(|_| false);
        runtime.expect_move_dir().returning(|_, _| Ok(()));

        let action = MoveAction::new(&runtime, &test_registry_path());
        let moved = action.move_package("owner/repo", Path::new("..")).unwrap();

        assert_eq!(moved.to, test_home().join("repo"));
    }

    #[test]
    fn test_move_unknown_package_is_noop() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_move_dir().never();

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("ghost/pkg", Path::new("/archive"))
            .unwrap_err();

        assert_eq!(
            kind(&err),
            &GitgetError::PackageNotFound {
                name: "ghost/pkg".into()
            }
        );
        assert_eq!(memory.saves(), 0);
        assert_eq!(
            memory.current().location("owner/repo"),
            Some(Path::new("/work/repo"))
        );
    }

    #[test]
    fn test_move_to_non_directory() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| false);
        runtime.expect_move_dir().never();

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("owner/repo", Path::new("/etc/hosts"))
            .unwrap_err();

        assert!(matches!(kind(&err), GitgetError::InvalidDestination { .. }));
        assert_eq!(memory.saves(), 0);
    }

    #[test]
    fn test_move_target_taken() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_exists().returning(|_| true);
        runtime.expect_move_dir().never();

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("owner/repo", Path::new("/archive"))
            .unwrap_err();

        assert_eq!(
            kind(&err),
            &GitgetError::DirectoryExists {
                path: PathBuf::from("/archive/repo")
            }
        );
    }

    #[test]
    fn test_move_failure_leaves_registry() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_exists().returning(|_| false);
        runtime
            .expect_move_dir()
            .returning(|_, _| Err(anyhow::anyhow!("device busy")));

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("owner/repo", Path::new("/archive"))
            .unwrap_err();

        assert!(matches!(kind(&err), GitgetError::MoveFailed { .. }));
        assert_eq!(memory.saves(), 0);
        assert_eq!(
            memory.current().location("owner/repo"),
            Some(Path::new("/work/repo"))
        );
    }

    fn expect_partial_copy(runtime: &mut MockRuntime) {
        let mut seq = Sequence::new();
        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/archive/repo")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| false);
        runtime
            .expect_move_dir()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(anyhow::anyhow!("No such device or address")));
        runtime
            .expect_exists()
            .with(eq(PathBuf::from("/archive/repo")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| true);
    }

    #[test]
    fn test_failed_copy_removes_partial_target() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| true);
        expect_partial_copy(&mut runtime);
        runtime
            .expect_remove_dir_all()
            .with(eq(PathBuf::from("/archive/repo")))
            .times(1)
            .returning(|_| Ok(()));

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("owner/repo", Path::new("/archive"))
            .unwrap_err();

        assert!(matches!(kind(&err), GitgetError::MoveFailed { .. }));
        assert_eq!(memory.saves(), 0);
    }

    #[test]
    fn test_failed_cleanup_still_reports_move_failure() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| true);
        expect_partial_copy(&mut runtime);
        runtime
            .expect_remove_dir_all()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let action = MoveAction::new(&runtime, &test_registry_path());
        let err = action
            .move_package("owner/repo", Path::new("/archive"))
            .unwrap_err();

        assert!(matches!(kind(&err), GitgetError::MoveFailed { .. }));
        assert_eq!(
            memory.current().location("owner/repo"),
            Some(Path::new("/work/repo"))
        );
    }

    #[test]
    fn test_leftover_source_still_records_new_location() {
        let mut runtime = MockRuntime::new();
        let memory = MemoryRegistry::with(&[("owner/repo", "/work/repo")]);
        memory.attach(&mut runtime);
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_is_dir().returning(|_| true);
        runtime.expect_exists().returning(|_| false);
        runtime.expect_move_dir().returning(|from, to| {
            Err(SourceNotRemoved {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                message: "device busy".into(),
            }
            .into())
        });
        runtime.expect_remove_dir_all().never();

        let action = MoveAction::new(&runtime, &test_registry_path());
        let moved = action
            .move_package("owner/repo", Path::new("/archive"))
            .unwrap();

        assert_eq!(moved.to, PathBuf::from("/archive/repo"));
        assert_eq!(memory.saves(), 1);
        assert_eq!(
            memory.current().location("owner/repo"),
            Some(Path::new("/archive/repo"))
        );
    }
}
