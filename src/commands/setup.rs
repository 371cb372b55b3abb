use anyhow::Result;

use crate::registry::RegistryStore;
use crate::runtime::Runtime;

use super::config::Config;

/// Create an empty package list
#[tracing::instrument(skip(runtime, config))]
pub fn setup<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let store = RegistryStore::new(&runtime, &config.registry_path);
    store.initialize()?;
    println!("Created empty package list at {}", store.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitgetError;
    use crate::resolver::DEFAULT_HOST;
    use crate::runtime::RealRuntime;
    use tempfile::tempdir;

    #[test]
    fn test_setup_creates_file_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("packages.yaml");
        let config = Config {
            registry_path: path.clone(),
            default_host: DEFAULT_HOST.to_string(),
        };

        setup(RealRuntime, config.clone()).unwrap();
        assert!(path.is_file());

        let err = setup(RealRuntime, config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GitgetError>(),
            Some(&GitgetError::AlreadyExists { path })
        );
    }
}
