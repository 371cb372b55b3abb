use anyhow::{Result, anyhow};
use log::debug;
use std::path::PathBuf;

use crate::resolver::DEFAULT_HOST;
use crate::runtime::{Runtime, absolutize};

/// File name of the package list in the home directory
pub const REGISTRY_FILE_NAME: &str = ".gitget.yaml";

/// Settings shared by every command, resolved once from CLI overrides and
/// the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub registry_path: PathBuf,
    pub default_host: String,
}

impl Config {
    pub fn new<R: Runtime>(
        runtime: &R,
        registry_path: Option<PathBuf>,
        default_host: Option<String>,
    ) -> Result<Self> {
        let registry_path = match registry_path {
            Some(path) => absolutize(&runtime.current_dir()?, &path),
            None => default_registry_path(runtime)?,
        };
        debug!("Using package list {:?}", registry_path);

        let default_host = default_host
            .map(|host| host.trim_end_matches('/').to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            registry_path,
            default_host,
        })
    }
}

pub fn default_registry_path<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let home = runtime
        .home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory; pass --registry"))?;
    Ok(home.join(REGISTRY_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_home, test_registry_path};

    #[test]
    fn test_config_defaults() {
        let mut runtime = MockRuntime::new();
        runtime.expect_home_dir().returning(|| Some(test_home()));

        let config = Config::new(&runtime, None, None).unwrap();

        assert_eq!(config.registry_path, test_registry_path());
        assert_eq!(config.default_host, DEFAULT_HOST);
    }

    #[test]
    fn test_config_overrides() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().returning(|| Ok(test_home()));

        let config = Config::new(
            &runtime,
            Some(PathBuf::from("conf/packages.yaml")),
            Some("https://git.example.com/".to_string()),
        )
        .unwrap();

        assert_eq!(config.registry_path, test_home().join("conf/packages.yaml"));
        assert_eq!(config.default_host, "https://git.example.com");
    }

    #[test]
    fn test_config_without_home() {
        let mut runtime = MockRuntime::new();
        runtime.expect_home_dir().returning(|| None);

        let err = Config::new(&runtime, None, None).unwrap_err();
        assert!(err.to_string().contains("home directory"));
    }
}
