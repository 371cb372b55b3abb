use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::application::{InstallAction, InstallOptions};
use crate::reachability::{HttpReachability, Reachability};
use crate::runtime::Runtime;
use crate::vcs::{GitCli, VersionControl};

use super::config::Config;

/// Clone a repository, or with `local` adopt an existing directory, and
/// add it to the package list
#[tracing::instrument(skip(runtime, options, config))]
pub async fn install<R: Runtime>(
    runtime: R,
    source: &str,
    local: bool,
    options: InstallOptions,
    config: Config,
) -> Result<()> {
    let vcs = GitCli::default();
    let reach = HttpReachability::new()?;
    run(&runtime, &vcs, &reach, source, local, &options, &config).await
}

pub async fn run<R: Runtime, V: VersionControl, P: Reachability>(
    runtime: &R,
    vcs: &V,
    reach: &P,
    source: &str,
    local: bool,
    options: &InstallOptions,
    config: &Config,
) -> Result<()> {
    let action = InstallAction::new(runtime, vcs, reach, &config.registry_path, &config.default_host);

    let installed = if local {
        debug!("Adopting local directory {}", source);
        action.install_local(Path::new(source), options)?
    } else {
        action.install_remote(source, options).await?
    };

    println!(
        "Installed {} at {}",
        installed.name,
        installed.location.display()
    );
    Ok(())
}
