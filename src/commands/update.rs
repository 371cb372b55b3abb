use anyhow::Result;

use crate::application::{PackageOutcome, PackageUpdate, UpdateAction};
use crate::error::GitgetError;
use crate::runtime::Runtime;
use crate::vcs::{GitCli, VersionControl};

use super::config::Config;

/// Pull every package in the list
#[tracing::instrument(skip(runtime, config))]
pub fn update<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let vcs = GitCli::default();
    run(&runtime, &vcs, &config)
}

pub fn run<R: Runtime, V: VersionControl>(runtime: &R, vcs: &V, config: &Config) -> Result<()> {
    let action = UpdateAction::new(runtime, vcs, &config.registry_path);
    let report = action.update_all(|index, total, update| {
        println!("[{}/{}] {}", index, total, describe(update));
    })?;

    if report.packages.is_empty() {
        println!("No packages to update");
        return Ok(());
    }

    if !report.is_success() {
        return Err(GitgetError::UpdateFailed {
            failed: report.failed(),
        }
        .into());
    }
    Ok(())
}

fn describe(update: &PackageUpdate) -> String {
    match &update.outcome {
        PackageOutcome::Updated => format!("{} updated", update.name),
        PackageOutcome::AlreadyCurrent => format!("{} is already up to date", update.name),
        PackageOutcome::NoRemote => {
            let reason = GitgetError::NoRemote {
                name: update.name.clone(),
            };
            format!("{}, skipped", reason)
        }
        PackageOutcome::Failed(err) => err.to_string(),
    }
}
