use anyhow::Result;

use crate::application::DoctorAction;
use crate::error::GitgetError;
use crate::runtime::Runtime;

use super::config::Config;

/// Check that every package in the list still exists on disk
#[tracing::instrument(skip(runtime, config))]
pub fn doctor<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let report = DoctorAction::new(&runtime, &config.registry_path).check()?;

    println!("Checked {} package(s)", report.packages_checked);
    if report.is_healthy() {
        println!("No problems found.");
        return Ok(());
    }

    for finding in &report.findings {
        println!("  {}", finding);
    }
    Err(GitgetError::DoctorFailed {
        count: report.findings.len(),
    }
    .into())
}
