use anyhow::Result;
use log::debug;

use crate::application::{ListAction, PackageInfo};
use crate::runtime::Runtime;

use super::config::Config;

/// List all tracked packages
#[tracing::instrument(skip(runtime, config))]
pub fn list<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    debug!("Listing packages from {:?}", config.registry_path);

    let packages = ListAction::new(&runtime, &config.registry_path).list_packages()?;
    for line in render(&packages) {
        println!("{}", line);
    }
    Ok(())
}

fn render(packages: &[PackageInfo]) -> Vec<String> {
    if packages.is_empty() {
        return vec!["Package list is empty".to_string()];
    }

    let width = packages.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let header = match packages.len() {
        1 => "1 package:".to_string(),
        n => format!("{} packages:", n),
    };

    std::iter::once(header)
        .chain(packages.iter().map(|p| {
            format!("  {:<width$}  {}", p.name, p.location.display(), width = width)
        }))
        .collect()
}
