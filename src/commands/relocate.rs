use anyhow::Result;
use std::path::Path;

use crate::application::MoveAction;
use crate::runtime::Runtime;

use super::config::Config;

/// Move a package's working copy into another directory
#[tracing::instrument(skip(runtime, config))]
pub fn relocate<R: Runtime>(runtime: R, name: &str, destination: &Path, config: Config) -> Result<()> {
    let action = MoveAction::new(&runtime, &config.registry_path);
    let moved = action.move_package(name, destination)?;

    println!(
        "Moved {} from {} to {}",
        moved.name,
        moved.from.display(),
        moved.to.display()
    );
    Ok(())
}
