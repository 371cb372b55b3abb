use anyhow::Result;
use log::debug;

use crate::application::{RemoveAction, RemoveOptions, RemoveOutcome};
use crate::runtime::Runtime;

use super::config::Config;

/// Remove a package from the list and, unless `soft`, delete its files
#[tracing::instrument(skip(runtime, config))]
pub fn remove<R: Runtime>(runtime: R, name: &str, options: RemoveOptions, config: Config) -> Result<()> {
    debug!("Removing {} soft={}", name, options.soft);
    let action = RemoveAction::new(&runtime, &config.registry_path);

    match action.remove(name, options)? {
        RemoveOutcome::Cancelled => println!("Removal cancelled."),
        RemoveOutcome::Removed {
            name,
            location,
            deleted: true,
        } => println!("Removed {} and deleted {}", name, location.display()),
        RemoveOutcome::Removed { name, location, .. } if options.soft => {
            println!("Removed {}, files kept at {}", name, location.display())
        }
        RemoveOutcome::Removed { name, .. } => println!("Removed {}", name),
    }
    Ok(())
}
