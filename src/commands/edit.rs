use anyhow::Result;
use log::debug;

use crate::error::GitgetError;
use crate::registry::{RegistryStatus, RegistryStore};
use crate::runtime::Runtime;

use super::config::Config;

#[cfg(target_os = "macos")]
const PLATFORM_OPENER: &str = "open";
#[cfg(windows)]
const PLATFORM_OPENER: &str = "cmd /C start";
#[cfg(not(any(target_os = "macos", windows)))]
const PLATFORM_OPENER: &str = "xdg-open";

/// Open the package list in the user's editor
#[tracing::instrument(skip(runtime, config))]
pub fn edit<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let store = RegistryStore::new(&runtime, &config.registry_path);
    let path = store.path().to_path_buf();
    match store.status() {
        RegistryStatus::Missing => return Err(GitgetError::RegistryMissing { path }.into()),
        RegistryStatus::Directory => return Err(GitgetError::InvalidLocation { path }.into()),
        RegistryStatus::File => {}
    }

    let editor = pick_editor(&runtime);
    debug!("Opening {:?} with {}", path, editor);

    let succeeded = runtime
        .run_editor(&editor, &path)
        .map_err(|e| GitgetError::EditorFailed {
            editor: editor.clone(),
            path: path.clone(),
            message: format!("{:#}", e),
        })?;
    if !succeeded {
        return Err(GitgetError::EditorFailed {
            editor,
            path,
            message: "editor exited with an error".to_string(),
        }
        .into());
    }
    Ok(())
}

/// `$VISUAL`, then `$EDITOR`, then the platform's default opener
fn pick_editor<R: Runtime>(runtime: &R) -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|key| runtime.env_var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| PLATFORM_OPENER.to_string())
}
