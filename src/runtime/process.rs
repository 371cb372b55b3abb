//! Spawning external programs (the user's editor).

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn run_editor_impl(&self, program: &str, path: &Path) -> Result<bool> {
        // $EDITOR may carry flags, e.g. "code --wait"
        let mut parts = program.split_whitespace();
        let binary = parts.next().context("Editor command is empty")?;

        let status = Command::new(binary)
            .args(parts)
            .arg(path)
            .status()
            .with_context(|| format!("Failed to start {}", binary))?;
        Ok(status.success())
    }
}
