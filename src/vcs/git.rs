//! [`VersionControl`] backed by the `git` command line.

use anyhow::{Context, Result, bail};
use log::debug;
use std::path::Path;
use std::process::{Command, Output};

use super::{UpdateOutcome, VersionControl};

/// Shell-based git backend.
///
/// Success and failure come from exit codes. Whether a pull changed
/// anything is decided by comparing `HEAD` before and after.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run git and return its output. Never prompts for credentials.
    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<Output> {
        debug!("Running: {} {}", self.program, args.join(" "));
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never");
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }
        command
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))
    }

    /// Run git and fail on a non-zero exit, carrying stderr as the message.
    fn run_checked(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        let output = self.run(args, cwd)?;
        if !output.status.success() {
            bail!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn head(&self, working_copy: &Path) -> Option<String> {
        self.run_checked(&["rev-parse", "HEAD"], Some(working_copy))
            .ok()
    }
}

impl VersionControl for GitCli {
    #[tracing::instrument(skip(self))]
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.run_checked(&["clone", "--quiet", "--", url, &dest], None)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn pull(&self, working_copy: &Path) -> Result<UpdateOutcome> {
        let before = self.head(working_copy);
        self.run_checked(&["pull", "--quiet"], Some(working_copy))?;
        let after = self.head(working_copy);

        debug!("HEAD before {:?}, after {:?}", before, after);
        if before == after {
            Ok(UpdateOutcome::AlreadyCurrent)
        } else {
            Ok(UpdateOutcome::Updated)
        }
    }

    #[tracing::instrument(skip(self))]
    fn has_remote(&self, working_copy: &Path) -> bool {
        match self.run_checked(&["remote"], Some(working_copy)) {
            Ok(remotes) => !remotes.is_empty(),
            Err(e) => {
                debug!("Could not list remotes in {:?}: {:#}", working_copy, e);
                false
            }
        }
    }
}
