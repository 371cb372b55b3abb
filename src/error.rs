//! Error taxonomy for registry and package operations.
//!
//! ```text
//!   storage     RegistryMissing  RegistryCorrupt  RegistryWrite
//!               AlreadyExists    InvalidLocation
//!   resolver    InvalidSource    NameCollision
//!   operations  PackageNotFound  DirectoryExists  NotADirectory
//!               InvalidDestination  SourceUnreachable
//!   effects     CloneFailed  MoveFailed  DeleteFailed  EditorFailed
//!   batch       NoRemote  PullFailed  UpdateFailed  DoctorFailed
//! ```
//!
//! `NoRemote` and `PullFailed` describe a single package inside a batch
//! update and are reported per package; `UpdateFailed` is the error of the
//! batch as a whole.
//!
//! Operations return `anyhow::Result` and raise these values, so callers can
//! recover the variant with `downcast_ref::<GitgetError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GitgetError {
    #[error("Package file {} is missing, please run `gitget setup`", path.display())]
    RegistryMissing { path: PathBuf },

    #[error("Could not parse package file {}: {message}", path.display())]
    RegistryCorrupt { path: PathBuf, message: String },

    #[error("Could not write package file {}: {message}", path.display())]
    RegistryWrite { path: PathBuf, message: String },

    #[error("Package file {} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Package file {} is a directory, please remove it and run `gitget setup`", path.display())]
    InvalidLocation { path: PathBuf },

    #[error("Invalid source '{source_str}'. Expected a URL or 'owner/repo'.")]
    InvalidSource { source_str: String },

    #[error("Package name {name} already exists, choose another name")]
    NameCollision { name: String },

    #[error("Package {name} is not installed")]
    PackageNotFound { name: String },

    #[error("Directory already exists: {}", path.display())]
    DirectoryExists { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Location to move package to is not a directory: {}", path.display())]
    InvalidDestination { path: PathBuf },

    #[error("Could not connect to {host}, check the URL and your internet connection")]
    SourceUnreachable { host: String },

    #[error("Could not clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Could not move package {name}: {message}")]
    MoveFailed { name: String, message: String },

    #[error("Could not delete {} for package {name}: {message}", path.display())]
    DeleteFailed {
        name: String,
        path: PathBuf,
        message: String,
    },

    #[error("Package {name} has no remote to update from")]
    NoRemote { name: String },

    #[error("Package {name} could not be updated: {message}")]
    PullFailed { name: String, message: String },

    #[error("{failed} package(s) could not be updated")]
    UpdateFailed { failed: usize },

    #[error("{count} problem(s) found in the package list")]
    DoctorFailed { count: usize },

    #[error("Could not open {} with {editor}: {message}", path.display())]
    EditorFailed {
        editor: String,
        path: PathBuf,
        message: String,
    },
}
