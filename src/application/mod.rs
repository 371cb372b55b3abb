//! Application layer - one action per user-facing operation.
//!
//! Actions load the registry, coordinate the runtime and adapters, and
//! return plain data. Printing is left to the commands layer.

mod doctor;
mod install;
mod list;
mod relocate;
mod remove;
mod update;

pub use doctor::{DoctorAction, DoctorReport, Finding};
pub use install::{InstallAction, InstallOptions, InstalledPackage};
pub use list::{ListAction, PackageInfo};
pub use relocate::{MoveAction, MovedPackage};
pub use remove::{RemoveAction, RemoveOptions, RemoveOutcome};
pub use update::{PackageOutcome, PackageUpdate, UpdateAction, UpdateReport};
