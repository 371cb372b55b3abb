//! Command layer - one function per CLI subcommand.
//!
//! Each command builds its action from a [`Config`], runs it, and prints
//! the user-facing result.

pub mod config;
mod doctor;
mod edit;
mod install;
mod list;
mod relocate;
mod remove;
mod setup;
mod update;

pub use config::Config;
pub use doctor::doctor;
pub use edit::edit;
pub use install::install;
pub use list::list;
pub use relocate::relocate;
pub use remove::remove;
pub use setup::setup;
pub use update::update;
