pub mod application;
pub mod commands;
pub mod error;
pub mod reachability;
pub mod registry;
pub mod resolver;
pub mod runtime;
pub mod vcs;
