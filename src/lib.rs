//! `comptune` library crate.
//!
//! The binary (`comptune`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., batch tuning scripts, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod diag;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod schema;
pub mod stats;
pub mod tune;
