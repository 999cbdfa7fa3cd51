//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration once and routes CLI subcommands to their
//! implementations. Running `buildready` with no subcommand is the same
//! as `buildready check`.

pub mod catalog;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod summary;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
