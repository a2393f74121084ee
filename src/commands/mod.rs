//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `spin`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args`, the global options and
//!   the output sink, and performs the command's logic.
//!
//! The `application` and `project` commands share the save flow in `save`,
//! which calls into the `spin_cli` library for the task protocol.

pub mod application;
pub mod completions;
pub mod project;
pub mod save;
