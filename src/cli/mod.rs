//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{parse_size, Args, Command, ConfigAction};
pub use commands::{capture, fit, handle_config_action, list_cameras, CommandError};
