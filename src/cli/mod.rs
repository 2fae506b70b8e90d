//! CLI module for dummydb
//!
//! - init: Write a default config file
//! - start: Open the store and serve HTTP

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
