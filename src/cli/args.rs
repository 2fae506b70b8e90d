//! CLI argument definitions using clap
//!
//! Commands:
//! - dummydb init --config <path>
//! - dummydb start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dummydb - a small records CRUD service
#[derive(Parser, Debug)]
#[command(name = "dummydb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./dummydb.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./dummydb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
