//! CLI argument definitions using clap
//!
//! Commands:
//! - ledgerkv init --config <path> <arg>
//! - ledgerkv invoke --config <path> <function> [args...]
//! - ledgerkv serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ledgerkv - key-value contract over an ordered ledger state store
#[derive(Parser, Debug)]
#[command(name = "ledgerkv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write argument 0 as the initial record
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./ledgerkv.json")]
        config: PathBuf,

        /// JSON object to store
        arg: String,
    },

    /// Invoke a named function once and exit
    Invoke {
        /// Path to configuration file
        #[arg(long, default_value = "./ledgerkv.json")]
        config: PathBuf,

        /// Function name (get, put, delete, list)
        function: String,

        /// Positional arguments; argument 0 is a JSON object
        args: Vec<String>,
    },

    /// Serve one JSON request per stdin line until EOF
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./ledgerkv.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
