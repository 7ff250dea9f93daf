//! CLI module for ledgerkv
//!
//! Provides command-line interface for:
//! - init: one-shot Init
//! - invoke: one-shot Invoke
//! - serve: line-delimited request loop over stdin/stdout

mod args;
mod backend;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use backend::ConfiguredStore;
pub use commands::{init, invoke, run_command, serve, serve_lines};
pub use config::{BackendKind, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{request_lines, write_response, RequestLine, RequestLines};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
