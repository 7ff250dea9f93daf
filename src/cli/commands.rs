//! CLI command implementations
//!
//! Boot sequence for every command:
//! 1. Load and validate config
//! 2. Apply log level
//! 3. Open the configured store
//! 4. Dispatch request(s)

use std::io::{self, BufRead, Write};
use std::path::Path;

use super::args::Command;
use super::backend::ConfiguredStore;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{request_lines, write_response};
use crate::contract::{Dispatcher, Invocation, Response};
use crate::observability::{log_event, Event, Logger};
use crate::store::RecordStore;

/// Run a parsed CLI command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config, arg } => init(&config, arg),
        Command::Invoke {
            config,
            function,
            args,
        } => invoke(&config, &function, args),
        Command::Serve { config } => serve(&config),
    }
}

fn boot(config_path: &Path) -> CliResult<Dispatcher<ConfiguredStore>> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);

    log_event(Event::BootStart, &[]);
    log_event(
        Event::ConfigLoaded,
        &[("path", &config_path.display().to_string())],
    );

    let store = ConfiguredStore::open(&config)?;
    log_event(
        Event::StoreOpened,
        &[("backend", store.kind()), ("records", &store.len().to_string())],
    );

    Ok(Dispatcher::new(store))
}

/// One-shot Init
pub fn init(config_path: &Path, arg: String) -> CliResult<()> {
    let mut dispatcher = boot(config_path)?;
    let response = dispatcher.init(&[arg]);
    finish_one_shot(&response)
}

/// One-shot Invoke
pub fn invoke(config_path: &Path, function: &str, args: Vec<String>) -> CliResult<()> {
    let mut dispatcher = boot(config_path)?;
    let response = dispatcher.invoke(function, &args);
    finish_one_shot(&response)
}

fn finish_one_shot(response: &Response) -> CliResult<()> {
    write_response(&mut io::stdout(), response)?;
    match response.error_code() {
        Some(code) => Err(CliError::request_failed(code.to_string())),
        None => Ok(()),
    }
}

/// Serve stdin until EOF
pub fn serve(config_path: &Path) -> CliResult<()> {
    let mut dispatcher = boot(config_path)?;
    log_event(Event::BootComplete, &[]);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve_lines(&mut dispatcher, stdin.lock(), &mut stdout)?;

    log_event(
        Event::MetricsSnapshot,
        &[("counters", &dispatcher.metrics().snapshot().to_json())],
    );
    log_event(Event::ShutdownComplete, &[]);
    Ok(())
}

/// Answer every request line from `reader` on `writer`.
///
/// A line that is not a valid request, including one that is not UTF-8,
/// gets an error envelope; the loop continues. Only I/O failures on the
/// streams end it early.
pub fn serve_lines<S, R, W>(
    dispatcher: &mut Dispatcher<S>,
    reader: R,
    writer: &mut W,
) -> CliResult<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    for line in request_lines(reader) {
        let response = match line?.and_then(|text| Invocation::parse(&text)) {
            Ok(request) => dispatcher.handle(&request),
            Err(err) => {
                dispatcher.metrics().increment_decode_errors();
                log_event(Event::RequestRejected, &[("reason", &err.to_string())]);
                Response::error(&err)
            }
        };
        write_response(writer, &response)?;
    }
    Ok(())
}
