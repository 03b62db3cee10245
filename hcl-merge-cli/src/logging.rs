//! Installs the stderr log subscriber.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Installs a `fmt` subscriber filtered by `directives`.
///
/// Logs go to stderr; stdout carries only command output.
pub fn init(directives: &str) -> Result<(), CliError> {
    let filter = parse_filter(directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(CliError::Logging)
}

fn parse_filter(directives: &str) -> Result<EnvFilter, CliError> {
    EnvFilter::try_new(directives).map_err(|source| CliError::LogFilter {
        filter: directives.to_owned(),
        source,
    })
}
