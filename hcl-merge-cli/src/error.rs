//! Error types for the `hcl-merge` binary.

use std::io;

use camino::Utf8PathBuf;
use hcl_merge::PipelineError;
use thiserror::Error;

/// Errors surfaced by a `hcl-merge` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read file '{path}': {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file '{path}': {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("invalid log filter '{filter}': {source}")]
    LogFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install the log subscriber: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to use standard streams: {0}")]
    Stdio(#[source] io::Error),

    #[error("merging needs --dst-file, --src-file and --write-file")]
    MissingMergePaths,
}
