//! CLI entrypoint for `hcl-merge`.
//!
//! Merges `--src-file` over `--dst-file` and writes the result to
//! `--write-file`, echoing the merged tree as JSON on stdout unless told to
//! stay quiet. `--convert` turns a single document on stdin into HCL or JSON.

mod cli;
mod error;
mod files;
mod logging;
mod settings;

use std::io::{self, Read, Write};

use clap::Parser;
use hcl_merge::{Document, pipeline};
use tracing::info;

use crate::cli::{Args, ConvertMode, MergePaths, Mode};
use crate::error::CliError;
use crate::settings::Settings;

const STDIN_LABEL: &str = "<stdin>";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let settings = settings::load(&args.overrides())?;
    logging::init(&settings.log_filter)?;
    match args.mode()? {
        Mode::Merge(paths) => merge(paths, &settings),
        Mode::Convert(mode) => convert(mode),
    }
}

fn merge(paths: MergePaths<'_>, settings: &Settings) -> Result<(), CliError> {
    let destination = files::read_document(paths.destination)?;
    let source = files::read_document(paths.source)?;
    let output = pipeline::run(&destination, &source)?;
    if settings.echo_notation {
        write_stdout(&output.notation)?;
    }
    files::write_atomically(paths.output, &output.document)?;
    info!(path = %paths.output, "merged document written");
    Ok(())
}

fn convert(mode: ConvertMode) -> Result<(), CliError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(CliError::Stdio)?;
    match mode {
        ConvertMode::ToJson => {
            let notation = pipeline::hcl_to_json(&Document::new(STDIN_LABEL, input))?;
            write_stdout(&notation)
        }
        ConvertMode::ToHcl => {
            let rendered = pipeline::json_to_hcl(STDIN_LABEL, input.as_bytes())?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdio)
        }
    }
}

/// Writes JSON followed by a newline.
fn write_stdout(notation: &[u8]) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(notation)
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .map_err(CliError::Stdio)
}
