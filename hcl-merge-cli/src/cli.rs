//! Command-line interface definitions for `hcl-merge`.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};

use crate::error::CliError;
use crate::settings::SettingsOverrides;

/// Standalone conversions that bypass merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertMode {
    /// Read HCL on stdin and write its JSON form to stdout.
    ToJson,
    /// Read JSON on stdin and write it as HCL to stdout.
    ToHcl,
}

/// Parsed CLI arguments for `hcl-merge`.
#[derive(Debug, Parser)]
#[command(name = "hcl-merge")]
#[command(about = "Deep-merge two HCL documents; non-empty values from the source win")]
#[command(version)]
pub struct Args {
    /// Destination document, the base of the merge.
    #[arg(
        long,
        value_name = "path",
        required_unless_present = "convert",
        conflicts_with = "convert"
    )]
    pub dst_file: Option<Utf8PathBuf>,
    /// Source document whose non-empty values override the destination.
    #[arg(
        long,
        value_name = "path",
        required_unless_present = "convert",
        conflicts_with = "convert"
    )]
    pub src_file: Option<Utf8PathBuf>,
    /// Where to write the merged document.
    #[arg(
        long,
        value_name = "path",
        required_unless_present = "convert",
        conflicts_with = "convert"
    )]
    pub write_file: Option<Utf8PathBuf>,
    /// Convert a single document from stdin to stdout instead of merging.
    #[arg(long, value_enum, value_name = "mode")]
    pub convert: Option<ConvertMode>,
    /// Do not echo the merged tree as JSON on stdout.
    #[arg(long = "quiet")]
    pub is_quiet: bool,
    /// Tracing filter directives written to stderr (for example, `debug`).
    #[arg(long, value_name = "directives")]
    pub log_filter: Option<String>,
}

/// The three files involved in a merge.
#[derive(Debug, Clone, Copy)]
pub struct MergePaths<'a> {
    pub destination: &'a Utf8Path,
    pub source: &'a Utf8Path,
    pub output: &'a Utf8Path,
}

/// What a run should do.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    Merge(MergePaths<'a>),
    Convert(ConvertMode),
}

impl Args {
    /// Settings supplied on the command line. Flags that were not passed stay
    /// `None` so they do not mask environment values.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            echo_notation: self.is_quiet.then_some(false),
            log_filter: self.log_filter.clone(),
        }
    }

    /// Resolves the requested mode.
    pub fn mode(&self) -> Result<Mode<'_>, CliError> {
        if let Some(convert) = self.convert {
            return Ok(Mode::Convert(convert));
        }
        match (&self.dst_file, &self.src_file, &self.write_file) {
            (Some(destination), Some(source), Some(output)) => Ok(Mode::Merge(MergePaths {
                destination,
                source,
                output,
            })),
            _ => Err(CliError::MissingMergePaths),
        }
    }
}
