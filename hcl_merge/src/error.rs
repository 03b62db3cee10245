//! Error types for the merge pipeline stages.

use std::fmt;

use thiserror::Error;

/// A document could not be decoded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The document is not valid HCL. The message carries line and column.
    #[error("failed to parse HCL document '{document}': {source}")]
    Hcl {
        /// Label of the offending document.
        document: String,
        /// Underlying parser error.
        #[source]
        source: Box<hcl::Error>,
    },

    /// The document is not valid JSON.
    #[error("failed to parse JSON document '{document}' at line {line}, column {column}: {source}")]
    Json {
        /// Label of the offending document.
        document: String,
        /// One-based line of the failure.
        line: usize,
        /// One-based column of the failure.
        column: usize,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document decoded to something other than a map of top-level keys.
    #[error("document '{document}' must have an object at its root, found {found}")]
    RootNotObject {
        /// Label of the offending document.
        document: String,
        /// Kind of value found at the root.
        found: &'static str,
    },

    /// A key cannot be written as an HCL attribute or block name.
    #[error("document '{document}' uses key '{key}', which is not a valid HCL identifier")]
    InvalidIdentifier {
        /// Label of the offending document.
        document: String,
        /// The rejected key.
        key: String,
    },
}

impl ParseError {
    /// Label of the document that failed to decode.
    #[must_use]
    pub fn document(&self) -> &str {
        match self {
            Self::Hcl { document, .. }
            | Self::Json { document, .. }
            | Self::RootNotObject { document, .. }
            | Self::InvalidIdentifier { document, .. } => document,
        }
    }
}

/// The merged tree could not be serialized to JSON.
#[derive(Debug, Error)]
#[error("failed to encode merged configuration as JSON: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// The HCL printer could not write to its sink.
#[derive(Debug, Error)]
#[error("failed to render HCL output: {0}")]
pub struct WriteError(#[source] Box<hcl::Error>);

impl From<hcl::Error> for WriteError {
    fn from(err: hcl::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Pipeline stages that can fail.
///
/// Merging itself cannot fail and so has no stage here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding the destination HCL document.
    DecodeDestination,
    /// Decoding the source HCL document.
    DecodeSource,
    /// Decoding a standalone HCL document for conversion to JSON.
    DecodeDocument,
    /// Encoding the merged tree as JSON.
    Encode,
    /// Decoding JSON into an HCL syntax tree.
    DecodeNotation,
    /// Rendering the HCL syntax tree as text.
    Print,
}

impl Stage {
    /// Human-readable stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DecodeDestination => "decode destination",
            Self::DecodeSource => "decode source",
            Self::DecodeDocument => "decode document",
            Self::Encode => "encode",
            Self::DecodeNotation => "decode notation",
            Self::Print => "print",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying cause of a [`PipelineError`].
#[derive(Debug, Error)]
pub enum StageError {
    /// A decoder rejected its input.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The encoder rejected the merged tree.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// The printer failed to write.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// The first failure of a pipeline run, tagged with the stage that raised it.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    stage: Stage,
    #[source]
    source: StageError,
}

impl PipelineError {
    pub(crate) fn new(stage: Stage, source: impl Into<StageError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The stage that failed.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// The underlying failure.
    #[must_use]
    pub const fn cause(&self) -> &StageError {
        &self.source
    }
}
