//! Sequencing of the merge stages.
//!
//! A run is decode destination, decode source, merge, encode to JSON, decode
//! that JSON into an HCL body, and print the body. The first failure aborts
//! the run. Nothing leaves the pipeline until every stage has succeeded, so a
//! failed run produces no partial output.

use tracing::debug;

use crate::error::{PipelineError, Stage};
use crate::value::ConfigMap;
use crate::{merge, notation, text};

/// Label attached to the intermediate JSON in error messages.
pub const NOTATION_LABEL: &str = "merged JSON";

/// A named input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    label: String,
    text: String,
}

impl Document {
    /// Wrap `text` with a `label`, typically the path it was read from.
    #[must_use]
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Name used for this document in errors and logs.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The document contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Result of a successful merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    /// The JSON encoding of the merged tree, exactly as it was fed to the
    /// HCL renderer.
    pub notation: Vec<u8>,
    /// The merged HCL document.
    pub document: Vec<u8>,
}

/// Merge `source` over `destination` and render the result as HCL.
///
/// # Errors
///
/// Returns a [`PipelineError`] naming the first stage that failed.
pub fn run(destination: &Document, source: &Document) -> Result<MergeOutput, PipelineError> {
    let dst = decode_stage(destination, Stage::DecodeDestination)?;
    let src = decode_stage(source, Stage::DecodeSource)?;
    debug!(
        destination_keys = dst.len(),
        source_keys = src.len(),
        "merging documents"
    );
    let merged = merge::merge(dst, src);
    let notation = encode_stage(&merged)?;
    let document = render_stage(NOTATION_LABEL, &notation)?;
    Ok(MergeOutput { notation, document })
}

/// Convert an HCL document to the pipeline's JSON notation.
///
/// # Errors
///
/// Returns a [`PipelineError`] at [`Stage::DecodeDocument`] for invalid HCL.
pub fn hcl_to_json(document: &Document) -> Result<Vec<u8>, PipelineError> {
    let tree = decode_stage(document, Stage::DecodeDocument)?;
    encode_stage(&tree)
}

/// Convert a JSON document to HCL text.
///
/// # Errors
///
/// Returns a [`PipelineError`] at [`Stage::DecodeNotation`] when the JSON
/// cannot be laid out as HCL, or at [`Stage::Print`] if rendering fails.
pub fn json_to_hcl(label: &str, bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
    render_stage(label, bytes)
}

fn decode_stage(document: &Document, stage: Stage) -> Result<ConfigMap, PipelineError> {
    debug!(%stage, document = document.label(), "decoding HCL");
    text::decode(document).map_err(|err| PipelineError::new(stage, err))
}

fn encode_stage(tree: &ConfigMap) -> Result<Vec<u8>, PipelineError> {
    debug!(stage = %Stage::Encode, "encoding JSON");
    notation::encode(tree).map_err(|err| PipelineError::new(Stage::Encode, err))
}

fn render_stage(label: &str, bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
    debug!(stage = %Stage::DecodeNotation, document = label, "decoding JSON");
    let body =
        notation::decode(label, bytes).map_err(|err| PipelineError::new(Stage::DecodeNotation, err))?;
    debug!(stage = %Stage::Print, "printing HCL");
    let mut rendered = Vec::new();
    text::print(&body, &mut rendered).map_err(|err| PipelineError::new(Stage::Print, err))?;
    Ok(rendered)
}
