//! HCL text to [`ConfigMap`].

use serde_json::Value as JsonValue;

use crate::error::ParseError;
use crate::pipeline::Document;
use crate::value::{ConfigMap, ConfigValue};

/// Decode an HCL document into its top-level map.
///
/// Attributes become entries and blocks become nested maps, with each block
/// label adding one level of nesting. Expressions that are not literals keep
/// their `${...}` string form.
///
/// # Errors
///
/// Returns [`ParseError::Hcl`] when the text is not valid HCL, and
/// [`ParseError::RootNotObject`] if the document does not decode to a map.
pub fn decode(document: &Document) -> Result<ConfigMap, ParseError> {
    // Note: hcl-rs 0.18 turns any float without a fractional part into an
    // `i64`, so integral literals beyond its range (`1.5e300`) saturate to
    // `i64::MAX` before they reach this crate.
    let value: JsonValue = hcl::from_str(document.text()).map_err(|source| ParseError::Hcl {
        document: document.label().to_owned(),
        source: Box::new(source),
    })?;
    let tree = ConfigValue::from(value);
    let found = tree.kind();
    tree.into_map().ok_or_else(|| ParseError::RootNotObject {
        document: document.label().to_owned(),
        found,
    })
}
