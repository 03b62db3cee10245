//! Deep merging for HCL configuration documents.
//!
//! Two documents are decoded into [`ConfigValue`] trees, merged so that
//! non-empty values from the source document override the destination, and
//! rendered back to HCL through an intermediate JSON form:
//!
//! ```text
//! HCL ─► ConfigMap ─► merge ─► JSON ─► hcl::Body ─► HCL
//! ```
//!
//! The JSON stage is kept so callers can report exactly what was merged; see
//! [`MergeOutput::notation`].
//!
//! ```rust
//! use hcl_merge::{ConfigValue, Document, pipeline};
//!
//! let destination = Document::new("base.hcl", "name = \"svc-a\"\nreplicas = 3\n");
//! let source = Document::new("override.hcl", "name = \"\"\nreplicas = 5\n");
//!
//! let output = pipeline::run(&destination, &source)?;
//! let merged = hcl_merge::text::decode(&Document::new(
//!     "merged.hcl",
//!     String::from_utf8_lossy(&output.document),
//! ))?;
//! assert_eq!(merged["name"], ConfigValue::from("svc-a"));
//! assert_eq!(merged["replicas"], ConfigValue::from(5_i64));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod merge;
pub mod notation;
pub mod pipeline;
pub mod text;
mod value;

pub use error::{EncodeError, ParseError, PipelineError, Stage, StageError, WriteError};
pub use merge::merge;
pub use pipeline::{Document, MergeOutput};
pub use value::{ConfigMap, ConfigValue};
