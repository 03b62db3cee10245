//! The JSON side of the pipeline.
//!
//! The merged tree is encoded as pretty-printed JSON and that exact byte
//! stream is decoded again into an HCL syntax tree for printing, so the JSON
//! shown to users is always the data that produced the output document.

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;
