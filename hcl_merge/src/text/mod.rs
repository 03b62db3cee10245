//! The HCL side of the pipeline: decoding documents into trees and printing
//! syntax trees back to text.

mod decode;
mod print;

pub use decode::decode;
pub use print::{print, render};
