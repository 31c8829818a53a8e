//! JSON serialization for parameter documents.
//!
//! Output uses 2-space indentation, keeps document key order and ends with a
//! trailing newline.

mod json;

pub use json::*;
