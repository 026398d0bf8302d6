//! Deterministic JSON serialization for run reports.
//!
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 without BOM

mod json;

pub use json::{SerializationError, from_json, to_json_stable, to_json_stable_bytes};
