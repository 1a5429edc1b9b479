//! YAML codec: source text <-> [`Node`](crate::domain::Node) tree
//!
//! Parsing and scalar resolution go through `yaml-rust2`. Comments, which
//! its parser discards, are recovered from the source and anchored by the
//! positions the parser reports.

mod comments;
pub mod emitter;
pub mod loader;
mod source;

use yaml_rust2::Yaml;

use crate::domain::ScalarType;

pub use emitter::{emit, DEFAULT_INDENT};
pub use loader::parse_document;

/// Type a plain scalar resolves to under the YAML core schema.
pub(crate) fn scalar_type(text: &str) -> ScalarType {
    match Yaml::from_str(text) {
        Yaml::Integer(_) | Yaml::Real(_) => ScalarType::Number,
        Yaml::Boolean(_) => ScalarType::Bool,
        Yaml::Null => ScalarType::Null,
        _ => ScalarType::String,
    }
}
