//! Structural paths built while walking a document

use std::fmt;

/// Name of the document root segment.
pub const ROOT: &str = "$root";

/// Dot-separated chain of mapping keys from the document root.
///
/// Sequence indices never appear as segments: items of a sequence share the
/// path of the key that owns the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuralPath(String);

impl StructuralPath {
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    /// Path of a mapping key below this path.
    pub fn child(&self, key: &str) -> Self {
        Self(format!("{}.{}", self.0, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StructuralPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for StructuralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StructuralPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
