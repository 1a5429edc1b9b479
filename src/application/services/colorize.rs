//! Colorize service
//!
//! Load a YAML file, classify its keys and serialize it with styled keys
//! and comments.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::annotate::{annotate_comments, annotate_keys};
use crate::application::{ApplicationResult, IoResultExt};
use crate::codec::{emit, parse_document, DEFAULT_INDENT};
use crate::domain::{Classifier, Node, StructuralPath};
use crate::infrastructure::traits::FileSystem;
use crate::render::{MarkerStyler, Styler};

/// Service turning a YAML file into styled text.
pub struct ColorizeService {
    fs: Arc<dyn FileSystem>,
    classifier: Classifier,
    indent: usize,
}

impl ColorizeService {
    pub fn new(fs: Arc<dyn FileSystem>, classifier: Classifier, indent: usize) -> Self {
        Self {
            fs,
            classifier,
            indent,
        }
    }

    /// Service with the built-in rule table and default indentation.
    pub fn with_defaults(fs: Arc<dyn FileSystem>) -> Self {
        Self::new(fs, Classifier::default(), DEFAULT_INDENT)
    }

    /// Read and parse `path`, then attach a category to every mapping key.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Node> {
        let source = self.fs.read_to_string(path).with_read_context(path)?;
        debug!(bytes = source.len(), "read input");

        let mut root = parse_document(&source, path)?;
        annotate_keys(&mut root, &StructuralPath::root(), &self.classifier);
        Ok(root)
    }

    /// Serialize `path` with keys and comments decorated by `styler`.
    pub fn colorize(&self, path: &Path, styler: &dyn Styler) -> ApplicationResult<String> {
        let root = self.load(path)?;
        Ok(emit(&root, self.indent, styler))
    }

    /// Serialize `path` with textual category and comment markers in place
    /// of styles; see [`render`](crate::render::render).
    pub fn markers(&self, path: &Path) -> ApplicationResult<String> {
        let mut root = self.load(path)?;
        annotate_comments(&mut root);
        Ok(emit(&root, self.indent, &MarkerStyler))
    }
}
