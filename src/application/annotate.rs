//! Key and comment annotators
//!
//! Both walk the tree recursively; the key annotator carries the structural
//! path as an argument instead of looking up parents.

use tracing::trace;

use crate::domain::{Classifier, Node, NodeKind, StructuralPath};

/// Marker placed after the `#` of every comment line.
pub const COMMENT_MARKER: &str = "COMMENT_";

/// Attach a category to every mapping key below `node`.
///
/// `path` is the structural path governing `node`; sequence items inherit it
/// unchanged.
pub fn annotate_keys(node: &mut Node, path: &StructuralPath, classifier: &Classifier) {
    match node.kind {
        NodeKind::Mapping => {
            for pair in node.children.chunks_exact_mut(2) {
                let [key, value] = pair else { continue };
                if key.value.is_empty() {
                    annotate_keys(value, path, classifier);
                    continue;
                }
                let key_path = path.child(&key.value);
                key.category = classifier.classify(key_path.as_str());
                trace!(path = %key_path, category = %key.category, "classified key");
                annotate_keys(value, &key_path, classifier);
            }
        }
        NodeKind::Sequence => {
            for item in &mut node.children {
                annotate_keys(item, path, classifier);
            }
        }
        NodeKind::Scalar => {}
    }
}

/// Prefix the delimiter of every comment line with [`COMMENT_MARKER`].
///
/// Lines not starting with `#` are left alone.
pub fn mark_comments(comment: &str) -> String {
    comment
        .split('\n')
        .map(|line| match line.strip_prefix('#') {
            Some(rest) => format!("#{COMMENT_MARKER}{rest}"),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mark the head, line and foot comments of `node` and all its descendants.
pub fn annotate_comments(node: &mut Node) {
    for slot in [
        &mut node.head_comment,
        &mut node.line_comment,
        &mut node.foot_comment,
    ] {
        if !slot.is_empty() {
            *slot = mark_comments(slot);
        }
    }
    for child in &mut node.children {
        annotate_comments(child);
    }
}
