//! Document node tree
//!
//! Mappings store their children as alternating key/value pairs, sequences
//! store values only, scalars carry their text in `value`. Scalars read from
//! a document also keep the text they were written with.

use crate::domain::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

/// Type of a scalar's source value; decides how the text is quoted on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarType {
    #[default]
    String,
    Number,
    Bool,
    Null,
}

/// A scalar as it was written in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarSource {
    /// Single-line scalar, quotes included.
    Inline(String),
    /// Block scalar: header (`|`, `>-`, ...) and body lines with the content
    /// indentation removed.
    Block { header: String, body: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub scalar_type: ScalarType,
    /// Scalar text; empty for collections.
    pub value: String,
    /// Source form of a scalar; `None` for collections and built nodes.
    pub source: Option<ScalarSource>,
    /// Explicit tag, including the leading `!`.
    pub tag: Option<String>,
    pub children: Vec<Node>,
    /// Comment lines preceding the node, each starting with `#`.
    pub head_comment: String,
    /// Comment trailing the node on its line.
    pub line_comment: String,
    /// Comment lines following the node.
    pub foot_comment: String,
    /// Set on mapping keys by the key annotator.
    pub category: Category,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            scalar_type: ScalarType::default(),
            value: String::new(),
            source: None,
            tag: None,
            children: Vec::new(),
            head_comment: String::new(),
            line_comment: String::new(),
            foot_comment: String::new(),
            category: Category::default(),
        }
    }

    pub fn scalar(value: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            scalar_type,
            value: value.into(),
            ..Self::with_kind(NodeKind::Scalar)
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::scalar(value, ScalarType::String)
    }

    pub fn mapping(entries: Vec<(Node, Node)>) -> Self {
        Self {
            children: entries.into_iter().flat_map(|(k, v)| [k, v]).collect(),
            ..Self::with_kind(NodeKind::Mapping)
        }
    }

    pub fn sequence(items: Vec<Node>) -> Self {
        Self {
            children: items,
            ..Self::with_kind(NodeKind::Sequence)
        }
    }

    pub fn is_collection(&self) -> bool {
        self.kind != NodeKind::Scalar
    }

    /// Key/value pairs of a mapping; empty for other kinds.
    pub fn entries(&self) -> impl Iterator<Item = (&Node, &Node)> {
        let pairs = match self.kind {
            NodeKind::Mapping => self.children.as_slice(),
            _ => &[],
        };
        pairs.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Depth-first visit of this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
