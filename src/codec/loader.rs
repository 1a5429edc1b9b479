//! Parser adapter: YAML source -> [`Node`] tree with comments
//!
//! Events come from the `yaml-rust2` parser; only the first document of a
//! stream is read. Scalars keep the text they were written with. Every node
//! records the position its event starts at, and comments are anchored to
//! those positions once the tree is built.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;
use yaml_rust2::parser::{Event, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::application::{ApplicationError, ApplicationResult};
use crate::codec::comments::{self, Role, Step};
use crate::codec::scalar_type;
use crate::codec::source::{Pos, Source};
use crate::domain::{DomainError, Node, NodeKind, ScalarSource, ScalarType};

/// Parse the first document of `source` into a node tree.
///
/// `origin` is only used for error messages.
pub fn parse_document(source: &str, origin: &Path) -> ApplicationResult<Node> {
    let (events, end) = first_document(source, origin)?;
    let text = Source::new(source);
    let end = text.pos(&end);

    let mut builder = Builder::new(&text, events);
    let mut root = builder.node(Role::Root).ok_or(DomainError::EmptyDocument)?;
    if root.kind == NodeKind::Scalar && root.scalar_type == ScalarType::Null {
        return Err(DomainError::EmptyDocument.into());
    }

    let found = comments::find(&text, &builder.opaque, end);
    debug!(
        nodes = builder.next_id,
        comments = found.len(),
        kind = ?root.kind,
        "parsed document"
    );
    comments::attach(&mut root, builder.next_id, &builder.steps, found);
    Ok(root)
}

/// Events of the first document and the mark where it ends.
fn first_document(
    source: &str,
    origin: &Path,
) -> ApplicationResult<(Vec<(Event, Marker)>, Marker)> {
    let mut parser = Parser::new_from_str(source);
    let mut events = Vec::new();
    loop {
        let (event, mark) = parser
            .next_token()
            .map_err(|source| ApplicationError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        match event {
            Event::DocumentEnd | Event::StreamEnd => return Ok((events, mark)),
            Event::StreamStart | Event::DocumentStart | Event::Nothing => {}
            event => events.push((event, mark)),
        }
    }
}

struct Builder<'s> {
    source: &'s Source<'s>,
    events: Vec<(Event, Marker)>,
    at: usize,
    /// Pre-order number of the next node.
    next_id: usize,
    anchors: HashMap<usize, Node>,
    steps: Vec<Step>,
    /// Quoted scalars and block scalar bodies, in document order.
    opaque: Vec<(Pos, Pos)>,
}

impl<'s> Builder<'s> {
    fn new(source: &'s Source<'s>, events: Vec<(Event, Marker)>) -> Self {
        Self {
            source,
            events,
            at: 0,
            next_id: 0,
            anchors: HashMap::new(),
            steps: Vec::new(),
            opaque: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Event> {
        self.events.get(self.at).map(|(event, _)| event)
    }

    /// Line of the next unread event.
    fn next_line(&self) -> usize {
        self.events
            .get(self.at)
            .map_or(self.source.line_count(), |(_, mark)| self.source.pos(mark).line)
    }

    fn node(&mut self, role: Role) -> Option<Node> {
        let (event, mark) = self.events.get(self.at).cloned()?;
        self.at += 1;
        let pos = self.source.pos(&mark);
        let id = self.next_id;
        self.next_id += 1;
        self.steps.push(Step::Open { pos, id, role });

        let (node, anchor) = match event {
            Event::Scalar(value, style, anchor, tag) => {
                let mut node = self.scalar(value, style, pos);
                node.tag = tag.as_ref().map(tag_text);
                (node, anchor)
            }
            Event::SequenceStart(anchor, tag) => {
                let flow = self.source.rest(pos).starts_with('[');
                let mut items = Vec::new();
                let mut last = None;
                while !matches!(self.peek(), Some(Event::SequenceEnd) | None) {
                    last = Some(self.next_id);
                    items.extend(self.node(Role::Item));
                }
                self.close(id, pos, flow, last);
                let mut node = Node::sequence(items);
                node.tag = tag.as_ref().map(tag_text);
                (node, anchor)
            }
            Event::MappingStart(anchor, tag) => {
                let flow = self.source.rest(pos).starts_with('{');
                let mut entries = Vec::new();
                let mut last = None;
                while !matches!(self.peek(), Some(Event::MappingEnd) | None) {
                    last = Some(self.next_id);
                    let key = self.node(Role::Key);
                    let value = self.node(Role::Value);
                    if let (Some(key), Some(value)) = (key, value) {
                        entries.push((key, value));
                    }
                }
                self.close(id, pos, flow, last);
                let mut node = Node::mapping(entries);
                node.tag = tag.as_ref().map(tag_text);
                (node, anchor)
            }
            Event::Alias(anchor) => {
                let node = self.alias(anchor);
                return Some(node);
            }
            other => {
                debug!(event = ?other, "unexpected event");
                return None;
            }
        };

        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        Some(node)
    }

    /// Consume the end event of the collection opened at `start`.
    fn close(&mut self, id: usize, start: Pos, flow: bool, last: Option<usize>) {
        let Some((_, mark)) = self.events.get(self.at) else {
            return;
        };
        let pos = self.source.pos(mark);
        self.at += 1;
        self.steps.push(Step::Close {
            pos,
            col: start.col,
            flow,
            target: last.unwrap_or(id),
        });
    }

    /// Aliases are expanded to a copy of the anchored node, without comments.
    fn alias(&mut self, anchor: usize) -> Node {
        let node = self
            .anchors
            .get(&anchor)
            .cloned()
            .unwrap_or_else(|| Node::scalar("", ScalarType::Null));
        let mut size = 0;
        node.walk(&mut |_| size += 1);
        // The alias itself was numbered when its event was read.
        self.next_id += size - 1;
        node
    }

    fn scalar(&mut self, value: String, style: TScalarStyle, pos: Pos) -> Node {
        match style {
            TScalarStyle::Plain => {
                let written = !value.is_empty() && self.source.rest(pos).starts_with(&value);
                if !written && (value.is_empty() || value == "~") {
                    return Node::scalar("", ScalarType::Null);
                }
                let mut node = Node::scalar(value.clone(), scalar_type(&value));
                if written {
                    node.source = Some(ScalarSource::Inline(value));
                }
                node
            }
            TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted => {
                let end = self.source.quoted_end(pos);
                let mut node = Node::string(value);
                if let Some(end) = end {
                    self.opaque.push((pos, end));
                    if end.line == pos.line {
                        node.source = self
                            .source
                            .line(pos.line)
                            .get(pos.col..end.col)
                            .map(|text| ScalarSource::Inline(text.to_string()));
                    }
                }
                node
            }
            TScalarStyle::Literal | TScalarStyle::Folded => {
                let body = self.source.block_body(pos, self.next_line());
                self.opaque
                    .push((Pos::line_start(pos.line + 1), Pos::line_start(body.end)));
                let mut node = Node::string(value);
                // Explicit indentation indicators depend on the original nesting.
                if !body.lines.is_empty() && !body.header.contains(|c: char| c.is_ascii_digit()) {
                    node.source = Some(ScalarSource::Block {
                        header: body.header,
                        body: body.lines,
                    });
                }
                node
            }
        }
    }
}

/// Tag as written: `!local`, `!!core` or `!<verbatim>`.
fn tag_text(tag: &Tag) -> String {
    match tag.handle.as_str() {
        "!" => format!("!{}", tag.suffix),
        "tag:yaml.org,2002:" => format!("!!{}", tag.suffix),
        "" if tag.suffix == "!" => "!".to_string(),
        handle => format!("!<{handle}{}>", tag.suffix),
    }
}
