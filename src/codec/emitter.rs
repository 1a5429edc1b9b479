//! Serializer adapter: [`Node`] tree -> block-style YAML text
//!
//! Scalars read from a document are written as they appeared there; built
//! strings are quoted by `yaml-rust2`. Keys and comment lines go through a
//! [`Styler`], whose output is written verbatim.

use yaml_rust2::{Yaml, YamlEmitter};

use crate::codec::scalar_type;
use crate::domain::{Node, NodeKind, ScalarSource, ScalarType};
use crate::render::Styler;

/// Indentation the CLI uses unless configured otherwise.
pub const DEFAULT_INDENT: usize = 2;

/// Width of the `- `, `? ` and `: ` prefixes.
const INDICATOR_WIDTH: usize = 2;

#[derive(Debug)]
struct Line {
    indent: usize,
    text: String,
    comment: bool,
}

/// How a value sits relative to its key or indicator.
enum Layout {
    /// Fits on the key line.
    Inline(String),
    /// Block scalar: header on the key line, body below.
    Block { header: String, body: Vec<String> },
    /// Non-empty collection on the following lines, with an optional tag.
    Nested(String),
}

/// Serialize `root` with `indent` spaces per nesting level.
pub fn emit(root: &Node, indent: usize, styler: &dyn Styler) -> String {
    let mut emitter = Emitter {
        indent: indent.max(1),
        styler,
        lines: Vec::new(),
    };
    emitter.comments(&root.head_comment, 0);
    emitter.block(root, 0);
    emitter.comments(&root.foot_comment, 0);
    emitter.finish()
}

struct Emitter<'s> {
    indent: usize,
    styler: &'s dyn Styler,
    lines: Vec<Line>,
}

impl Emitter<'_> {
    fn push(&mut self, indent: usize, text: String) {
        self.lines.push(Line {
            indent,
            text,
            comment: false,
        });
    }

    fn comments(&mut self, comment: &str, indent: usize) {
        if comment.is_empty() {
            return;
        }
        for line in comment.lines() {
            let text = self.styler.comment(line);
            self.lines.push(Line {
                indent,
                text,
                comment: true,
            });
        }
    }

    /// ` # comment` suffix for the line a node ends on.
    fn trailing(&self, comments: &[&str]) -> String {
        comments
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| format!(" {}", self.styler.comment(c)))
            .collect()
    }

    /// Emit a node that starts on its own line.
    fn block(&mut self, node: &Node, indent: usize) {
        match layout(node) {
            Layout::Nested(tag) => {
                if tag.is_empty() {
                    self.comments(&node.line_comment, indent);
                } else {
                    let suffix = self.trailing(&[node.line_comment.as_str()]);
                    self.push(indent, format!("{tag}{suffix}"));
                }
                self.children(node, indent);
            }
            Layout::Inline(text) => {
                let suffix = self.trailing(&[node.line_comment.as_str()]);
                self.push(indent, format!("{text}{suffix}"));
            }
            Layout::Block { header, body } => {
                let suffix = self.trailing(&[node.line_comment.as_str()]);
                self.push(indent, format!("{header}{suffix}"));
                self.body(body, indent + self.indent);
            }
        }
    }

    fn body(&mut self, body: Vec<String>, indent: usize) {
        for text in body {
            self.push(indent, text);
        }
    }

    fn mapping(&mut self, node: &Node, indent: usize) {
        for (key, value) in node.entries() {
            self.comments(&key.head_comment, indent);
            self.comments(&value.head_comment, indent);

            if key.is_collection() {
                // Explicit entry: `? key` then `: value`.
                self.entry("?", key, indent);
                self.entry(":", value, indent);
            } else {
                self.pair(key, value, indent);
            }

            self.comments(&value.foot_comment, indent);
            self.comments(&key.foot_comment, indent);
        }
    }

    fn pair(&mut self, key: &Node, value: &Node, indent: usize) {
        let styled_key = self.styler.key(&key_text(key), key.category);
        let suffix = self.trailing(&[key.line_comment.as_str(), value.line_comment.as_str()]);
        match layout(value) {
            Layout::Inline(text) if text.is_empty() => {
                self.push(indent, format!("{styled_key}:{suffix}"));
            }
            Layout::Inline(text) => {
                self.push(indent, format!("{styled_key}: {text}{suffix}"));
            }
            Layout::Block { header, body } => {
                self.push(indent, format!("{styled_key}: {header}{suffix}"));
                self.body(body, indent + self.indent);
            }
            Layout::Nested(tag) => {
                let head = if tag.is_empty() {
                    format!("{styled_key}:{suffix}")
                } else {
                    format!("{styled_key}: {tag}{suffix}")
                };
                self.push(indent, head);
                self.children(value, indent + self.indent);
            }
        }
    }

    fn sequence(&mut self, node: &Node, indent: usize) {
        for item in &node.children {
            self.comments(&item.head_comment, indent);
            self.entry("-", item, indent);
            self.comments(&item.foot_comment, indent);
        }
    }

    /// Emit `node` after an indicator (`-`, `?` or `:`) at `indent`.
    fn entry(&mut self, indicator: &str, node: &Node, indent: usize) {
        let suffix = self.trailing(&[node.line_comment.as_str()]);
        match layout(node) {
            Layout::Inline(text) => {
                let head = format!("{indicator} {text}");
                self.push(indent, format!("{}{suffix}", head.trim_end()));
            }
            Layout::Block { header, body } => {
                self.push(indent, format!("{indicator} {header}{suffix}"));
                self.body(body, indent + self.indent);
            }
            Layout::Nested(tag) => {
                if !tag.is_empty() || !node.line_comment.is_empty() {
                    // Indicator on its own line, content below.
                    let head = format!("{indicator} {tag}");
                    self.push(indent, format!("{}{suffix}", head.trim_end()));
                    self.children(node, indent + INDICATOR_WIDTH);
                } else {
                    let start = self.lines.len();
                    self.children(node, indent + INDICATOR_WIDTH);
                    self.hoist(start, indent, indicator);
                }
            }
        }
    }

    fn children(&mut self, node: &Node, indent: usize) {
        match node.kind {
            NodeKind::Mapping => self.mapping(node, indent),
            _ => self.sequence(node, indent),
        }
    }

    /// Move the first content line emitted since `start` onto the indicator.
    fn hoist(&mut self, start: usize, indent: usize, indicator: &str) {
        if let Some(line) = self.lines[start..].iter_mut().find(|l| !l.comment) {
            line.indent = indent;
            line.text = format!("{indicator} {}", line.text);
        }
    }

    fn finish(self) -> String {
        let mut out = String::new();
        for line in self.lines {
            if !line.text.is_empty() {
                out.push_str(&" ".repeat(line.indent));
                out.push_str(&line.text);
            }
            out.push('\n');
        }
        out
    }
}

fn layout(node: &Node) -> Layout {
    let tag = node.tag.clone().unwrap_or_default();
    let with_tag = |text: String| {
        if tag.is_empty() {
            text
        } else if text.is_empty() {
            tag.clone()
        } else {
            format!("{tag} {text}")
        }
    };
    match node.kind {
        NodeKind::Mapping if node.children.is_empty() => Layout::Inline(with_tag("{}".into())),
        NodeKind::Sequence if node.children.is_empty() => Layout::Inline(with_tag("[]".into())),
        NodeKind::Mapping | NodeKind::Sequence => Layout::Nested(tag.clone()),
        NodeKind::Scalar => match scalar(node) {
            Layout::Inline(text) => Layout::Inline(with_tag(text)),
            Layout::Block { header, body } => Layout::Block {
                header: with_tag(header),
                body,
            },
            nested => nested,
        },
    }
}

fn scalar(node: &Node) -> Layout {
    match &node.source {
        Some(ScalarSource::Inline(text)) => return Layout::Inline(text.clone()),
        Some(ScalarSource::Block { header, body }) => {
            return Layout::Block {
                header: header.clone(),
                body: body.clone(),
            }
        }
        None => {}
    }
    match node.scalar_type {
        ScalarType::Null => Layout::Inline(String::new()),
        ScalarType::Bool | ScalarType::Number => Layout::Inline(node.value.clone()),
        ScalarType::String if node.value.contains('\n') => {
            literal_block(&node.value).unwrap_or_else(|| Layout::Inline(quoted(&node.value)))
        }
        ScalarType::String => Layout::Inline(quoted(&node.value)),
    }
}

fn key_text(key: &Node) -> String {
    let text = match (&key.source, key.scalar_type) {
        (Some(ScalarSource::Inline(text)), _) => text.clone(),
        (_, ScalarType::String) => quoted(&key.value),
        (_, ScalarType::Null) if key.value.is_empty() => "~".to_string(),
        _ => key.value.clone(),
    };
    match &key.tag {
        Some(tag) => format!("{tag} {text}"),
        None => text,
    }
}

/// String as `yaml-rust2` writes it, quotes included when needed.
fn quoted(value: &str) -> String {
    let mut out = String::new();
    let dumped = {
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(&Yaml::String(value.to_string()))
    };
    let text = match dumped {
        Ok(()) => out.strip_prefix("---").unwrap_or(&out).trim_start_matches('\n'),
        Err(_) => "",
    };
    // Core schema forms the emitter leaves bare would read back as non-strings.
    if text.is_empty() || (text == value && scalar_type(value) != ScalarType::String) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        text.to_string()
    }
}

/// Literal block (`|`, `|-`, `|+`) for multi-line strings that survive it.
fn literal_block(value: &str) -> Option<Layout> {
    let content = value.trim_end_matches('\n');
    let first = content.lines().find(|l| !l.is_empty())?;
    if first.starts_with([' ', '\t']) {
        return None;
    }
    if content.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        return None;
    }
    // Whitespace-only lines would be read back as indentation.
    if content.split('\n').any(|l| !l.is_empty() && l.trim().is_empty()) {
        return None;
    }

    let trailing = value.len() - content.len();
    let header = match trailing {
        0 => "|-",
        1 => "|",
        _ => "|+",
    };
    let mut body: Vec<String> = content.split('\n').map(str::to_string).collect();
    body.extend(std::iter::repeat(String::new()).take(trailing.saturating_sub(1)));
    Some(Layout::Block {
        header: header.to_string(),
        body,
    })
}
