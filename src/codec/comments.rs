//! Comment recovery
//!
//! The parser drops comments, so they are found in the source text and
//! anchored to nodes by position:
//! - a comment sharing its line with content trails the last node that
//!   starts before it;
//! - a comment on its own line leads the next mapping key or sequence item;
//! - own-line comments left when a block collection closes, indented at least
//!   as deep as the collection, follow its last entry.
//!
//! Anything still unclaimed at the end follows the root.

use crate::codec::source::{Pos, Source};
use crate::domain::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Root,
    Key,
    Value,
    Item,
}

/// Node boundaries in document order; ids number nodes in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Open {
        pos: Pos,
        id: usize,
        role: Role,
    },
    Close {
        pos: Pos,
        /// Column of the collection's first entry.
        col: usize,
        flow: bool,
        /// Last key or item, or the collection itself when empty.
        target: usize,
    },
}

impl Step {
    fn pos(&self) -> Pos {
        match *self {
            Step::Open { pos, .. } | Step::Close { pos, .. } => pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Comment {
    pub pos: Pos,
    /// Text from `#` to the end of the line.
    pub text: String,
    pub own_line: bool,
}

/// Comments before `end`, skipping `#` inside the `opaque` ranges.
pub(crate) fn find(source: &Source, opaque: &[(Pos, Pos)], end: Pos) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut ranges = opaque.iter().peekable();

    for index in 0..source.line_count().min(end.line + 1) {
        let line = source.line(index);
        for (col, _) in line.match_indices('#') {
            let pos = Pos { line: index, col };
            if pos >= end {
                break;
            }
            let before = &line[..col];
            if !(before.is_empty() || before.ends_with([' ', '\t'])) {
                continue;
            }
            while ranges.next_if(|(_, stop)| *stop <= pos).is_some() {}
            if ranges.peek().is_some_and(|(start, _)| *start <= pos) {
                continue;
            }
            comments.push(Comment {
                pos,
                text: line[col..].trim_end().to_string(),
                own_line: before.trim().is_empty(),
            });
            break;
        }
    }
    comments
}

#[derive(Debug, Default, Clone)]
struct Slot {
    head: Vec<String>,
    line: String,
    foot: Vec<String>,
}

impl Slot {
    fn trail(&mut self, text: String) {
        if self.line.is_empty() {
            self.line = text;
        } else {
            self.foot.push(text);
        }
    }
}

/// Attach `comments` to the `count` nodes of `root` described by `steps`.
pub(crate) fn attach(root: &mut Node, count: usize, steps: &[Step], comments: Vec<Comment>) {
    let mut slots = vec![Slot::default(); count.max(1)];
    let mut comments = comments.into_iter().peekable();
    let mut pending: Vec<Comment> = Vec::new();
    let mut last: Option<usize> = None;

    for step in steps {
        while let Some(comment) = comments.next_if(|c| c.pos < step.pos()) {
            claim(&mut slots, &mut pending, last, comment);
        }
        match *step {
            Step::Open { id, role, .. } => {
                if role != Role::Value {
                    slots[id].head.extend(pending.drain(..).map(|c| c.text));
                }
                last = Some(id);
            }
            Step::Close {
                col, flow, target, ..
            } => {
                let inside = if flow {
                    pending.len()
                } else {
                    pending
                        .iter()
                        .position(|c| c.pos.col < col)
                        .unwrap_or(pending.len())
                };
                slots[target]
                    .foot
                    .extend(pending.drain(..inside).map(|c| c.text));
            }
        }
    }
    for comment in comments {
        claim(&mut slots, &mut pending, last, comment);
    }
    slots[0].foot.extend(pending.drain(..).map(|c| c.text));

    let mut next = 0;
    apply(root, &mut slots, &mut next);
}

fn claim(slots: &mut [Slot], pending: &mut Vec<Comment>, last: Option<usize>, comment: Comment) {
    match last {
        Some(id) if !comment.own_line => slots[id].trail(comment.text),
        _ => pending.push(comment),
    }
}

/// Move slot contents onto the nodes, numbering them in pre-order.
fn apply(node: &mut Node, slots: &mut [Slot], next: &mut usize) {
    if let Some(slot) = slots.get_mut(*next) {
        node.head_comment = slot.head.join("\n");
        node.line_comment = std::mem::take(&mut slot.line);
        node.foot_comment = slot.foot.join("\n");
    }
    *next += 1;
    for child in &mut node.children {
        apply(child, slots, next);
    }
}
