//! Source text addressed by parser marks

use yaml_rust2::scanner::Marker;

/// Zero-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    pub fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }
}

/// Body of a block scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockBody {
    /// Header token, e.g. `|-`.
    pub header: String,
    /// Body lines with the content indentation removed.
    pub lines: Vec<String>,
    /// First line after the body.
    pub end: usize,
}

pub(crate) struct Source<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> &'a str {
        self.lines.get(index).copied().unwrap_or("")
    }

    /// Marks count lines from 1 and columns in characters.
    pub fn pos(&self, mark: &Marker) -> Pos {
        let line = mark.line().saturating_sub(1);
        let text = self.line(line);
        let col = text
            .char_indices()
            .nth(mark.col())
            .map_or(text.len(), |(i, _)| i);
        Pos { line, col }
    }

    /// Text from `pos` to the end of its line.
    pub fn rest(&self, pos: Pos) -> &'a str {
        self.line(pos.line).get(pos.col..).unwrap_or("")
    }

    /// Position right after the closing quote of the quoted scalar opening
    /// at `start`.
    pub fn quoted_end(&self, start: Pos) -> Option<Pos> {
        let quote = self.rest(start).chars().next()?;
        if quote != '\'' && quote != '"' {
            return None;
        }

        let mut from = start.col + 1;
        let mut escaped = false;
        for line in start.line..self.lines.len() {
            let text = self.line(line).get(from..).unwrap_or("");
            let mut chars = text.char_indices().peekable();
            while let Some((i, c)) = chars.next() {
                if escaped {
                    escaped = false;
                    continue;
                }
                match (quote, c) {
                    ('"', '\\') => escaped = true,
                    ('\'', '\'') if chars.peek().is_some_and(|&(_, next)| next == '\'') => {
                        chars.next();
                    }
                    (q, c) if q == c => {
                        return Some(Pos {
                            line,
                            col: from + i + 1,
                        })
                    }
                    _ => {}
                }
            }
            // A trailing backslash escapes the line break.
            escaped = false;
            from = 0;
        }
        None
    }

    /// Body of the block scalar whose header starts at `header`.
    ///
    /// `limit` is the line of the next parser event; the body never reaches
    /// it. Content is indented deeper than the header line, and less indented
    /// lines before `limit` are comments following the body.
    pub fn block_body(&self, header: Pos, limit: usize) -> BlockBody {
        let header_text: String = self
            .rest(header)
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '#')
            .collect();

        let limit = limit.min(self.lines.len());
        let first = header.line + 1;
        let floor = indentation(self.line(header.line));
        let indent = (first..limit)
            .map(|i| self.line(i))
            .find(|text| !text.trim().is_empty())
            .map(indentation)
            .filter(|&n| n > floor);
        let Some(indent) = indent else {
            return BlockBody {
                header: header_text,
                lines: Vec::new(),
                end: first,
            };
        };

        let mut end = first;
        while end < limit {
            let text = self.line(end);
            if !text.trim().is_empty() && indentation(text) < indent {
                break;
            }
            end += 1;
        }

        let mut lines: Vec<String> = (first..end)
            .map(|i| self.line(i).get(indent..).unwrap_or("").to_string())
            .collect();
        if !header_text.contains('+') {
            while lines.last().is_some_and(|l| l.trim().is_empty()) {
                lines.pop();
            }
        }

        BlockBody {
            header: header_text,
            lines,
            end,
        }
    }
}

fn indentation(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}
