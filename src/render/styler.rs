//! Key and comment decoration applied while serializing

use crate::domain::Category;
use crate::render::palette::Palette;

/// Prefix of the textual key marker: `CATEGORY_<label>_<key>`.
pub const KEY_MARKER: &str = "CATEGORY_";

/// Decorates keys and comment lines as the emitter writes them.
pub trait Styler {
    /// `text` is the key as it appears in YAML, quotes included.
    fn key(&self, text: &str, category: Category) -> String;

    /// `line` is a single comment line starting with `#`.
    fn comment(&self, line: &str) -> String;
}

/// Paints keys and comments with ANSI escapes.
#[derive(Debug, Clone, Default)]
pub struct AnsiStyler {
    palette: Palette,
}

impl AnsiStyler {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Styler for AnsiStyler {
    fn key(&self, text: &str, category: Category) -> String {
        self.palette.paint_key(text, category)
    }

    fn comment(&self, line: &str) -> String {
        self.palette.paint_comment(line)
    }
}

/// Embeds category markers in key text for later [`render`](crate::render::render).
///
/// Comments pass through untouched; mark them with
/// [`annotate_comments`](crate::application::annotate::annotate_comments) first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerStyler;

impl Styler for MarkerStyler {
    fn key(&self, text: &str, category: Category) -> String {
        if category.is_styled() {
            format!("{KEY_MARKER}{}_{text}", category.label())
        } else {
            text.to_string()
        }
    }

    fn comment(&self, line: &str) -> String {
        line.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn key(&self, text: &str, _category: Category) -> String {
        text.to_string()
    }

    fn comment(&self, line: &str) -> String {
        line.to_string()
    }
}
