//! Renderer: styles and marker substitution
//!
//! The default flow styles keys and comments while serializing through an
//! [`AnsiStyler`]. The marker flow serializes with a [`MarkerStyler`] and
//! turns the markers into ANSI escapes afterwards with [`render`]; both
//! produce the same bytes.

pub mod palette;
pub mod styler;

use regex::{Captures, Regex};

use crate::application::annotate::COMMENT_MARKER;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Category;

pub use palette::{Palette, Style};
pub use styler::{AnsiStyler, MarkerStyler, PlainStyler, Styler, KEY_MARKER};

/// Replace key and comment markers in serialized text with ANSI styles.
///
/// Key markers are substituted first, one category at a time; a key marker
/// covers the text up to the next `:` on the same line. A comment marker
/// covers the rest of its line.
pub fn render(text: &str, palette: &Palette) -> ApplicationResult<String> {
    let mut out = text.to_string();

    for category in Category::STYLED {
        let Some(style) = palette.style(category) else {
            continue;
        };
        let pattern = format!(
            "{}{}_([^:\\n]+)",
            regex::escape(KEY_MARKER),
            regex::escape(category.label())
        );
        let re = Regex::new(&pattern).map_err(render_err)?;
        out = re
            .replace_all(&out, |caps: &Captures| style.paint(&caps[1]))
            .into_owned();
    }

    let re = Regex::new(&format!("#{}(.*)", regex::escape(COMMENT_MARKER))).map_err(render_err)?;
    out = re
        .replace_all(&out, |caps: &Captures| {
            palette.paint_comment(&format!("#{}", &caps[1]))
        })
        .into_owned();

    Ok(out)
}

fn render_err(e: regex::Error) -> ApplicationError {
    ApplicationError::Render {
        message: e.to_string(),
    }
}
