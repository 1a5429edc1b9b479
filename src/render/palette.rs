//! ANSI styles per category

use colored::{Color, Colorize};

use crate::domain::Category;

/// Foreground color with optional bold weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: Color,
    pub bold: bool,
}

impl Style {
    pub const fn new(color: Color, bold: bool) -> Self {
        Self { color, bold }
    }

    /// Parse `"[bold ]<color>"`, e.g. `"bold red"` or `"bright black"`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let spec = spec.trim().to_lowercase();
        let (bold, name) = match spec.strip_prefix("bold ") {
            Some(rest) => (true, rest.trim()),
            None => (false, spec.as_str()),
        };
        let color = name
            .parse::<Color>()
            .map_err(|_| format!("unknown color '{name}'"))?;
        Ok(Self { color, bold })
    }

    pub fn paint(&self, text: &str) -> String {
        let painted = text.color(self.color);
        if self.bold {
            painted.bold().to_string()
        } else {
            painted.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub emphasis_high: Style,
    pub emphasis_medium: Style,
    pub emphasis_low: Style,
    pub muted: Style,
    pub comment: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            emphasis_high: Style::new(Color::Red, true),
            emphasis_medium: Style::new(Color::Yellow, true),
            emphasis_low: Style::new(Color::Blue, true),
            muted: Style::new(Color::BrightBlack, false),
            comment: Style::new(Color::BrightBlack, false),
        }
    }
}

impl Palette {
    /// `None` for [`Category::Unknown`], which is never styled.
    pub fn style(&self, category: Category) -> Option<Style> {
        match category {
            Category::EmphasisHigh => Some(self.emphasis_high),
            Category::EmphasisMedium => Some(self.emphasis_medium),
            Category::EmphasisLow => Some(self.emphasis_low),
            Category::Muted => Some(self.muted),
            Category::Unknown => None,
        }
    }

    pub fn paint_key(&self, text: &str, category: Category) -> String {
        match self.style(category) {
            Some(style) => style.paint(text),
            None => text.to_string(),
        }
    }

    pub fn paint_comment(&self, text: &str) -> String {
        self.comment.paint(text)
    }
}
