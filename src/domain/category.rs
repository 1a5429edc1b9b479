//! Style categories assigned to mapping keys

use std::fmt;

/// Visual weight of a key, derived purely from its structural path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    EmphasisHigh,
    EmphasisMedium,
    EmphasisLow,
    Muted,
    #[default]
    Unknown,
}

impl Category {
    /// Categories that carry a style, in rendering order.
    pub const STYLED: [Category; 4] = [
        Category::EmphasisHigh,
        Category::EmphasisMedium,
        Category::EmphasisLow,
        Category::Muted,
    ];

    /// Stable textual label, used in markers and configuration keys.
    pub fn label(self) -> &'static str {
        match self {
            Category::EmphasisHigh => "emphasis-high",
            Category::EmphasisMedium => "emphasis-medium",
            Category::EmphasisLow => "emphasis-low",
            Category::Muted => "muted",
            Category::Unknown => "unknown",
        }
    }

    pub fn is_styled(self) -> bool {
        self != Category::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
