//! Path classifier: structural path -> style category
//!
//! Rules are evaluated in a fixed order, first match wins:
//! 1. high suffixes
//! 2. medium prefixes
//! 3. low prefixes
//! 4. muted prefixes
//!
//! Matching is segment-aware: suffix `spec` matches `$root.spec` and
//! `$root.template.spec` but not `$root.xspec`.

use std::sync::LazyLock;

use crate::domain::path::ROOT;
use crate::domain::{Category, DomainError};

/// Rule table driving [`Classifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub high_suffixes: Vec<String>,
    pub medium_prefixes: Vec<String>,
    pub low_prefixes: Vec<String>,
    pub muted_prefixes: Vec<String>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            high_suffixes: [
                "apiVersion",
                "kind",
                "metadata.name",
                "spec",
                "containers.name",
                "containers.image",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            medium_prefixes: vec!["$root.metadata".into()],
            low_prefixes: vec!["$root.spec".into()],
            muted_prefixes: vec!["$root.status".into()],
        }
    }
}

impl RuleTable {
    /// Reject patterns that can never match a structural path.
    pub fn validate(&self) -> Result<(), DomainError> {
        for suffix in &self.high_suffixes {
            if suffix.is_empty() || suffix.starts_with('.') || suffix.ends_with('.') {
                return Err(DomainError::InvalidRule {
                    pattern: suffix.clone(),
                    reason: "suffix must be non-empty dotted segments".into(),
                });
            }
        }
        let prefixes = self
            .medium_prefixes
            .iter()
            .chain(&self.low_prefixes)
            .chain(&self.muted_prefixes);
        for prefix in prefixes {
            let rooted = prefix == ROOT
                || prefix
                    .strip_prefix(ROOT)
                    .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1);
            if !rooted || prefix.ends_with('.') {
                return Err(DomainError::InvalidRule {
                    pattern: prefix.clone(),
                    reason: format!("prefix must start with '{ROOT}'"),
                });
            }
        }
        Ok(())
    }
}

/// Pure function of a path: same input, same category.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: RuleTable,
}

impl Classifier {
    pub fn new(rules: RuleTable) -> Result<Self, DomainError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn classify(&self, path: &str) -> Category {
        if self.rules.high_suffixes.iter().any(|s| has_suffix(path, s)) {
            return Category::EmphasisHigh;
        }
        let tiers = [
            (&self.rules.medium_prefixes, Category::EmphasisMedium),
            (&self.rules.low_prefixes, Category::EmphasisLow),
            (&self.rules.muted_prefixes, Category::Muted),
        ];
        tiers
            .into_iter()
            .find(|(prefixes, _)| prefixes.iter().any(|p| has_prefix(path, p)))
            .map(|(_, category)| category)
            .unwrap_or(Category::Unknown)
    }
}

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classify with the built-in Kubernetes rule table.
pub fn classify(path: &str) -> Category {
    DEFAULT_CLASSIFIER.classify(path)
}

fn has_suffix(path: &str, suffix: &str) -> bool {
    match path.strip_suffix(suffix) {
        Some("") => true,
        Some(head) => head.ends_with('.'),
        None => false,
    }
}

fn has_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_segment_boundaries_when_matching_then_partial_segments_do_not_match() {
        assert!(has_suffix("$root.spec", "spec"));
        assert!(has_suffix("spec", "spec"));
        assert!(!has_suffix("$root.xspec", "spec"));
        assert!(has_prefix("$root.metadata", "$root.metadata"));
        assert!(has_prefix("$root.metadata.labels", "$root.metadata"));
        assert!(!has_prefix("$root.metadataExtra", "$root.metadata"));
    }

    #[test]
    fn given_default_rules_then_validate() {
        assert!(RuleTable::default().validate().is_ok());
    }

    #[test]
    fn given_unrooted_prefix_when_validating_then_rejects() {
        let rules = RuleTable {
            low_prefixes: vec!["spec".into()],
            ..RuleTable::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(DomainError::InvalidRule { pattern, .. }) if pattern == "spec"
        ));
    }

    #[test]
    fn given_dotted_suffix_when_validating_then_rejects() {
        let rules = RuleTable {
            high_suffixes: vec![".kind".into()],
            ..RuleTable::default()
        };
        assert!(Classifier::new(rules).is_err());
    }
}
