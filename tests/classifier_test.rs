//! Tests for path classification

use rstest::rstest;

use yamlshade::domain::{classify, Category, Classifier, DomainError, RuleTable};

#[rstest]
#[case("$root.apiVersion", Category::EmphasisHigh)]
#[case("$root.kind", Category::EmphasisHigh)]
#[case("$root.metadata", Category::EmphasisMedium)]
#[case("$root.metadata.name", Category::EmphasisHigh)]
#[case("$root.metadata.labels.app", Category::EmphasisMedium)]
#[case("$root.spec", Category::EmphasisHigh)]
#[case("$root.spec.containers", Category::EmphasisLow)]
#[case("$root.spec.containers.name", Category::EmphasisHigh)]
#[case("$root.spec.containers.image", Category::EmphasisHigh)]
#[case("$root.spec.template.spec", Category::EmphasisHigh)]
#[case("$root.status", Category::Muted)]
#[case("$root.status.phase", Category::Muted)]
#[case("$root.other", Category::Unknown)]
#[case("$root.specification", Category::Unknown)]
#[case("$root.xkind", Category::Unknown)]
fn given_default_rules_when_classifying_then_returns_category(
    #[case] path: &str,
    #[case] expected: Category,
) {
    assert_eq!(classify(path), expected);
}

#[test]
fn given_same_path_when_classifying_twice_then_result_is_stable() {
    // Arrange
    let classifier = Classifier::default();

    // Act
    let first = classifier.classify("$root.spec.containers.image");
    let second = classifier.classify("$root.spec.containers.image");

    // Assert
    assert_eq!(first, second);
    assert_eq!(first, classify("$root.spec.containers.image"));
}

#[test]
fn given_custom_rules_when_classifying_then_uses_them() {
    // Arrange
    let rules = RuleTable {
        high_suffixes: vec!["data".into()],
        medium_prefixes: vec![],
        low_prefixes: vec!["$root".into()],
        muted_prefixes: vec![],
    };
    let classifier = Classifier::new(rules).expect("valid rules");

    // Act / Assert
    assert_eq!(classifier.classify("$root.data"), Category::EmphasisHigh);
    assert_eq!(classifier.classify("$root.kind"), Category::EmphasisLow);
}

#[rstest]
#[case::trailing_dot_suffix(vec!["spec.".to_string()], vec![])]
#[case::empty_suffix(vec![String::new()], vec![])]
#[case::unrooted_prefix(vec![], vec!["spec".to_string()])]
#[case::rootlike_prefix(vec![], vec!["$rootspec".to_string()])]
fn given_malformed_rule_when_building_classifier_then_fails(
    #[case] high_suffixes: Vec<String>,
    #[case] low_prefixes: Vec<String>,
) {
    let rules = RuleTable {
        high_suffixes,
        low_prefixes,
        ..RuleTable::default()
    };

    let result = Classifier::new(rules);

    assert!(matches!(result, Err(DomainError::InvalidRule { .. })));
}

#[rstest]
#[case("$root.spec.template.kind", Category::EmphasisHigh, Category::EmphasisLow)]
#[case("$root.spec.ref.apiVersion", Category::EmphasisHigh, Category::EmphasisLow)]
#[case("$root.kind", Category::EmphasisHigh, Category::EmphasisHigh)]
fn given_nested_kind_when_classifying_then_rooted_suffix_matches_only_at_root(
    #[case] path: &str,
    #[case] bare: Category,
    #[case] rooted: Category,
) {
    // Arrange
    let mut rules = RuleTable::default();
    rules
        .high_suffixes
        .retain(|s| s != "apiVersion" && s != "kind");
    rules
        .high_suffixes
        .extend(["$root.apiVersion".to_string(), "$root.kind".to_string()]);
    let rooted_classifier = Classifier::new(rules).expect("valid rules");

    // Act
    let with_bare = classify(path);
    let with_rooted = rooted_classifier.classify(path);

    // Assert
    assert_eq!(with_bare, bare);
    assert_eq!(with_rooted, rooted);
}
