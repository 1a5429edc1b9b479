//! Tests for parsing YAML into a node tree with comments

use std::path::Path;

use rstest::rstest;

use yamlshade::application::ApplicationError;
use yamlshade::codec::parse_document;
use yamlshade::domain::{DomainError, Node, NodeKind, ScalarSource, ScalarType};

fn parse(source: &str) -> Node {
    parse_document(source, Path::new("test.yaml")).expect("parse")
}

fn value<'a>(node: &'a Node, key: &str) -> Option<&'a Node> {
    node.entries().find(|(k, _)| k.value == key).map(|(_, v)| v)
}

fn all_comments(root: &Node) -> Vec<String> {
    let mut comments = Vec::new();
    root.walk(&mut |node| {
        for c in [&node.head_comment, &node.line_comment, &node.foot_comment] {
            comments.extend(c.lines().map(str::to_string));
        }
    });
    comments
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n\n")]
#[case::comment_only("# nothing here\n")]
#[case::marker_only("---\n")]
#[case::explicit_null("~\n")]
fn given_document_without_content_when_parsing_then_empty_document(#[case] source: &str) {
    let result = parse_document(source, Path::new("empty.yaml"));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::EmptyDocument))
    ));
}

#[test]
fn given_invalid_yaml_when_parsing_then_parse_error_names_file() {
    let result = parse_document("a: [1, 2\n", Path::new("broken.yaml"));

    match result {
        Err(e @ ApplicationError::Parse { .. }) => {
            assert!(e.to_string().contains("broken.yaml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn given_mapping_when_parsing_then_keeps_order_and_types() {
    // Act
    let root = parse("b: 1\na: true\nc: text\nd:\n");

    // Assert
    assert_eq!(root.kind, NodeKind::Mapping);
    let keys: Vec<&str> = root.entries().map(|(k, _)| k.value.as_str()).collect();
    assert_eq!(keys, vec!["b", "a", "c", "d"]);
    assert_eq!(value(&root, "b").map(|n| n.scalar_type), Some(ScalarType::Number));
    assert_eq!(value(&root, "a").map(|n| n.scalar_type), Some(ScalarType::Bool));
    assert_eq!(value(&root, "c").map(|n| n.scalar_type), Some(ScalarType::String));
    assert_eq!(value(&root, "d").map(|n| n.scalar_type), Some(ScalarType::Null));
}

#[test]
fn given_comments_when_parsing_then_attaches_to_nodes() {
    // Arrange
    let source = "\
# head
a: 1 # line a
# before b
b:
  - x # item
  - y
# foot
";

    // Act
    let root = parse(source);

    // Assert
    assert_eq!(root.head_comment, "# head");
    let (_, a_value) = root.entries().next().expect("first entry");
    assert_eq!(a_value.line_comment, "# line a");

    let (b_key, b_value) = root.entries().nth(1).expect("second entry");
    assert_eq!(b_key.head_comment, "# before b");
    assert_eq!(b_value.children[0].line_comment, "# item");
    assert_eq!(b_value.children[1].line_comment, "");
    assert_eq!(b_key.foot_comment, "# foot");
}

#[test]
fn given_nested_sequence_of_mappings_when_parsing_then_comments_follow_keys() {
    let source = "\
spec:
  containers:
    # first container
    - name: c1 # primary
      image: nginx # pinned
";

    let root = parse(source);

    let containers = value(&root, "spec")
        .and_then(|spec| value(spec, "containers"))
        .expect("containers");
    let item = &containers.children[0];
    assert_eq!(item.head_comment, "# first container");
    assert_eq!(value(item, "name").map(|n| n.line_comment.as_str()), Some("# primary"));
    assert_eq!(value(item, "image").map(|n| n.line_comment.as_str()), Some("# pinned"));
}

#[test]
fn given_hash_inside_strings_when_parsing_then_not_a_comment() {
    let source = "\
url: \"http://x/#anchor\"
script: |
  # kept as text
  run
";

    let root = parse(source);

    let comments = all_comments(&root);
    assert!(comments.is_empty(), "unexpected comments: {comments:?}");
    assert_eq!(
        value(&root, "script").map(|n| n.value.as_str()),
        Some("# kept as text\nrun\n")
    );
}

#[test]
fn given_multiple_documents_when_parsing_then_reads_only_first() {
    let root = parse("a: 1\n---\nb: 2\n");

    assert!(value(&root, "a").is_some());
    assert!(value(&root, "b").is_none());
}

#[test]
fn given_tagged_value_when_parsing_then_keeps_tag() {
    let root = parse("ref: !Ref bucket\n");

    let tagged = value(&root, "ref").expect("ref");
    assert_eq!(tagged.tag.as_deref(), Some("!Ref"));
    assert_eq!(tagged.value, "bucket");
}

#[test]
fn given_number_forms_when_parsing_then_keeps_source_text() {
    // Act
    let root = parse("version: 1.10\nport: 0x1F\n0o10: octal-key\nratio: .5\n");

    // Assert
    let keys: Vec<&str> = root.entries().map(|(k, _)| k.value.as_str()).collect();
    assert_eq!(keys, vec!["version", "port", "0o10", "ratio"]);
    let version = value(&root, "version").expect("version");
    assert_eq!(version.scalar_type, ScalarType::Number);
    assert_eq!(version.source, Some(ScalarSource::Inline("1.10".into())));
    assert_eq!(
        value(&root, "port").and_then(|n| n.source.clone()),
        Some(ScalarSource::Inline("0x1F".into()))
    );
}

#[test]
fn given_quoted_scalars_when_parsing_then_source_keeps_quotes() {
    let root = parse("'it''s': \"a\\tb\"\n");

    let (key, val) = root.entries().next().expect("entry");
    assert_eq!(key.value, "it's");
    assert_eq!(key.source, Some(ScalarSource::Inline("'it''s'".into())));
    assert_eq!(val.value, "a\tb");
    assert_eq!(val.source, Some(ScalarSource::Inline("\"a\\tb\"".into())));
}

#[test]
fn given_key_text_inside_multiline_scalar_when_parsing_then_comment_stays_with_real_key() {
    // Act
    let root = parse("a: \"x\n  b: y\"\nb: 1 # keep me\n");

    // Assert
    assert_eq!(value(&root, "a").map(|n| n.value.as_str()), Some("x b: y"));
    assert_eq!(value(&root, "b").map(|n| n.line_comment.as_str()), Some("# keep me"));
}

#[test]
fn given_comment_after_flow_continuation_when_parsing_then_attaches_to_last_item() {
    let root = parse("a: [1,\n  2] # tail\nb: 1\n");

    let items = &value(&root, "a").expect("a").children;
    assert_eq!(items[1].line_comment, "# tail");
}

#[test]
fn given_non_canonical_key_when_parsing_then_keeps_its_comment() {
    let root = parse("0x10: a # hex\nb: 1\n");

    let (key, val) = root.entries().next().expect("entry");
    assert_eq!(key.value, "0x10");
    assert_eq!(val.line_comment, "# hex");
}

#[test]
fn given_comment_inside_nested_block_when_parsing_then_follows_last_entry() {
    // Arrange
    let source = "\
a:
  b: 1
  # end of a
# before c
c: 2
# end
";

    // Act
    let root = parse(source);

    // Assert
    let inner = value(&root, "a").expect("a");
    let (b_key, _) = inner.entries().next().expect("b");
    assert_eq!(b_key.foot_comment, "# end of a");
    let (c_key, _) = root.entries().nth(1).expect("c");
    assert_eq!(c_key.head_comment, "# before c");
    assert_eq!(c_key.foot_comment, "# end");
}

#[rstest]
#[case::quoted_multiline("a: \"x\n  b: y\" # one\nb: 1 # two\n")]
#[case::flow_continuation("a: [1, # one\n  2] # two\n")]
#[case::block_scalar_header("run: | # one\n  echo # not a comment\n# two\nnext: 1\n")]
#[case::alias("base: &b {x: 1} # one\ncopy: *b # two\n")]
#[case::sequence_dash("- # one\n  a: 1\n- b # two\n")]
fn given_comments_anywhere_when_parsing_then_none_is_lost(#[case] source: &str) {
    let root = parse(source);

    assert_eq!(all_comments(&root), vec!["# one", "# two"]);
}

#[test]
fn given_collection_key_when_parsing_then_keeps_it_structured() {
    let root = parse("? [a, b]\n: 1\n");

    let (key, val) = root.entries().next().expect("entry");
    assert_eq!(key.kind, NodeKind::Sequence);
    assert_eq!(key.children.len(), 2);
    assert_eq!(val.value, "1");
}
