//! Export tests for the markdown dialect (ADF → text)

use crate::common::load_adf_fixture;
use adf_babel::adf::nodes::Node;
use adf_babel::diagnostics::DiagnosticCategory;
use adf_babel::format::Format;
use adf_babel::formats::markdown::MarkdownFormat;
use adf_babel::formats::plaintext::serialize_to_plaintext;
use adf_babel::{encode, encode_with_diagnostics};
use insta::assert_snapshot;
use serde_json::json;

fn node(value: serde_json::Value) -> Node {
    serde_json::from_value(value).expect("valid ADF node")
}

#[test]
fn test_strong_text_leaf() {
    let leaf = node(json!({"type": "text", "text": "hi", "marks": [{"type": "strong"}]}));
    assert_eq!(encode(&leaf), " **hi**");
}

#[test]
fn test_link_in_paragraph() {
    let paragraph = node(json!({
        "type": "paragraph",
        "content": [{
            "type": "text",
            "text": "x",
            "marks": [{"type": "link", "attrs": {"href": "http://e"}}]
        }]
    }));
    assert_eq!(encode(&paragraph), "[x](http://e)\n\n");
}

#[test]
fn test_marks_close_in_reverse_order() {
    let leaf = node(json!({
        "type": "text",
        "text": "t",
        "marks": [{"type": "strong"}, {"type": "em"}, {"type": "code"}]
    }));
    assert_eq!(encode(&leaf), " ** _`t`_**");
}

#[test]
fn test_kitchensink_export() {
    let doc = load_adf_fixture("kitchensink.json");
    let encoded = encode_with_diagnostics(&doc);

    assert_eq!(
        encoded.text,
        "# Release notes\n\
         Shipped **fast** and _safe_. See [docs](https://example.com/docs)\n\n\
         ---\n⚠️  Mind the gap\n\n---\n\
         \t* one\n\t\t* two\n\t* three\n\
         ```sh\nmake deploy\n```\n\
         **@ann** owns this 📍 https://example.com/ABC-1\n\n\
         cell\n\n"
    );

    // `rule` is a leaf; the table wrappers warn on open and close.
    let categories: Vec<_> = encoded.diagnostics.iter().map(|d| d.category).collect();
    assert_eq!(
        categories,
        vec![
            DiagnosticCategory::Inline,
            DiagnosticCategory::Node,
            DiagnosticCategory::Node,
            DiagnosticCategory::Node,
            DiagnosticCategory::Node,
            DiagnosticCategory::Node,
            DiagnosticCategory::Node,
        ]
    );
    assert_eq!(
        encoded.diagnostics[1].to_string(),
        "unsupported node type table"
    );
}

#[test]
fn test_format_trait_matches_facade() {
    let doc = load_adf_fixture("kitchensink.json");
    assert_eq!(MarkdownFormat.serialize(&doc).unwrap(), encode(&doc));
}

#[test]
fn test_kitchensink_plaintext() {
    let doc = load_adf_fixture("kitchensink.json");
    assert_snapshot!(serialize_to_plaintext(&doc), @r###"
Release notes
Shippedfast andsafe. See docs
Mind the gap
one
two
three
make deploy
@ann owns thishttps://example.com/ABC-1
cell
"###);
}

#[test]
fn test_paste_code_macro_extension() {
    let doc = node(json!({
        "type": "doc",
        "content": [{
            "type": "paragraph",
            "content": [{
                "type": "extension",
                "attrs": {
                    "extensionType": "com.atlassian.confluence.macro.core",
                    "extensionKey": "paste-code-macro",
                    "parameters": {
                        "language": "ruby",
                        "macroParams": {"__bodyContent": {"value": "puts 1"}}
                    }
                }
            }]
        }]
    }));
    assert_eq!(encode(&doc), "\n```ruby\nputs 1\n```\n\n\n\n");
}
