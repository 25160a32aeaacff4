//! Import tests for the markdown dialect (text → ADF)
//!
//! These tests check the structure of the decoded tree rather than its JSON,
//! except where the exact wire shape matters.

use crate::common::{find_all, first_text, list_depth, read_fixture};
use adf_babel::adf::nodes::{Node, PanelType};
use adf_babel::decode;
use adf_babel::formats::treeviz::to_treeviz_str;
use insta::assert_snapshot;
use serde_json::json;

fn texts(node: &Node) -> Vec<&str> {
    find_all(node, "text")
        .into_iter()
        .filter_map(|leaf| leaf.text.as_deref())
        .collect()
}

#[test]
fn test_nested_bullets_then_sibling() {
    let doc = decode("* a\n  * b\n* c");

    let lists = doc.children();
    assert_eq!(lists.len(), 1);
    let items = lists[0].children();
    assert_eq!(items.len(), 2);

    let first = items[0].children();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].node_type, "paragraph");
    assert_eq!(first_text(&first[0]), Some("a"));
    assert_eq!(first[1].node_type, "bulletList");
    assert_eq!(first[1].children().len(), 1);
    assert_eq!(first_text(&first[1]), Some("b"));

    let second = items[1].children();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].node_type, "paragraph");
    assert_eq!(first_text(&second[0]), Some("c"));
}

#[test]
fn test_info_panel_with_body() {
    let doc = decode("ℹ️ Title\nBody");
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "doc",
            "version": 1,
            "content": [{
                "type": "panel",
                "attrs": {"panelType": "info"},
                "content": [
                    {"type": "paragraph", "content": [
                        {"type": "text", "text": "Title", "marks": [{"type": "strong"}]}
                    ]},
                    {"type": "paragraph", "content": [{"type": "text", "text": "Body"}]}
                ]
            }]
        })
    );
}

#[test]
fn test_blank_and_empty_input() {
    assert!(decode("").children().is_empty());
    assert!(decode("   \n\t\n\n").children().is_empty());
}

#[test]
fn test_crlf_input() {
    let doc = decode("* a\r\n  * b\r\n");
    assert_eq!(list_depth(&doc), 2);
    assert_eq!(texts(&doc), vec!["a", "b"]);
}

#[test]
fn test_new_ticket_fixture() {
    let doc = decode(&read_fixture("new-ticket.txt"));

    let panels = find_all(&doc, "panel");
    let kinds: Vec<_> = panels.iter().filter_map(|p| p.panel_type()).collect();
    assert_eq!(
        kinds,
        vec![PanelType::Info, PanelType::Success, PanelType::Warning]
    );

    let code = find_all(&doc, "codeBlock");
    assert_eq!(code.len(), 1);
    assert_eq!(code[0].attr_str("language"), Some("sh"));
    assert_eq!(
        first_text(code[0]),
        Some("curl -i https://staging.example.com/login")
    );
}

#[test]
fn test_new_ticket_outline() {
    let doc = decode(&read_fixture("new-ticket.txt"));
    assert_snapshot!(to_treeviz_str(&doc), @r###"
⧉ doc
  ¶ paragraph
    ◦ "Users cannot log in after the …"
  ▣ panel (info)
    ¶ paragraph
      ◦ "Description" [strong]
    ¶ paragraph
      ◦ "The session cookie is dropped …"
    ☰ bulletList
      • listItem
        ¶ paragraph
          ◦ "seen on staging"
        ¶ paragraph
          ◦ "reproduced twice"
        ☰ bulletList
          • listItem
            ¶ paragraph
              ◦ "chrome only"
      • listItem
        ¶ paragraph
          ◦ "not on prod"
  ▣ panel (success)
    ¶ paragraph
      ◦ "Acceptance Criteria" [strong]
    ☰ bulletList
      • listItem
        ¶ paragraph
          ◦ "login works on staging"
    𝒱 codeBlock (sh)
      ◦ "curl -i https://staging.exampl…"
  ▣ panel (warning)
    ¶ paragraph
      ◦ "Rollout" [strong]
    ¶ paragraph
      ◦ "Needs a feature flag."
"###);
}

#[test]
fn test_code_fence_keeps_dialect_markers_verbatim() {
    let doc = decode("```\n* not a bullet\nℹ️ not a panel\n\n```");
    let code = find_all(&doc, "codeBlock");
    assert_eq!(code.len(), 1);
    assert!(code[0].attrs.is_none());
    assert_eq!(
        first_text(code[0]),
        Some("* not a bullet\nℹ️ not a panel\n")
    );
    assert!(find_all(&doc, "panel").is_empty());
}
