//! Encode → decode smoke tests
//!
//! The dialect is lossy, so these only check the structure that survives:
//! panel kind, bullet nesting depth and code language.

use crate::common::{find_all, list_depth};
use adf_babel::adf::nodes::{Node, PanelType};
use adf_babel::{decode, encode};

fn sample_tree() -> Node {
    let nested = Node::bullet_list(vec![Node::list_item(vec![Node::paragraph(
        Some("inner".to_string()),
        vec![],
    )])]);
    let list = Node::bullet_list(vec![
        Node::list_item(vec![
            Node::paragraph(Some("outer".to_string()), vec![]),
            nested,
        ]),
        Node::list_item(vec![Node::paragraph(Some("second".to_string()), vec![])]),
    ]);
    Node::doc(vec![
        Node::panel(
            PanelType::Info,
            vec![Node::paragraph(Some("Heads up".to_string()), vec![])],
        ),
        list,
        Node::code_block("fn main() {}".to_string(), Some("rust".to_string())),
    ])
}

#[test]
fn test_round_trip_keeps_structure() {
    let original = sample_tree();
    let text = encode(&original);
    let decoded = decode(&text);

    let panels = find_all(&decoded, "panel");
    assert_eq!(panels.len(), 1);
    assert_eq!(panels[0].panel_type(), Some(PanelType::Info));

    assert_eq!(list_depth(&decoded), list_depth(&original));

    let code = find_all(&decoded, "codeBlock");
    assert_eq!(code.len(), 1);
    assert_eq!(code[0].attr_str("language"), Some("rust"));
}

#[test]
fn test_every_panel_kind_round_trips() {
    for kind in [
        PanelType::Info,
        PanelType::Warning,
        PanelType::Success,
        PanelType::Error,
    ] {
        let doc = Node::doc(vec![Node::panel(
            kind,
            vec![Node::paragraph(Some("Title".to_string()), vec![])],
        )]);
        let decoded = decode(&encode(&doc));
        let panels = find_all(&decoded, "panel");
        assert_eq!(panels.len(), 1, "panel {kind:?} was not recognised");
        assert_eq!(panels[0].panel_type(), Some(kind));
    }
}
