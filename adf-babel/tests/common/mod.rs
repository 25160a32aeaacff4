//! Shared helpers for the integration tests.

use adf_babel::adf::nodes::Node;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

pub fn load_adf_fixture(name: &str) -> Node {
    serde_json::from_str(&read_fixture(name))
        .unwrap_or_else(|e| panic!("Fixture {name} is not ADF: {e}"))
}

/// Every node of the given type, in document order.
pub fn find_all<'a>(node: &'a Node, node_type: &str) -> Vec<&'a Node> {
    let mut found = Vec::new();
    collect(node, node_type, &mut found);
    found
}

fn collect<'a>(node: &'a Node, node_type: &str, found: &mut Vec<&'a Node>) {
    if node.node_type == node_type {
        found.push(node);
    }
    for child in node.children() {
        collect(child, node_type, found);
    }
}

/// Deepest chain of nested bullet lists below `node`.
pub fn list_depth(node: &Node) -> usize {
    let below = node.children().iter().map(list_depth).max().unwrap_or(0);
    if node.node_type == "bulletList" {
        below + 1
    } else {
        below
    }
}

/// Text of the first text leaf under `node`.
pub fn first_text(node: &Node) -> Option<&str> {
    find_all(node, "text")
        .into_iter()
        .find_map(|leaf| leaf.text.as_deref())
}
