//! Plain text export
//!
//! Drops every piece of formatting and keeps only the words: marks emit
//! nothing, block nodes end their line, mentions and inline cards render as
//! their text and URL. Unknown containers are walked through silently so
//! their text still shows up.

use crate::adf::nodes::{Mark, Node, NodeKind};
use crate::adf::walker::{translate, Builder};
use crate::error::FormatError;
use crate::format::Format;

pub fn serialize_to_plaintext(doc: &Node) -> String {
    translate(doc, PlaintextBuilder::default())
}

#[derive(Debug, Default)]
pub struct PlaintextBuilder {
    output: String,
}

impl PlaintextBuilder {
    fn end_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
    }
}

impl Builder for PlaintextBuilder {
    type Output = String;

    fn open_node(&mut self, node: &Node) {
        if matches!(node.kind(), NodeKind::ListItem | NodeKind::CodeBlock) {
            self.end_line();
        }
    }

    fn close_node(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Paragraph | NodeKind::Heading | NodeKind::CodeBlock => self.end_line(),
            _ => {}
        }
    }

    fn open_mark(&mut self, _mark: &Mark) {}

    fn close_mark(&mut self, _mark: &Mark) {}

    fn inline(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::HardBreak => self.output.push('\n'),
            NodeKind::Mention => {
                if let Some(text) = node.attr_str("text") {
                    self.output.push_str(text);
                }
            }
            NodeKind::InlineCard => {
                if let Some(url) = node.attr_str("url") {
                    self.output.push_str(url);
                }
            }
            NodeKind::Emoji => {
                if let Some(text) = node.text.as_deref().or_else(|| node.attr_str("text")) {
                    self.output.push_str(text);
                }
            }
            _ => {
                if let Some(text) = &node.text {
                    self.output.push_str(text);
                }
            }
        }
    }

    fn finish(self) -> String {
        self.output
    }
}

/// Format implementation for plain text export
pub struct PlaintextFormat;

impl Format for PlaintextFormat {
    fn name(&self) -> &str {
        "plaintext"
    }

    fn description(&self) -> &str {
        "Unformatted text content of an ADF document"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(serialize_to_plaintext(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strips_formatting() {
        let doc: Node = serde_json::from_value(json!({
            "type": "doc",
            "content": [
                {"type": "heading", "content": [{"type": "text", "text": "Title"}]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Hello "},
                    {"type": "text", "text": "world", "marks": [{"type": "strong"}]},
                    {"type": "hardBreak"},
                    {"type": "mention", "attrs": {"text": "@ann"}}
                ]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "one"}]}
                    ]},
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
                    ]}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(serialize_to_plaintext(&doc), "Title\nHello world\n@ann\none\ntwo\n");
    }

    #[test]
    fn test_unknown_containers_pass_text_through() {
        let doc: Node = serde_json::from_value(json!({
            "type": "doc",
            "content": [{"type": "table", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "cell"}]}
            ]}]
        }))
        .unwrap();
        assert_eq!(serialize_to_plaintext(&doc), "cell\n");
    }
}
