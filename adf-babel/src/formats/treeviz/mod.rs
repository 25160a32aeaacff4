//! Treeviz formatter for ADF trees
//!
//! Treeviz is an outline of the document tree, mostly useful to check what
//! the text decoder built from a piece of input. It encodes nesting as
//! indentation, with 2 white spaces per level.
//!
//! So the format is :
//! <indentation>(per level) <icon><space><label>
//!
//! Example:
//!
//! ⧉ doc
//!   ▣ panel (info)
//!     ¶ paragraph
//!       ◦ "Title" [strong]
//!     ☰ bulletList
//!       • listItem
//!         ¶ paragraph
//!           ◦ "a"
//!
//! Text labels are truncated to 30 characters unless the `full` parameter is
//! set to `true`.

use super::icons::get_icon;
use crate::adf::nodes::{Mark, Node};
use crate::adf::walker::{translate, Builder};
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use std::collections::HashMap;

const MAX_LABEL_CHARS: usize = 30;

/// Walker builder emitting one outline line per node.
#[derive(Debug, Default)]
pub struct TreevizBuilder {
    output: String,
    depth: usize,
    truncate: bool,
}

impl TreevizBuilder {
    pub fn new(truncate: bool) -> Self {
        TreevizBuilder {
            truncate,
            ..Self::default()
        }
    }

    fn line(&mut self, node_type: &str, label: &str) {
        self.output.push_str(&"  ".repeat(self.depth));
        self.output.push_str(get_icon(node_type));
        self.output.push(' ');
        self.output.push_str(label);
        self.output.push('\n');
    }

    fn text_label(&self, text: &str) -> String {
        let single_line = text.replace('\n', "↵");
        if self.truncate && single_line.chars().count() > MAX_LABEL_CHARS {
            let cut: String = single_line.chars().take(MAX_LABEL_CHARS).collect();
            format!("\"{cut}…\"")
        } else {
            format!("\"{single_line}\"")
        }
    }
}

fn container_label(node: &Node) -> String {
    let detail = node
        .attr_str("panelType")
        .or_else(|| node.attr_str("language"));
    match detail {
        Some(detail) => format!("{} ({detail})", node.node_type),
        None => node.node_type.clone(),
    }
}

fn marks_suffix(marks: &[Mark]) -> String {
    if marks.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = marks.iter().map(|m| m.mark_type.as_str()).collect();
    format!(" [{}]", names.join(", "))
}

impl Builder for TreevizBuilder {
    type Output = String;

    fn open_node(&mut self, node: &Node) {
        let label = container_label(node) + &marks_suffix(&node.marks);
        self.line(&node.node_type, &label);
        self.depth += 1;
    }

    fn close_node(&mut self, _node: &Node) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn open_mark(&mut self, _mark: &Mark) {}

    fn close_mark(&mut self, _mark: &Mark) {}

    fn inline(&mut self, node: &Node) {
        let mut label = match &node.text {
            Some(text) => self.text_label(text),
            None => node.node_type.clone(),
        };
        label.push_str(&marks_suffix(&node.marks));
        self.line(&node.node_type, &label);
    }

    fn finish(self) -> String {
        self.output
    }
}

pub fn to_treeviz_str(doc: &Node) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"full"`: When set to `"true"`, text labels are not truncated.
pub fn to_treeviz_str_with_params(doc: &Node, params: &HashMap<String, String>) -> String {
    let full = params
        .get("full")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);
    translate(doc, TreevizBuilder::new(!full))
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Indented outline of the ADF tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(to_treeviz_str_with_params(
            doc, options,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parser::parse_from_markdown;

    #[test]
    fn test_outline_of_decoded_panel() {
        let doc = parse_from_markdown("ℹ️ Title\n* a\n  * b");
        let expected = "\
⧉ doc
  ▣ panel (info)
    ¶ paragraph
      ◦ \"Title\" [strong]
    ☰ bulletList
      • listItem
        ¶ paragraph
          ◦ \"a\"
        ☰ bulletList
          • listItem
            ¶ paragraph
              ◦ \"b\"
";
        assert_eq!(to_treeviz_str(&doc), expected);
    }

    #[test]
    fn test_long_text_is_truncated_unless_full() {
        let doc = parse_from_markdown("abcdefghijklmnopqrstuvwxyz0123456789");
        assert!(to_treeviz_str(&doc).contains("\"abcdefghijklmnopqrstuvwxyz0123…\""));

        let mut params = HashMap::new();
        params.insert("full".to_string(), "true".to_string());
        assert!(to_treeviz_str_with_params(&doc, &params)
            .contains("\"abcdefghijklmnopqrstuvwxyz0123456789\""));
    }

    #[test]
    fn test_code_block_shows_language() {
        let doc = parse_from_markdown("```rust\nfn main() {}\n```");
        assert!(to_treeviz_str(&doc).contains("𝒱 codeBlock (rust)\n"));
    }
}
