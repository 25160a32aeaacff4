//! Core data structures for ADF documents.
//!
//! The node and mark vocabularies are open: the tracker adds new types over
//! time, so the `type` tag is kept as a string and [`NodeKind`] / [`MarkKind`]
//! provide a typed view with an `Other` fallback.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open attribute mapping carried by nodes and marks.
pub type Attrs = Map<String, Value>;

/// A single element of an ADF tree.
///
/// Whether a node is a container is decided by the presence of `content`,
/// never by its type: `Some(vec![])` is an (empty) container, `None` a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// An inline decoration applied to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

/// Typed view over [`Node::node_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Doc,
    Heading,
    Paragraph,
    CodeBlock,
    Blockquote,
    Panel,
    BulletList,
    OrderedList,
    ListItem,
    Text,
    Emoji,
    HardBreak,
    InlineCard,
    Mention,
    Extension,
    Other(String),
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "doc" => NodeKind::Doc,
            "heading" => NodeKind::Heading,
            "paragraph" => NodeKind::Paragraph,
            "codeBlock" => NodeKind::CodeBlock,
            "blockquote" => NodeKind::Blockquote,
            "panel" => NodeKind::Panel,
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList,
            "listItem" => NodeKind::ListItem,
            "text" => NodeKind::Text,
            "emoji" => NodeKind::Emoji,
            "hardBreak" => NodeKind::HardBreak,
            "inlineCard" => NodeKind::InlineCard,
            "mention" => NodeKind::Mention,
            "extension" => NodeKind::Extension,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Doc => "doc",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::CodeBlock => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Panel => "panel",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Text => "text",
            NodeKind::Emoji => "emoji",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::InlineCard => "inlineCard",
            NodeKind::Mention => "mention",
            NodeKind::Extension => "extension",
            NodeKind::Other(tag) => tag,
        }
    }
}

/// Typed view over [`Mark::mark_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkKind {
    Em,
    Strong,
    Strike,
    Code,
    Underline,
    Link,
    Other(String),
}

impl MarkKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "em" => MarkKind::Em,
            "strong" => MarkKind::Strong,
            "strike" => MarkKind::Strike,
            "code" => MarkKind::Code,
            "underline" => MarkKind::Underline,
            "link" => MarkKind::Link,
            other => MarkKind::Other(other.to_string()),
        }
    }
}

/// Callout flavour of a `panel` node (`attrs.panelType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelType {
    Info,
    Warning,
    Success,
    Error,
}

impl PanelType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "info" => Some(PanelType::Info),
            "warning" => Some(PanelType::Warning),
            "success" => Some(PanelType::Success),
            "error" => Some(PanelType::Error),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            PanelType::Info => "info",
            PanelType::Warning => "warning",
            PanelType::Success => "success",
            PanelType::Error => "error",
        }
    }
}

impl Node {
    /// Creates a leaf node of the given type.
    pub fn leaf(node_type: impl Into<String>) -> Self {
        Node {
            node_type: node_type.into(),
            version: None,
            attrs: None,
            content: None,
            marks: Vec::new(),
            text: None,
        }
    }

    /// Creates a container node holding `children`.
    pub fn container(node_type: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            content: Some(children),
            ..Node::leaf(node_type)
        }
    }

    /// The document root, as produced by the text decoder.
    pub fn doc(children: Vec<Node>) -> Self {
        Node {
            version: Some(1),
            ..Node::container("doc", children)
        }
    }

    /// A text leaf. `None` keeps the `text` key absent on serialization.
    pub fn text(text: Option<String>) -> Self {
        Node {
            text,
            ..Node::leaf("text")
        }
    }

    /// A paragraph wrapping a single text leaf.
    pub fn paragraph(text: Option<String>, marks: Vec<Mark>) -> Self {
        let mut leaf = Node::text(text);
        leaf.marks = marks;
        Node::container("paragraph", vec![leaf])
    }

    pub fn panel(panel_type: PanelType, children: Vec<Node>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("panelType".into(), Value::from(panel_type.tag()));
        Node {
            attrs: Some(attrs),
            ..Node::container("panel", children)
        }
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Node::container("bulletList", items)
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Node::container("listItem", children)
    }

    /// A code block; `attrs` is only set when a language is known.
    pub fn code_block(body: String, language: Option<String>) -> Self {
        let attrs = language.map(|lang| {
            let mut attrs = Attrs::new();
            attrs.insert("language".into(), Value::from(lang));
            attrs
        });
        Node {
            attrs,
            ..Node::container("codeBlock", vec![Node::text(Some(body))])
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.node_type)
    }

    /// True when the node is a leaf, i.e. it has no `content` key at all.
    pub fn is_inline(&self) -> bool {
        self.content.is_none()
    }

    pub fn children(&self) -> &[Node] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Appends a child, turning a leaf into a container if needed.
    pub fn push(&mut self, child: Node) {
        self.content.get_or_insert_with(Vec::new).push(child);
    }

    /// Looks up a top-level string attribute.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(key)?.as_str()
    }

    /// Follows a path of object keys through nested attributes.
    pub fn attr_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut value = self.attrs.as_ref()?.get(*first)?;
        for key in rest {
            value = value.get(key)?;
        }
        Some(value)
    }

    pub fn panel_type(&self) -> Option<PanelType> {
        self.attr_str("panelType").and_then(PanelType::from_tag)
    }
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Mark {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }

    pub fn strong() -> Self {
        Mark::new("strong")
    }

    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("href".into(), Value::from(href.into()));
        Mark {
            attrs: Some(attrs),
            ..Mark::new("link")
        }
    }

    pub fn kind(&self) -> MarkKind {
        MarkKind::from_tag(&self.mark_type)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.as_ref()?.get(key)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_presence_decides_leaf() {
        let leaf: Node = serde_json::from_value(json!({"type": "paragraph"})).unwrap();
        let empty: Node = serde_json::from_value(json!({"type": "text", "content": []})).unwrap();

        assert!(leaf.is_inline());
        assert!(!empty.is_inline());
        assert!(empty.children().is_empty());
    }

    #[test]
    fn test_absent_keys_are_not_serialized() {
        let para = Node::paragraph(None, vec![]);
        assert_eq!(
            serde_json::to_value(&para).unwrap(),
            json!({"type": "paragraph", "content": [{"type": "text"}]})
        );
    }

    #[test]
    fn test_doc_carries_version() {
        assert_eq!(
            serde_json::to_value(Node::doc(vec![])).unwrap(),
            json!({"type": "doc", "version": 1, "content": []})
        );
    }

    #[test]
    fn test_code_block_without_language_has_no_attrs() {
        let block = Node::code_block("puts 'hello'".into(), None);
        assert!(block.attrs.is_none());

        let block = Node::code_block("puts 'hello'".into(), Some("ruby".into()));
        assert_eq!(block.attr_str("language"), Some("ruby"));
    }

    #[test]
    fn test_attr_path_walks_nested_objects() {
        let node: Node = serde_json::from_value(json!({
            "type": "extension",
            "attrs": {"parameters": {"macroParams": {"__bodyContent": {"value": "x"}}}}
        }))
        .unwrap();

        let value = node.attr_path(&["parameters", "macroParams", "__bodyContent", "value"]);
        assert_eq!(value.and_then(Value::as_str), Some("x"));
        assert!(node.attr_path(&["parameters", "language"]).is_none());
    }

    #[test]
    fn test_unknown_tags_round_trip_through_kind() {
        assert_eq!(NodeKind::from_tag("mediaGroup").tag(), "mediaGroup");
        assert_eq!(MarkKind::from_tag("textColor"), MarkKind::Other("textColor".into()));
        assert_eq!(PanelType::from_tag("note"), None);
    }
}
