//! Markdown serialization (ADF → text export)
//!
//! Converts ADF trees to the markdown-like dialect shown to users.
//! Pipeline: ADF tree → walker events → [`MarkdownBuilder`] → string
//!
//! The builder emits formatting around child traversal rather than inside
//! it, so container markers, list indentation and panel icons are all plain
//! string pushes driven by the walker hooks. List nesting is tracked as a
//! stack of list kinds; panel icons are queued in `pending_prefix` and land
//! in front of the next text leaf.

use crate::adf::nodes::{Mark, MarkKind, Node, NodeKind, PanelType};
use crate::adf::walker::{translate, Builder};
use crate::diagnostics::{Diagnostic, DiagnosticCategory, Diagnostics};

const CODE_MACRO_EXTENSION_TYPE: &str = "com.atlassian.confluence.macro.core";
const CODE_MACRO_EXTENSION_KEY: &str = "paste-code-macro";

/// Rendered text plus the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Serialize an ADF tree to the markdown dialect
pub fn serialize_to_markdown(doc: &Node) -> String {
    encode_markdown(doc).text
}

/// Serialize an ADF tree, keeping the diagnostics
pub fn encode_markdown(doc: &Node) -> Encoded {
    translate(doc, MarkdownBuilder::new())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

/// Stateful accumulator implementing the walker hooks for the markdown dialect.
#[derive(Debug, Default)]
pub struct MarkdownBuilder {
    output: String,
    lists: Vec<ListKind>,
    pending_prefix: Option<String>,
    diagnostics: Diagnostics,
}

impl MarkdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text accumulated so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn push_str(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Queues `prefix` in front of the next text leaf. Queued prefixes accumulate.
    pub fn queue_prefix(&mut self, prefix: &str) {
        self.pending_prefix
            .get_or_insert_with(String::new)
            .push_str(prefix);
    }

    fn flush_prefix(&mut self) {
        if let Some(prefix) = self.pending_prefix.take() {
            self.output.push_str(&prefix);
        }
    }

    fn inline_extension(&mut self, node: &Node) {
        let extension_type = node.attr_str("extensionType").unwrap_or_default();
        let extension_key = node.attr_str("extensionKey").unwrap_or_default();

        if extension_type != CODE_MACRO_EXTENSION_TYPE || extension_key != CODE_MACRO_EXTENSION_KEY
        {
            self.diagnostics.warn_unsupported(
                DiagnosticCategory::InlineExtension,
                format!("{extension_type}/{extension_key}"),
            );
            return;
        }

        let body = node
            .attr_path(&["parameters", "macroParams", "__bodyContent", "value"])
            .and_then(|v| v.as_str());
        let Some(body) = body else {
            self.diagnostics.warn_unsupported(
                DiagnosticCategory::InlineExtension,
                "paste-code-macro without _bodyContent.value",
            );
            return;
        };
        let language = node
            .attr_path(&["parameters", "language"])
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        self.output.push_str("\n```");
        self.output.push_str(language);
        self.output.push('\n');
        self.output.push_str(body);
        self.output.push_str("\n```\n\n");
    }
}

fn panel_icon(panel_type: PanelType) -> &'static str {
    match panel_type {
        PanelType::Info => "ℹ️  ",
        PanelType::Warning => "⚠️  ",
        PanelType::Success => "🙌 ",
        PanelType::Error => "⛔ ",
    }
}

impl Builder for MarkdownBuilder {
    type Output = Encoded;

    fn open_node(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Heading => self.push_str("# "),
            NodeKind::CodeBlock => {
                self.push_str("```");
                if let Some(language) = node.attr_str("language") {
                    self.push_str(language);
                }
                self.push_str("\n");
            }
            NodeKind::Blockquote => self.push_str("> "),
            NodeKind::BulletList => self.lists.push(ListKind::Bullet),
            NodeKind::OrderedList => self.lists.push(ListKind::Ordered),
            NodeKind::ListItem => {
                self.output.push_str(&"\t".repeat(self.lists.len()));
                let marker = match self.lists.last() {
                    Some(ListKind::Ordered) => "1. ",
                    _ => "* ",
                };
                self.push_str(marker);
            }
            NodeKind::Panel => {
                self.push_str("---\n");
                if let Some(panel_type) = node.panel_type() {
                    self.queue_prefix(panel_icon(panel_type));
                }
            }
            NodeKind::Doc | NodeKind::Paragraph => {}
            _ => self
                .diagnostics
                .warn_unsupported(DiagnosticCategory::Node, &node.node_type),
        }
    }

    fn close_node(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Heading | NodeKind::Blockquote => self.push_str("\n"),
            NodeKind::CodeBlock => self.push_str("\n```\n"),
            NodeKind::BulletList | NodeKind::OrderedList => {
                self.lists.pop();
            }
            NodeKind::Panel => self.push_str("---\n"),
            NodeKind::Paragraph => {
                let end = if self.lists.is_empty() { "\n\n" } else { "\n" };
                self.push_str(end);
            }
            NodeKind::Doc | NodeKind::ListItem => {}
            _ => self
                .diagnostics
                .warn_unsupported(DiagnosticCategory::Node, &node.node_type),
        }
    }

    fn open_mark(&mut self, mark: &Mark) {
        match mark.kind() {
            MarkKind::Link => self.push_str("["),
            MarkKind::Em | MarkKind::Underline => self.push_str(" _"),
            MarkKind::Strong => self.push_str(" **"),
            MarkKind::Strike => self.push_str(" ~~"),
            MarkKind::Code => self.push_str("`"),
            MarkKind::Other(tag) => self
                .diagnostics
                .warn_unsupported(DiagnosticCategory::Mark, tag),
        }
    }

    fn close_mark(&mut self, mark: &Mark) {
        match mark.kind() {
            MarkKind::Link => {
                let href = mark.attr_str("href").unwrap_or_default();
                self.output.push_str(&format!("]({href})"));
            }
            MarkKind::Em | MarkKind::Underline => self.push_str("_"),
            MarkKind::Strong => self.push_str("**"),
            MarkKind::Strike => self.push_str("~~"),
            MarkKind::Code => self.push_str("`"),
            MarkKind::Other(tag) => self
                .diagnostics
                .warn_unsupported(DiagnosticCategory::Mark, tag),
        }
    }

    fn inline(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::Extension => self.inline_extension(node),
            NodeKind::Emoji => {
                if let Some(text) = node.text.as_deref().or_else(|| node.attr_str("text")) {
                    self.output.push_str(text);
                }
            }
            NodeKind::Text => {
                self.flush_prefix();
                if let Some(text) = &node.text {
                    self.output.push_str(text);
                }
            }
            NodeKind::HardBreak => self.push_str("\n\n"),
            NodeKind::InlineCard => {
                self.push_str(" 📍 ");
                if let Some(url) = node.attr_str("url") {
                    self.output.push_str(url);
                }
            }
            NodeKind::Mention => {
                self.push_str("**");
                if let Some(text) = node.attr_str("text") {
                    self.output.push_str(text);
                }
                self.push_str("**");
            }
            _ => self
                .diagnostics
                .warn_unsupported(DiagnosticCategory::Inline, &node.node_type),
        }
    }

    fn finish(self) -> Encoded {
        Encoded {
            text: self.output,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}
