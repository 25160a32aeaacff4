//! Markdown parsing (text → ADF import)
//!
//! Converts the line-oriented dialect typed by users into an ADF tree.
//! Pipeline: text → classified lines → draft tree → ADF [`Node`]
//!
//! # Dialect
//!
//! ```text
//! Para 1
//! ℹ️ Description            <- panel, title rendered in bold
//! Foo
//! ✅ Acceptance Criteria
//! * hello.                  <- bullet, nesting in 2-space steps
//!   hello2                  <- continuation paragraph of the same item
//!   * bar1.
//! ```ruby                   <- fenced code block, optional language
//! puts 1
//! ```
//! ```
//!
//! # The Algorithm
//!
//! Every line is classified in priority order: fenced code body, fence
//! open, blank line, panel marker, bullet marker, plain text. The parser
//! never backtracks. It keeps the current insertion target, the open
//! panel, and a stack of `(list, level)` pairs for nested bullet lists.
//! Nodes are built in a small arena so that targets can be referred to by
//! id while the tree is still growing; the arena is assembled into a
//! [`Node`] tree at the end.
//!
//! Parsing is total: any line that matches nothing else becomes a paragraph.

use crate::adf::nodes::{Mark, Node, PanelType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Width of one bullet nesting level, in leading whitespace characters.
pub const INDENT_SPACES: usize = 2;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```(\S*)$").expect("fence regex is valid"));
static PANEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ℹ\x{FE0F}?|✅|🙌|⚠\x{FE0F}?|⛔)\s*(.*)$").expect("panel regex is valid")
});
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)\*\s*(.*)$").expect("bullet regex is valid"));

/// Parse dialect text into an ADF document. Never fails.
pub fn parse_from_markdown(source: &str) -> Node {
    let mut parser = DocumentParser::new();
    for line in source.split_inclusive('\n') {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Maps a panel lead glyph to its panel type.
fn panel_type_for_glyph(glyph: &str) -> PanelType {
    match glyph.trim_end_matches('\u{FE0F}') {
        "✅" | "🙌" => PanelType::Success,
        "⚠" => PanelType::Warning,
        "⛔" => PanelType::Error,
        _ => PanelType::Info,
    }
}

type NodeId = usize;

struct DraftNode {
    node: Node,
    children: Vec<NodeId>,
}

/// Arena holding the tree under construction.
struct DraftTree {
    nodes: Vec<DraftNode>,
}

impl DraftTree {
    fn new(root: Node) -> Self {
        DraftTree {
            nodes: vec![DraftNode {
                node: root,
                children: Vec::new(),
            }],
        }
    }

    fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(DraftNode {
            node,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn is_list_item(&self, id: NodeId) -> bool {
        self.nodes[id].node.node_type == "listItem"
    }

    fn assemble(&mut self, id: NodeId) -> Node {
        let children = std::mem::take(&mut self.nodes[id].children);
        let mut node = std::mem::replace(&mut self.nodes[id].node, Node::leaf(""));
        for child in children {
            let child = self.assemble(child);
            node.push(child);
        }
        node
    }
}

const ROOT: NodeId = 0;

/// An open bullet list and the nesting level it was opened at.
#[derive(Debug, Clone, Copy)]
struct BulletLevel {
    list: NodeId,
    level: usize,
}

#[derive(Debug, Default)]
struct CodeBlockState {
    body: String,
    language: Option<String>,
}

struct DocumentParser {
    tree: DraftTree,
    container: NodeId,
    panel: Option<NodeId>,
    bullets: Vec<BulletLevel>,
    code: Option<CodeBlockState>,
}

impl DocumentParser {
    fn new() -> Self {
        DocumentParser {
            tree: DraftTree::new(Node::doc(Vec::new())),
            container: ROOT,
            panel: None,
            bullets: Vec::new(),
            code: None,
        }
    }

    fn panel_or_root(&self) -> NodeId {
        self.panel.unwrap_or(ROOT)
    }

    fn feed_line(&mut self, raw: &str) {
        let stripped = raw.trim();

        if let Some(code) = self.code.as_mut() {
            if stripped == "```" {
                self.close_code_block();
            } else {
                code.body.push_str(raw);
            }
            return;
        }

        if let Some(caps) = FENCE_OPEN.captures(stripped) {
            let language = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|lang| !lang.is_empty())
                .map(str::to_string);
            self.code = Some(CodeBlockState {
                body: String::new(),
                language,
            });
            self.bullets.clear();
            self.container = self.panel_or_root();
            return;
        }

        let line = chomp(raw);
        if line.trim().is_empty() {
            self.container = self.panel_or_root();
            self.bullets.clear();
            return;
        }

        if let Some(caps) = PANEL.captures(line) {
            self.open_panel(&caps[1], &caps[2]);
        } else if let Some(caps) = BULLET.captures(line) {
            let level = caps[1].chars().count() / INDENT_SPACES;
            self.add_bullet(level, &caps[2]);
        } else {
            self.add_plain_line(line);
        }
    }

    fn close_code_block(&mut self) {
        if let Some(code) = self.code.take() {
            let body = chomp(&code.body).to_string();
            let target = self.panel_or_root();
            self.tree
                .append(target, Node::code_block(body, code.language));
        }
    }

    fn open_panel(&mut self, glyph: &str, title: &str) {
        let panel_type = panel_type_for_glyph(glyph);
        let title = Node::paragraph(Some(title.trim().to_string()), vec![Mark::strong()]);
        let panel = self.tree.append(ROOT, Node::panel(panel_type, vec![title]));
        tracing::debug!(panel_type = panel_type.tag(), "opened panel");
        self.panel = Some(panel);
        self.container = panel;
        self.bullets.clear();
    }

    fn add_bullet(&mut self, level: usize, content: &str) {
        while self.bullets.last().is_some_and(|top| top.level > level) {
            self.bullets.pop();
        }

        let needs_list = self.bullets.last().map_or(true, |top| top.level < level);
        if needs_list {
            let list = self
                .tree
                .append(self.container, Node::bullet_list(Vec::new()));
            self.bullets.push(BulletLevel { list, level });
        }

        let Some(top) = self.bullets.last() else {
            return;
        };
        let item = self.tree.append(
            top.list,
            Node::list_item(vec![Node::paragraph(
                Some(content.trim().to_string()),
                Vec::new(),
            )]),
        );
        self.container = item;
    }

    fn add_plain_line(&mut self, line: &str) {
        if self.tree.is_list_item(self.container) {
            if let Some(top) = self.bullets.last() {
                let item_indent = top.level * INDENT_SPACES;
                let continuation = " ".repeat(item_indent + INDENT_SPACES);
                let first_non_space = line.find(|c: char| c != ' ');
                if line.starts_with(&continuation) || first_non_space == Some(item_indent) {
                    self.tree.append(
                        self.container,
                        Node::paragraph(Some(line.trim().to_string()), Vec::new()),
                    );
                    return;
                }
            }
        }

        self.bullets.clear();
        let target = self.panel_or_root();
        self.tree.append(
            target,
            Node::paragraph(Some(line.trim().to_string()), Vec::new()),
        );
        self.container = target;
    }

    fn finish(mut self) -> Node {
        // An unterminated fence still keeps its body.
        self.close_code_block();
        self.tree.assemble(ROOT)
    }
}

/// Removes one trailing line terminator (`\n` or `\r\n`).
fn chomp(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}
