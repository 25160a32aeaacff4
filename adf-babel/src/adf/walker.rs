//! Depth-first traversal of an ADF tree.
//!
//! # The High-Level Concept
//!
//! The walker knows nothing about output formats. It visits the tree in
//! document order and reports what it sees to a [`Builder`], which owns all
//! accumulated state. Any renderer (markdown, plain text, tree outlines)
//! plugs in by implementing the five hooks.
//!
//! # The Algorithm
//!
//! For every node:
//!
//! 1. If the node is a container, call `open_node`
//! 2. Call `open_mark` for each mark, in listed order
//! 3. Recurse into the children (container) or call `inline` (leaf)
//! 4. Call `close_mark` for each mark, in reverse order
//! 5. If the node is a container, call `close_node`
//!
//! A node is a leaf iff its `content` key is absent. The type tag is never
//! consulted, so unknown node types are routed exactly like known ones.

use crate::adf::nodes::{Mark, Node};
use crate::error::FormatError;

/// Receives traversal events from [`translate`].
pub trait Builder {
    type Output;

    fn open_node(&mut self, node: &Node);
    fn close_node(&mut self, node: &Node);
    fn open_mark(&mut self, mark: &Mark);
    fn close_mark(&mut self, mark: &Mark);
    fn inline(&mut self, node: &Node);

    /// Consumes the builder once the traversal is complete.
    fn finish(self) -> Self::Output;
}

/// Walks `root` and returns the builder's result.
pub fn translate<B: Builder>(root: &Node, mut builder: B) -> B::Output {
    walk(root, &mut builder);
    builder.finish()
}

/// Parses ADF JSON text and walks the resulting tree.
pub fn translate_json<B: Builder>(source: &str, builder: B) -> Result<B::Output, FormatError> {
    let root: Node = serde_json::from_str(source)
        .map_err(|e| FormatError::ParseError(format!("Invalid ADF JSON: {e}")))?;
    Ok(translate(&root, builder))
}

fn walk<B: Builder>(node: &Node, builder: &mut B) {
    match &node.content {
        Some(children) => {
            builder.open_node(node);
            for mark in &node.marks {
                builder.open_mark(mark);
            }
            for child in children {
                walk(child, builder);
            }
            for mark in node.marks.iter().rev() {
                builder.close_mark(mark);
            }
            builder.close_node(node);
        }
        None => {
            for mark in &node.marks {
                builder.open_mark(mark);
            }
            builder.inline(node);
            for mark in node.marks.iter().rev() {
                builder.close_mark(mark);
            }
        }
    }
}
