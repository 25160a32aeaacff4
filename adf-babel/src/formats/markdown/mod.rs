//! Markdown format implementation
//!
//! This module implements bidirectional conversion between ADF and the
//! markdown-like dialect used to show and write tickets.
//!
//! # Element Mapping Table
//!
//! | ADF node / mark   | Export                          | Import                                |
//! |-------------------|---------------------------------|---------------------------------------|
//! | paragraph         | text + blank line (`\n` in lists)| any unmatched line                   |
//! | heading           | `# ` + text                     | not parsed (becomes a paragraph)      |
//! | panel             | `---` rules, icon before title  | `ℹ️`/`✅`/`🙌`/`⚠️`/`⛔` + title        |
//! | bulletList        | `\t`×depth + `* `               | `*` with 2-space nesting              |
//! | orderedList       | `\t`×depth + `1. `              | not parsed                            |
//! | codeBlock         | fenced, language after fence    | fenced, language after fence          |
//! | blockquote        | `> `                            | not parsed                            |
//! | strong / em       | ` **x**` / ` _x_`               | panel titles only (strong)            |
//! | strike / code     | ` ~~x~~` / `` `x` ``            | not parsed                            |
//! | link              | `[x](href)`                     | not parsed                            |
//! | mention           | `**name**`                      | not parsed                            |
//! | inlineCard        | ` 📍 url`                       | not parsed                            |
//! | paste-code-macro  | fenced block                    | -                                     |
//!
//! # Lossy Conversions
//!
//! The dialect is not a round-trip format. The importer understands the
//! constructs a person types when creating a ticket (paragraphs, panels,
//! bullets, code) while the exporter covers what the tracker sends back.
//! Unsupported nodes and marks are reported as diagnostics and skipped.

pub mod parser;
pub mod serializer;

use crate::adf::nodes::Node;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for the markdown dialect
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown-like text dialect with panels, bullets and code fences"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        Ok(parser::parse_from_markdown(source))
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
