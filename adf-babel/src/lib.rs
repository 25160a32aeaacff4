//! Bidirectional transcoding between ADF trees and a markdown-like text dialect
//!
//!     ADF (Atlassian Document Format) is the JSON tree the issue tracker uses for rich text
//!     (descriptions, comments). This crate renders such trees as readable text and turns typed
//!     text back into ADF so it can be posted.
//!
//!     This is a pure lib, that is, it powers the adf-cli but is shell agnostic: no code here
//!     reads env vars, files or stdin, or prints anything. Warnings go through `tracing`.
//!
//!     The file structure :
//!     .
//!     ├── adf
//!     │   ├── nodes.rs            # Node / Mark model, serde mapping
//!     │   └── walker.rs           # Depth first traversal driving a Builder
//!     ├── diagnostics.rs          # Unsupported construct reports
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # parser.rs (text → ADF), serializer.rs (ADF → text)
//!     │   ├── json                # ADF wire format
//!     │   ├── plaintext
//!     │   └── treeviz
//!     ├── ticket.rs               # Issue report
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     Encoding is a walk: the walker visits every node depth first and calls the builder hooks
//!     (open/close node, open/close mark, inline leaf). Builders keep whatever state they need
//!     (list nesting, the queued panel icon) and never look at the tree themselves. Any node
//!     without `content` is a leaf, whatever its type, so unknown node types still walk.
//!
//!     Decoding is line oriented: each line is classified (code fence, panel header, bullet,
//!     blank, plain) and appended to the current container. Bullet nesting is tracked with a
//!     stack of (list, indent level) pairs. See ./formats/markdown/parser.rs.
//!
//!     Neither direction fails on unfamiliar input. The encoder reports unsupported node, mark
//!     and inline types as diagnostics and keeps going; the decoder treats anything it does not
//!     recognise as paragraph text.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait, see ./format.rs. The
//!     registry knows markdown (both ways), adf-json (both ways), plaintext and treeviz (export).

pub mod adf;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod ticket;

pub use adf::nodes::{Mark, Node};
pub use diagnostics::{Diagnostic, DiagnosticCategory, Diagnostics};
pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use formats::markdown::serializer::Encoded;
pub use registry::FormatRegistry;
pub use ticket::{render_tickets, TicketOptions};

/// Renders an ADF tree as dialect text.
///
/// Unsupported constructs are skipped and logged as warnings; use
/// [`encode_with_diagnostics`] to inspect them.
pub fn encode(doc: &Node) -> String {
    formats::markdown::serializer::serialize_to_markdown(doc)
}

/// Renders an ADF tree as dialect text, returning the diagnostics alongside.
pub fn encode_with_diagnostics(doc: &Node) -> Encoded {
    formats::markdown::serializer::encode_markdown(doc)
}

/// Builds an ADF document from dialect text. Never fails.
pub fn decode(text: &str) -> Node {
    formats::markdown::parser::parse_from_markdown(text)
}

/// Parses ADF JSON and renders it as dialect text.
pub fn render_json(source: &str) -> Result<String, FormatError> {
    let doc = formats::json::parse_adf_json(source)?;
    Ok(encode(&doc))
}
