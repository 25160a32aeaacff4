//! Shared icon mapping for tree visualization formats
//!
//! Keeps the treeviz output and any future outline-style renderer consistent.

/// Get the Unicode icon for a given ADF node type tag
///
/// Returns a single Unicode character that visually represents the node type.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "doc" => "⧉",
        "heading" => "§",
        "paragraph" => "¶",
        "text" => "◦",
        "bulletList" | "orderedList" => "☰",
        "listItem" => "•",
        "codeBlock" => "𝒱",
        "blockquote" => "\"",
        "panel" => "▣",
        "hardBreak" => "↵",
        "emoji" => "☺",
        "mention" => "@",
        "inlineCard" => "⊕",
        "extension" => "ƒ",
        _ => "○",
    }
}
