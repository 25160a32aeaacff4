//! ADF JSON format
//!
//! The wire representation used by the tracker's REST API. Parsing accepts
//! any ADF tree; serialization emits compact JSON unless the `pretty`
//! option is `true`.

use crate::adf::nodes::Node;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use std::collections::HashMap;

pub fn parse_adf_json(source: &str) -> Result<Node, FormatError> {
    serde_json::from_str(source)
        .map_err(|e| FormatError::ParseError(format!("Invalid ADF JSON: {e}")))
}

pub fn serialize_adf_json(doc: &Node, pretty: bool) -> Result<String, FormatError> {
    let result = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    result.map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
}

/// Format implementation for ADF JSON
#[derive(Default)]
pub struct AdfJsonFormat;

impl Format for AdfJsonFormat {
    fn name(&self) -> &str {
        "adf-json"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        parse_adf_json(source)
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        serialize_adf_json(doc, false)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let pretty = match options.get("pretty").map(|v| v.to_lowercase()) {
            None => false,
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(other) => {
                return Err(FormatError::NotSupported(format!(
                    "Invalid value '{other}' for option 'pretty'"
                )))
            }
        };
        serialize_adf_json(doc, pretty).map(SerializedDocument::Text)
    }
}
