//! Ticket report rendering
//!
//! Turns the JSON the tracker returns for an issue (or a search result
//! holding several issues) into a readable markdown report: a header with
//! key and summary, the people and status, the description, then comments
//! and attachments, newest first.
//!
//! Description and comment bodies are ADF trees rendered with the markdown
//! encoder. Older API versions send them as plain strings, which are
//! rejected with [`FormatError::InvalidInput`].

use crate::adf::nodes::Node;
use crate::error::FormatError;
use crate::formats::markdown::serializer::serialize_to_markdown;
use serde_json::Value;

/// Which optional sections of the report to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketOptions {
    pub show_comments: bool,
    pub show_attachments: bool,
}

impl Default for TicketOptions {
    fn default() -> Self {
        TicketOptions {
            show_comments: true,
            show_attachments: true,
        }
    }
}

/// Renders a single issue or a search payload (`{"issues": [...]}`).
pub fn render_tickets(payload: &Value, options: &TicketOptions) -> Result<String, FormatError> {
    let mut report = Report::default();
    match payload.get("issues").and_then(Value::as_array) {
        Some(issues) => {
            for issue in issues {
                report.issue(issue, options)?;
            }
        }
        None => report.issue(payload, options)?,
    }
    Ok(report.out)
}

#[derive(Default)]
struct Report {
    out: String,
}

impl Report {
    /// Appends `line` and a newline unless it already ends with one.
    fn puts(&mut self, line: &str) {
        self.out.push_str(line);
        if !line.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn issue(&mut self, issue: &Value, options: &TicketOptions) -> Result<(), FormatError> {
        let key = text_at(issue, &["key"]);
        let fields = issue.get("fields").unwrap_or(issue);

        self.puts("");
        self.puts(&format!("# {key}: {}", text_at(fields, &["summary"])));
        self.puts("");

        if let Some(parent) = fields.get("parent").filter(|p| !p.is_null()) {
            self.puts(&format!(
                "* Parent [{}]: {} {}",
                text_at(parent, &["fields", "issuetype", "name"]),
                text_at(parent, &["key"]),
                text_at(parent, &["fields", "summary"]),
            ));
        }

        self.puts(&format!(
            "* Assignee: {}",
            name_or_none(fields, &["assignee", "displayName"])
        ));
        self.puts(&format!(
            "* Reporter: {}",
            name_or_none(fields, &["reporter", "displayName"])
        ));
        self.puts(&format!("* Status: {}", text_at(fields, &["status", "name"])));
        self.puts("");

        if let Some(description) = fields.get("description").filter(|d| !d.is_null()) {
            self.puts("## Description");
            self.puts(&render_body(description, "description")?);
            self.puts("");
        }

        if options.show_comments {
            let comments = value_at(fields, &["comment", "comments"])
                .or_else(|| fields.get("comments"))
                .filter(|c| !c.is_null());
            if let Some(comments) = comments {
                self.comments(&decode_list(comments, "comments")?)?;
            }
        }

        if options.show_attachments {
            if let Some(attachments) = fields.get("attachment").filter(|a| !a.is_null()) {
                let attachments = decode_list(attachments, "attachment")?;
                if !attachments.is_empty() {
                    self.attachments(&attachments);
                }
            }
        }

        Ok(())
    }

    fn comments(&mut self, comments: &[Value]) -> Result<(), FormatError> {
        self.puts("## Comments");
        self.puts("");
        for comment in comments.iter().rev() {
            let created = text_at(comment, &["created"]);
            let mut heading = format!(
                "### {} -- {created}",
                text_at(comment, &["author", "displayName"])
            );
            let updated = text_at(comment, &["updated"]);
            if !updated.is_empty() && updated != created {
                heading.push_str(&format!(" (updated {updated})"));
            }
            self.puts(&heading);

            let body = match comment.get("body").filter(|b| !b.is_null()) {
                Some(body) => render_body(body, "comment body")?,
                None => String::new(),
            };
            self.puts(&body);
        }
        Ok(())
    }

    fn attachments(&mut self, attachments: &[Value]) {
        self.puts("");
        self.puts("## Attachments");
        self.puts("");
        for attachment in attachments.iter().rev() {
            self.puts(&format!(
                "* {} ({} bytes)",
                text_at(attachment, &["filename"]),
                text_at(attachment, &["size"]),
            ));
            self.puts(&format!(
                "  by {} on {}",
                text_at(attachment, &["author", "displayName"]),
                text_at(attachment, &["created"]),
            ));
            self.puts(&format!("  link: {}", text_at(attachment, &["content"])));
            self.puts("");
        }
    }
}

fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Scalar at `path` as display text; missing or null values render empty.
fn text_at(value: &Value, path: &[&str]) -> String {
    match value_at(value, path) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn name_or_none(value: &Value, path: &[&str]) -> String {
    let name = text_at(value, path);
    if name.is_empty() {
        "[none]".to_string()
    } else {
        name
    }
}

/// Lists sometimes arrive JSON-encoded inside a string.
fn decode_list(value: &Value, name: &str) -> Result<Vec<Value>, FormatError> {
    let decoded;
    let value = match value {
        Value::String(raw) => {
            decoded = serde_json::from_str::<Value>(raw).map_err(|e| {
                FormatError::ParseError(format!("{name} is not valid JSON: {e}"))
            })?;
            &decoded
        }
        other => other,
    };
    match value {
        Value::Array(items) => Ok(items.clone()),
        _ => Err(FormatError::InvalidInput(format!("{name} is not a list"))),
    }
}

fn render_body(body: &Value, name: &str) -> Result<String, FormatError> {
    let node: Node = match body {
        Value::String(raw) => {
            if !raw.starts_with("{\"") {
                return Err(FormatError::InvalidInput(format!(
                    "{name} seems to be non-JSON text; did you use version 3 of the API?"
                )));
            }
            serde_json::from_str(raw)
                .map_err(|e| FormatError::ParseError(format!("Invalid ADF JSON in {name}: {e}")))?
        }
        other => serde_json::from_value(other.clone())
            .map_err(|e| FormatError::ParseError(format!("Invalid ADF JSON in {name}: {e}")))?,
    };
    Ok(serialize_to_markdown(&node))
}
