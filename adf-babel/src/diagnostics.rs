//! Warnings collected while rendering.
//!
//! Unsupported constructs never abort a render. Each one is recorded as a
//! [`Diagnostic`] on the builder that met it and mirrored to the `tracing`
//! log, so callers can both show warnings and assert on them.

use std::fmt;

/// What kind of construct was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Node,
    Mark,
    Inline,
    InlineExtension,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Node => "node",
            DiagnosticCategory::Mark => "mark",
            DiagnosticCategory::Inline => "inline",
            DiagnosticCategory::InlineExtension => "inline_extension",
        }
    }
}

/// A single "unsupported construct" warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub detail: String,
}

impl Diagnostic {
    pub fn unsupported(category: DiagnosticCategory, detail: impl Into<String>) -> Self {
        Diagnostic {
            category,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported {} type {}",
            self.category.as_str(),
            self.detail
        )
    }
}

/// Ordered collection of diagnostics owned by one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and forwards it to the log.
    pub fn warn_unsupported(&mut self, category: DiagnosticCategory, detail: impl Into<String>) {
        let diagnostic = Diagnostic::unsupported(category, detail);
        tracing::warn!(category = category.as_str(), "{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_warning_text() {
        let d = Diagnostic::unsupported(DiagnosticCategory::InlineExtension, "a.b/c");
        assert_eq!(d.to_string(), "unsupported inline_extension type a.b/c");
    }

    #[test]
    fn test_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn_unsupported(DiagnosticCategory::Node, "table");
        diagnostics.warn_unsupported(DiagnosticCategory::Mark, "textColor");

        let details: Vec<_> = diagnostics.iter().map(|d| d.detail.as_str()).collect();
        assert_eq!(details, vec!["table", "textColor"]);
        assert_eq!(diagnostics.len(), 2);
    }
}
