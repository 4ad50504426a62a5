//! Code-to-display-row mapping tables.
//!
//! A mapping is static configuration per report type: the ordered list of
//! account codes a statement shows, with their indentation depth.

use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// One line of a statement layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    /// Account code whose amounts fill the line.
    pub code: String,
    /// Label override; the account name is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Indentation depth for hierarchical rendering.
    #[serde(default)]
    pub indent: u8,
}

impl DisplayLine {
    /// Creates a line without a label override.
    #[must_use]
    pub fn new(code: impl Into<String>, indent: u8) -> Self {
        Self {
            code: code.into(),
            name: None,
            indent,
        }
    }

    /// Sets the label override.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Ordered statement layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayMapping {
    lines: Vec<DisplayLine>,
}

impl DisplayMapping {
    /// Creates a mapping from lines in display order.
    #[must_use]
    pub fn new(lines: Vec<DisplayLine>) -> Self {
        Self { lines }
    }

    /// Parses a JSON array of lines.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Mapping` on malformed JSON.
    pub fn from_json(source: &str) -> Result<Self, ReportError> {
        serde_json::from_str(source).map_err(|e| ReportError::Mapping(e.to_string()))
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// Returns true when the mapping has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let mapping = DisplayMapping::from_json(
            r#"[
                {"code": "4000", "name": "Operating revenue"},
                {"code": "4100", "indent": 1}
            ]"#,
        )
        .unwrap();

        assert_eq!(mapping.lines().len(), 2);
        assert_eq!(mapping.lines()[0].name.as_deref(), Some("Operating revenue"));
        assert_eq!(mapping.lines()[0].indent, 0);
        assert_eq!(mapping.lines()[1], DisplayLine::new("4100", 1));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = DisplayMapping::from_json("{not json").unwrap_err();
        assert!(matches!(err, ReportError::Mapping(_)));
    }
}
