//! Shared model types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Response body whose shape is owned by the backend.
///
/// Kept as structured JSON so it can be printed or re-serialized without
/// loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiDocument(pub serde_json::Value);

impl ApiDocument {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Number of entries when the document is a list
    pub fn len(&self) -> Option<usize> {
        self.0.as_array().map(Vec::len)
    }
}

/// A validated path parameter (airport code, baggage ID, ...).
///
/// Non-blank, not `.` or `..`, no `/`, no control characters. Percent-encoding happens when
/// the URL is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ValidationErrors> {
        let trimmed = value.trim();
        let mut errors = ValidationErrors::new();

        if trimmed.is_empty() {
            errors.add(field, "must not be empty");
        } else if trimmed == "." || trimmed == ".." {
            errors.add(field, "must not be a relative path segment");
        } else if trimmed.contains('/') {
            errors.add(field, "must not contain '/'");
        } else if trimmed.chars().any(char::is_control) {
            errors.add(field, "must not contain control characters");
        }

        errors.into_result().map(|()| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
