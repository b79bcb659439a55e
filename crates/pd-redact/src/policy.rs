//! Redaction policy: which fields, what replaces them, and how tokens are delimited.

use crate::error::{RedactionError, Result};
use crate::FieldSet;
use serde::Serialize;

/// Placeholder substituted for sensitive values.
pub const DEFAULT_REDACTION: &str = "***";

/// Delimiter between `key=value` tokens.
pub const DEFAULT_SEPARATOR: char = ';';

/// Everything that determines the engine's behavior.
///
/// Construction enforces the conditions filtering relies on: no field name
/// contains the separator, and the redaction text contains neither `=` nor
/// the separator, so a redacted token can never be re-matched or split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactionSpec {
    fields: FieldSet,
    redaction: String,
    separator: char,
}

impl RedactionSpec {
    /// Create a validated policy.
    pub fn new(fields: FieldSet, redaction: impl Into<String>, separator: char) -> Result<Self> {
        let redaction = redaction.into();

        if separator == '=' {
            return Err(RedactionError::InvalidSeparator(separator));
        }
        if let Some(name) = fields.iter().find(|name| name.contains(separator)) {
            return Err(RedactionError::SeparatorInFieldName {
                name: name.to_string(),
                separator,
            });
        }
        if redaction.contains('=') {
            return Err(RedactionError::InvalidRedactionText('='));
        }
        if redaction.contains(separator) {
            return Err(RedactionError::InvalidRedactionText(separator));
        }

        Ok(Self {
            fields,
            redaction,
            separator,
        })
    }

    /// Policy with the default redaction text and separator.
    pub fn with_fields(fields: FieldSet) -> Result<Self> {
        Self::new(fields, DEFAULT_REDACTION, DEFAULT_SEPARATOR)
    }

    /// The default PII policy.
    pub fn pii() -> Self {
        Self {
            fields: FieldSet::pii(),
            redaction: DEFAULT_REDACTION.to_string(),
            separator: DEFAULT_SEPARATOR,
        }
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn redaction(&self) -> &str {
        &self.redaction
    }

    pub fn separator(&self) -> char {
        self.separator
    }
}

impl Default for RedactionSpec {
    fn default() -> Self {
        Self::pii()
    }
}
