//! Error types for the redaction engine.

use thiserror::Error;

/// Result type for redaction operations.
pub type Result<T> = std::result::Result<T, RedactionError>;

/// Errors raised while building a redaction policy.
///
/// Filtering itself never fails; these only surface when a [`crate::FieldSet`]
/// or [`crate::RedactionSpec`] is constructed from untrusted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedactionError {
    /// A field name was empty.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A field name contains a character that can never appear in a key.
    #[error("invalid field name '{name}': must not contain {reason}")]
    InvalidFieldName {
        name: String,
        reason: &'static str,
    },

    /// A field name contains the policy's separator.
    #[error("field name '{name}' contains the separator '{separator}'")]
    SeparatorInFieldName { name: String, separator: char },

    /// The separator would be ambiguous with the key/value delimiter.
    #[error("separator '{0}' is not allowed")]
    InvalidSeparator(char),

    /// The redaction text contains a character that would make it look like a token.
    #[error("redaction text must not contain '{0}'")]
    InvalidRedactionText(char),
}
