//! Sensitive field names.

use crate::error::{RedactionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fields treated as PII by default.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// An ordered, immutable set of field names whose values get redacted.
///
/// Insertion order is kept for display and serialization; duplicates collapse
/// to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldSet {
    names: Vec<String>,
    index: HashSet<String>,
}

impl FieldSet {
    /// Build a field set, validating every name.
    ///
    /// A name must be non-empty and must not contain `=` or whitespace,
    /// since neither can ever be part of a key.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::empty();
        for name in names {
            let name = name.into();
            validate_name(&name)?;
            if set.index.insert(name.clone()) {
                set.names.push(name);
            }
        }
        Ok(set)
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// The default PII set: name, email, phone, ssn, password.
    pub fn pii() -> Self {
        let names: Vec<String> = PII_FIELDS.iter().map(|s| s.to_string()).collect();
        let index = names.iter().cloned().collect();
        Self { names, index }
    }

    /// Whether `key` is one of the sensitive fields.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Field names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::pii()
    }
}

impl TryFrom<Vec<String>> for FieldSet {
    type Error = RedactionError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FieldSet> for Vec<String> {
    fn from(set: FieldSet) -> Self {
        set.names
    }
}

impl std::fmt::Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(","))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RedactionError::EmptyFieldName);
    }
    if name.contains('=') {
        return Err(RedactionError::InvalidFieldName {
            name: name.to_string(),
            reason: "'='",
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(RedactionError::InvalidFieldName {
            name: name.to_string(),
            reason: "whitespace",
        });
    }
    Ok(())
}
