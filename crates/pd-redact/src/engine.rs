//! Main redaction engine.
//!
//! The engine walks a message segment by segment (see [`crate::tokenize`]) and
//! replaces the value of every pair whose key is a sensitive field. Everything
//! else, including whitespace and any log prefix, is copied through verbatim.

use crate::tokenize::segments;
use crate::{FieldSet, RedactionSpec};
use serde::Serialize;

/// Result of redacting a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedMessage {
    /// The redacted output string.
    pub output: String,

    /// Number of values that were replaced.
    pub redacted_count: usize,
}

impl RedactedMessage {
    /// Whether any value was replaced.
    pub fn was_modified(&self) -> bool {
        self.redacted_count > 0
    }
}

impl From<RedactedMessage> for String {
    fn from(message: RedactedMessage) -> Self {
        message.output
    }
}

/// Obfuscate the values of `fields` in `message`.
///
/// Each `key=value` token whose key is one of `fields` has its value replaced
/// by `redaction`; the key, the `=` and the trailing separator are kept.
/// A trailing pair without a separator is redacted to the end of the message.
///
/// Never fails. Field names that cannot occur as keys (empty, or containing
/// `=`, whitespace or the separator) simply never match. Re-filtering the
/// output is a no-op as long as `redaction` contains neither `=` nor
/// `separator`.
pub fn filter<S: AsRef<str>>(fields: &[S], redaction: &str, message: &str, separator: char) -> String {
    let matches = |key: &str| fields.iter().any(|f| f.as_ref() == key);
    redact_with(matches, redaction, message, separator).output
}

fn redact_with<F>(is_sensitive: F, redaction: &str, message: &str, separator: char) -> RedactedMessage
where
    F: Fn(&str) -> bool,
{
    let mut output = String::with_capacity(message.len());
    let mut redacted_count = 0;

    for seg in segments(message, separator) {
        match seg.pair() {
            Some(pair) if is_sensitive(pair.key) => {
                output.push_str(pair.lead);
                output.push_str(pair.key);
                output.push('=');
                output.push_str(redaction);
                redacted_count += 1;
            }
            _ => output.push_str(seg.text),
        }
        if seg.terminated {
            output.push(separator);
        }
    }

    RedactedMessage {
        output,
        redacted_count,
    }
}

/// The main redaction engine.
///
/// Holds a validated [`RedactionSpec`] and nothing else, so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RedactionEngine {
    spec: RedactionSpec,
}

impl RedactionEngine {
    /// Create an engine for the given policy.
    pub fn new(spec: RedactionSpec) -> Self {
        Self { spec }
    }

    /// Engine for the default PII fields, `***` and `;`.
    pub fn pii() -> Self {
        Self::new(RedactionSpec::pii())
    }

    /// Redact a message, returning only the output text.
    pub fn filter(&self, message: &str) -> String {
        self.redact(message).output
    }

    /// Redact a message and report how many values were replaced.
    pub fn redact(&self, message: &str) -> RedactedMessage {
        let fields: &FieldSet = self.spec.fields();
        if fields.is_empty() {
            return RedactedMessage {
                output: message.to_string(),
                redacted_count: 0,
            };
        }
        redact_with(
            |key| fields.contains(key),
            self.spec.redaction(),
            message,
            self.spec.separator(),
        )
    }

    /// Get a reference to the policy.
    pub fn spec(&self) -> &RedactionSpec {
        &self.spec
    }
}
