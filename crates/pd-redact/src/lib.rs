//! Redaction engine for delimited `key=value` log messages.
//!
//! This crate obfuscates the values of named fields inside flat text such as
//! `name=Bob; email=bob@example.com; ip=10.0.0.1;` before it leaves the process.
//!
//! # Key Features
//!
//! - **Token-anchored matching**: keys are matched as whole tokens, so `name`
//!   never matches inside `username`.
//! - **Bounded values**: a value always ends at the next separator.
//! - **Idempotent**: redacting already-redacted text changes nothing.
//! - **Linear time**: an explicit tokenizer, no regex backtracking.
//!
//! # Example
//!
//! ```
//! use pd_redact::{filter, RedactionEngine};
//!
//! let out = filter(&["password"], "***", "password=hunter2;", ';');
//! assert_eq!(out, "password=***;");
//!
//! let engine = RedactionEngine::pii();
//! assert_eq!(engine.filter("name=Bob; ip=10.0.0.1;"), "name=***; ip=10.0.0.1;");
//! ```

pub mod engine;
pub mod error;
pub mod field_set;
pub mod policy;
pub mod tokenize;

pub use engine::{filter, RedactedMessage, RedactionEngine};
pub use error::{RedactionError, Result};
pub use field_set::{FieldSet, PII_FIELDS};
pub use policy::{RedactionSpec, DEFAULT_REDACTION, DEFAULT_SEPARATOR};
