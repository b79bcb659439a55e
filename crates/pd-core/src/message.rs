//! Builds `key=value;` log messages from user rows.

use crate::source::{UserRow, USER_COLUMNS};
use std::fmt::Write as _;

/// Render a row as `name=<v>; email=<v>; ...; user_agent=<v>; ` in column order.
///
/// Every pair, the last one included, is followed by `; `.
pub fn compose_message(row: &UserRow) -> String {
    let mut out = String::new();
    for (column, value) in USER_COLUMNS.iter().zip(row.values()) {
        let _ = write!(out, "{}={}; ", column, value);
    }
    out
}
