//! User row sources.
//!
//! A data source is any blocking, pull-based iterator of
//! `Result<UserRow, SourceError>`. It is finite and cannot be restarted: once
//! it returns `None` it keeps returning `None`, and re-reading means opening
//! the source again.
//!
//! The shipped source reads JSON lines. Each line holds one row, either as an
//! object keyed by column name or as an array of the eight values in column
//! order. Blank lines are skipped.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Column order of a user row.
pub const USER_COLUMNS: [&str; 8] = [
    "name",
    "email",
    "phone",
    "ssn",
    "password",
    "ip",
    "last_login",
    "user_agent",
];

/// One row of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub ssn: String,
    pub password: String,
    pub ip: String,
    pub last_login: String,
    pub user_agent: String,
}

impl UserRow {
    /// Values in column order.
    pub fn values(&self) -> [&str; 8] {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.ssn,
            &self.password,
            &self.ip,
            &self.last_login,
            &self.user_agent,
        ]
    }
}

impl From<[String; 8]> for UserRow {
    fn from(values: [String; 8]) -> Self {
        let [name, email, phone, ssn, password, ip, last_login, user_agent] = values;
        Self {
            name,
            email,
            phone,
            ssn,
            password,
            ip,
            last_login,
            user_agent,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRow {
    Object(UserRow),
    Tuple([String; 8]),
}

impl From<RawRow> for UserRow {
    fn from(raw: RawRow) -> Self {
        match raw {
            RawRow::Object(row) => row,
            RawRow::Tuple(values) => values.into(),
        }
    }
}

/// Errors raised by a row source.
///
/// Parse errors name the line but never quote it, since it holds PII.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to open row source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read row source: {0}")]
    Read(#[from] io::Error),

    #[error("malformed row at line {line}: expected an object with the user columns or an array of 8 strings")]
    Malformed { line: usize },
}

/// Rows read lazily from JSON lines.
pub struct JsonlSource<R> {
    reader: R,
    line: usize,
    done: bool,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            done: false,
        }
    }
}

impl JsonlSource<Box<dyn BufRead>> {
    /// Open a file, or stdin when `path` is `-`.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let reader: Box<dyn BufRead> = if path == Path::new("-") {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(path).map_err(|source| SourceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> Iterator for JsonlSource<R> {
    type Item = Result<UserRow, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = String::new();
        loop {
            buf.clear();
            self.line += 1;
            match self.reader.read_line(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    let text = buf.trim();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(
                        serde_json::from_str::<RawRow>(text)
                            .map(UserRow::from)
                            .map_err(|_| SourceError::Malformed { line: self.line }),
                    );
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(SourceError::Read(e)));
                }
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for JsonlSource<R> {}
