//! Identifiers that address a container element by key or by position

use serde::{Deserialize, Serialize};
use std::fmt;

/// A string key or an integer index
///
/// Indices are signed so that negative input can be represented and
/// rejected instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Offset {
    /// Associative key
    Key(String),
    /// Zero-based position
    Index(i64),
}

impl Offset {
    /// Integer form of this offset
    ///
    /// `Index` resolves directly; `Key` resolves when the string parses as an
    /// integer (surrounding whitespace allowed).
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Offset::Index(i) => Some(*i),
            Offset::Key(k) => k.trim().parse().ok(),
        }
    }

    /// Key form of this offset, if it is one
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Offset::Key(k) => Some(k),
            Offset::Index(_) => None,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Key(k) => write!(f, "\"{}\"", k),
            Offset::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Offset {
    fn from(k: &str) -> Self {
        Offset::Key(k.to_string())
    }
}

impl From<String> for Offset {
    fn from(k: String) -> Self {
        Offset::Key(k)
    }
}

impl From<&String> for Offset {
    fn from(k: &String) -> Self {
        Offset::Key(k.clone())
    }
}

impl From<i64> for Offset {
    fn from(i: i64) -> Self {
        Offset::Index(i)
    }
}

impl From<i32> for Offset {
    fn from(i: i32) -> Self {
        Offset::Index(i as i64)
    }
}

impl From<usize> for Offset {
    fn from(i: usize) -> Self {
        Offset::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}
