//! Key validation for dictionaries
//!
//! Keys are Unicode strings with two constraints:
//! - Keys must not be numeric strings. Numbers are reserved for positional
//!   addressing, so `"3"` could otherwise mean either a key or index 3.
//! - Keys must not exceed `max_key_bytes` (default: 1024)
//!
//! The empty string is a valid key.

use crate::limits::Limits;
use thiserror::Error;

/// Validate a key using default limits
///
/// # Examples
///
/// ```
/// use collection_core::key::validate_key;
///
/// assert!(validate_key("name").is_ok());
/// assert!(validate_key("user:123").is_ok());
///
/// assert!(validate_key("123").is_err());
/// assert!(validate_key(" 1.5e3 ").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    validate_key_with_limits(key, &Limits::default())
}

/// Validate a key with custom limits
pub fn validate_key_with_limits(key: &str, limits: &Limits) -> Result<(), KeyError> {
    if is_numeric(key) {
        return Err(KeyError::Numeric(key.to_string()));
    }

    let len = key.len();
    if len > limits.max_key_bytes {
        return Err(KeyError::TooLong {
            actual: len,
            max: limits.max_key_bytes,
        });
    }

    Ok(())
}

/// Whether `s` reads as a number
///
/// Accepts optional surrounding whitespace, an optional sign, digits with an
/// optional fraction (`"5."` and `".5"` both count) and an optional exponent.
/// Hex, binary, `inf` and `nan` spellings are not numeric.
pub fn is_numeric(s: &str) -> bool {
    let bytes = s
        .trim_matches(|c: char| c == ' ' || ('\t'..='\r').contains(&c))
        .as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Key validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Key is a numeric string
    #[error("cannot add numeric value \"{0}\" as associative key")]
    Numeric(String),

    /// Key exceeds maximum length
    #[error("key too long: {actual} bytes exceeds maximum {max}")]
    TooLong {
        /// Actual key length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },
}

impl KeyError {
    /// Get the reason code for this rejection
    pub fn reason_code(&self) -> &'static str {
        match self {
            KeyError::Numeric(_) => "numeric_key",
            KeyError::TooLong { .. } => "key_too_long",
        }
    }
}
