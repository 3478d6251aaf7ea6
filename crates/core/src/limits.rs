//! Size limits for containers
//!
//! This module defines configurable limits enforced on insertion. Violations
//! result in `LimitExceeded` (or `InvalidKey` for over-long keys).
//!
//! Limits are chosen when a container is constructed and stay fixed for its
//! lifetime. Serialized containers do not carry their limits; decoding into an
//! existing container applies the receiver's limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size limits for dictionaries and lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum live entries in a dictionary (default: 1M)
    pub max_entries: usize,

    /// Maximum items in a list (default: 1M)
    pub max_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 1024,
            max_entries: 1_000_000,
            max_items: 1_000_000,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large containers.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 16,
            max_entries: 4,
            max_items: 4,
        }
    }

    /// Check that a dictionary holding `len` entries can take one more
    pub fn check_entries(&self, len: usize) -> Result<(), LimitError> {
        if len >= self.max_entries {
            return Err(LimitError::TooManyEntries {
                max: self.max_entries,
            });
        }
        Ok(())
    }

    /// Check that a list holding `len` items can take one more
    pub fn check_items(&self, len: usize) -> Result<(), LimitError> {
        if len >= self.max_items {
            return Err(LimitError::TooManyItems {
                max: self.max_items,
            });
        }
        Ok(())
    }
}

/// Limit validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Dictionary already holds the maximum number of entries
    #[error("dictionary is full ({max} entries)")]
    TooManyEntries {
        /// Maximum allowed entries
        max: usize,
    },

    /// List already holds the maximum number of items
    #[error("list is full ({max} items)")]
    TooManyItems {
        /// Maximum allowed items
        max: usize,
    },
}
