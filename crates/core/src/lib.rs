//! Core types for the collection containers
//!
//! This crate defines the foundational types shared by the dictionary and list:
//! - Value: Closed tagged union for every storable value
//! - ElementType: Type tag restricting list contents
//! - Offset: Key-or-index identifier
//! - Key validation: numeric keys are reserved for positional addressing
//! - Limits: Configurable container size limits
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod element_type;
pub mod error;
pub mod key;
pub mod limits;
pub mod offset;
pub mod value;

pub use element_type::ElementType;
pub use error::{Error, Result};
pub use key::{is_numeric, validate_key, validate_key_with_limits, KeyError};
pub use limits::{LimitError, Limits};
pub use offset::Offset;
pub use value::{ResourceHandle, Value};
