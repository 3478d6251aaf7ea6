//! Containers over the dynamic [`Value`](collection_core::Value) model
//!
//! - [`Dictionary`]: ordered map addressable by key or by insertion index
//! - [`ArrayList`]: dense list optionally restricted to one element type
//! - [`cast`]: the explicit coercion policy used by typed lists
//!
//! Both containers are single-threaded value types with no I/O. Each
//! instance owns its storage exclusively.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array_list;
pub mod cast;
pub mod dictionary;

pub use array_list::ArrayList;
pub use dictionary::{Dictionary, UpdateOutcome};

/// Name kept for callers of the older keyed container
pub type Collection = Dictionary;
