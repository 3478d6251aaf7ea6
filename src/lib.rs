//! Collection - ordered keyed dictionaries and type-restricted lists
//!
//! Two independent in-memory containers over one dynamic [`Value`] model:
//! - [`Dictionary`] (also exported as [`Collection`]): an ordered map whose
//!   entries can be addressed by string key or by insertion index
//! - [`ArrayList`]: a dense list optionally restricted to one
//!   [`ElementType`], with a configurable cast policy on insertion
//!
//! # Quick Start
//!
//! ```
//! use collection::{ArrayList, Dictionary, ElementType, Value};
//!
//! let mut dict = Dictionary::new();
//! dict.add("a", 1)?.add("b", 2)?;
//! assert_eq!(dict.get(1)?, &Value::Int(2));
//!
//! let mut flags = ArrayList::with_type(ElementType::Boolean, true);
//! flags.add(0)?.add("1")?;
//! assert_eq!(flags.to_vec(), vec![Value::Bool(false), Value::Bool(true)]);
//! # Ok::<(), collection::Error>(())
//! ```

pub use collection_containers::{cast, ArrayList, Collection, Dictionary, UpdateOutcome};
pub use collection_core::{
    ElementType, Error, KeyError, LimitError, Limits, Offset, ResourceHandle, Result, Value,
};
