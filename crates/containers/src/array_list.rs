//! ArrayList: dense list optionally restricted to one element type
//!
//! A list is created with an [`ElementType`] and a cast policy, both fixed
//! for its lifetime:
//! - `Any` accepts every value unchanged
//! - a restricted list accepts values of its type unchanged
//! - a mismatched value is coerced through [`cast`](crate::cast::cast) when
//!   casting is on, and rejected with `TypeMismatch` when it is off
//!
//! Removal shifts later items down, so indices are always `0..len`.
//!
//! `apply_map` does not re-check the element type of the mapped values; the
//! callback is responsible for keeping them well-typed.

use crate::cast::cast;
use collection_core::{ElementType, Error, Limits, Offset, Result, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dense list with an optional element type restriction
///
/// # Example
///
/// ```
/// use collection_containers::ArrayList;
/// use collection_core::{ElementType, Value};
///
/// let mut list = ArrayList::with_type(ElementType::Integer, true);
/// list.add("42")?;
/// assert_eq!(list.get(0)?, &Value::Int(42));
///
/// assert!(list.add(vec![Value::Int(1), Value::Int(2)]).is_err());
/// # Ok::<(), collection_core::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ArrayListRepr", try_from = "ArrayListRepr")]
pub struct ArrayList {
    items: Vec<Value>,
    element_type: ElementType,
    cast_on_mismatch: bool,
    limits: Limits,
}

impl Default for ArrayList {
    fn default() -> Self {
        Self::with_type(ElementType::Any, true)
    }
}

impl ArrayList {
    /// Create an unrestricted list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list restricted to `element_type`
    pub fn with_type(element_type: ElementType, cast_on_mismatch: bool) -> Self {
        Self {
            items: Vec::new(),
            element_type,
            cast_on_mismatch,
            limits: Limits::default(),
        }
    }

    /// Create a list from an element type name
    ///
    /// # Errors
    ///
    /// `InvalidType` if `name` is not a known element type.
    pub fn parse(name: &str, cast_on_mismatch: bool) -> Result<Self> {
        Ok(Self::with_type(name.parse()?, cast_on_mismatch))
    }

    /// Replace the limits of this list
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Element type restriction
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Whether mismatched values are coerced
    pub fn cast_on_mismatch(&self) -> bool {
        self.cast_on_mismatch
    }

    /// Limits applied to this list
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ========== Insertion ==========

    /// Append a value, coercing it when the policy allows
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if the type differs and casting is off, or the list
    ///   type is array/object/resource
    /// - `CastError` if the coercion is disallowed for this value
    /// - `LimitExceeded` if the list is full
    pub fn add(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let value = self.admit(value.into())?;
        self.limits.check_items(self.len())?;
        self.items.push(value);
        Ok(self)
    }

    fn admit(&self, value: Value) -> Result<Value> {
        let target = self.element_type;
        if value.is_of(target) {
            return Ok(value);
        }
        if !self.cast_on_mismatch || !target.is_castable_target() {
            return Err(Error::TypeMismatch {
                expected: target.name(),
                actual: value.type_name(),
            });
        }

        let from = value.type_name();
        let coerced = cast(target, value)?;
        debug!(from, to = target.name(), "coerced value on insert");
        Ok(coerced)
    }

    // ========== Positional access ==========

    fn position(&self, offset: Offset) -> Result<usize> {
        let index = offset.as_index().ok_or_else(|| {
            Error::InvalidArgument(format!("index must be an integer, got {}", offset))
        })?;
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.len())
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Item at `index`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `index` is a key that does not read as an integer
    /// - `IndexOutOfRange` if `index` is outside `0..len`
    pub fn get(&self, index: impl Into<Offset>) -> Result<&Value> {
        let i = self.position(index.into())?;
        Ok(&self.items[i])
    }

    /// Whether `index` is inside `0..len`
    ///
    /// Positional check only; use [`search`](Self::search) to look for a
    /// value.
    pub fn has(&self, index: impl Into<Offset>) -> bool {
        self.position(index.into()).is_ok()
    }

    /// Position of the first item equal to `value`, or `None`
    pub fn search(&self, value: &Value) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    // ========== Removal ==========

    /// Remove and return the item at `index`
    ///
    /// Later items shift down by one. Errors as for [`get`](Self::get).
    pub fn remove(&mut self, index: impl Into<Offset>) -> Result<Value> {
        let i = self.position(index.into())?;
        Ok(self.items.remove(i))
    }

    /// Remove and return the first item; `None` when empty
    pub fn remove_first(&mut self) -> Option<Value> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.remove(0))
    }

    /// Remove and return the last item; `None` when empty
    pub fn remove_last(&mut self) -> Option<Value> {
        self.items.pop()
    }

    /// Remove the first item equal to `value`
    pub fn remove_by_value(&mut self, value: &Value) -> Result<Value> {
        let index = self.search(value).ok_or(Error::ValueNotFound)?;
        self.remove(index)
    }

    /// Remove every item
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    // ========== Bulk transforms ==========

    /// Items for which `predicate` holds, in order
    pub fn filter<F>(&self, mut predicate: F) -> Vec<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        self.items
            .iter()
            .filter(|item| predicate(*item))
            .cloned()
            .collect()
    }

    /// Keep only the items for which `predicate` holds; returns the kept items
    pub fn apply_filter<F>(&mut self, predicate: F) -> Vec<Value>
    where
        F: FnMut(&Value) -> bool,
    {
        let kept = self.filter(predicate);
        self.items = kept.clone();
        kept
    }

    /// Transform every item, in order
    pub fn map<F>(&self, f: F) -> Vec<Value>
    where
        F: FnMut(&Value) -> Value,
    {
        self.items.iter().map(f).collect()
    }

    /// Replace every item with `f(item)`; returns the new items
    ///
    /// The results are stored as-is, without element type checks.
    pub fn apply_map<F>(&mut self, f: F) -> Vec<Value>
    where
        F: FnMut(&Value) -> Value,
    {
        let mapped = self.map(f);
        self.items = mapped.clone();
        mapped
    }

    // ========== Views ==========

    /// Iterate `(index, item)` pairs in order
    pub fn iter(&self) -> std::iter::Enumerate<std::slice::Iter<'_, Value>> {
        self.items.iter().enumerate()
    }

    /// Items as a slice
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Copy of the items
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.clone()
    }

    // ========== Serialization ==========

    /// Encode the items as a JSON array
    pub fn to_json(&self) -> Result<String> {
        let items: Vec<serde_json::Value> = self
            .items
            .iter()
            .cloned()
            .map(serde_json::Value::from)
            .collect();
        serde_json::to_string(&items).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// Encode the list, including its type and cast policy, as bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a list produced by [`to_bytes`](Self::to_bytes)
    ///
    /// Items that do not match the encoded element type are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let repr: ArrayListRepr = bincode::deserialize(bytes)?;
        Self::try_from(repr)
    }
}

impl PartialEq for ArrayList {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type
            && self.cast_on_mismatch == other.cast_on_mismatch
            && self.items == other.items
    }
}

// ============================================================================
// serde
// ============================================================================

#[derive(Serialize, Deserialize)]
struct ArrayListRepr {
    element_type: ElementType,
    cast_on_mismatch: bool,
    items: Vec<Value>,
}

impl From<ArrayList> for ArrayListRepr {
    fn from(list: ArrayList) -> Self {
        ArrayListRepr {
            element_type: list.element_type,
            cast_on_mismatch: list.cast_on_mismatch,
            items: list.items,
        }
    }
}

impl TryFrom<ArrayListRepr> for ArrayList {
    type Error = Error;

    fn try_from(repr: ArrayListRepr) -> Result<Self> {
        if let Some(bad) = repr.items.iter().find(|v| !v.is_of(repr.element_type)) {
            return Err(Error::TypeMismatch {
                expected: repr.element_type.name(),
                actual: bad.type_name(),
            });
        }
        let mut list = ArrayList::with_type(repr.element_type, repr.cast_on_mismatch);
        list.items = repr.items;
        Ok(list)
    }
}

// ============================================================================
// Iteration
// ============================================================================

impl<'a> IntoIterator for &'a ArrayList {
    type Item = (usize, &'a Value);
    type IntoIter = std::iter::Enumerate<std::slice::Iter<'a, Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ArrayList {
    type Item = (usize, Value);
    type IntoIter = std::iter::Enumerate<std::vec::IntoIter<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter().enumerate()
    }
}
