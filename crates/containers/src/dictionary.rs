//! Dictionary: ordered map addressable by key or by position
//!
//! ## Design
//!
//! Two co-maintained structures hold the contents:
//! - `entries`: key -> value, unordered
//! - `keys`: keys in insertion order; a key's slot is its index
//!
//! Every mutation updates both, so there is always a bijection between the
//! two and the index space is always dense (`0..len`). Removing a key shifts
//! every later key down by one; removal is O(len) and no tombstones exist.
//!
//! ## Keys vs indices
//!
//! Numeric strings are never accepted as keys. That keeps `"3"` (a key) and
//! `3` (an index) from ever meaning two different things, and lets `update`
//! treat a numeric string as an index.
//!
//! ## Soft lookups
//!
//! `index_of`, `key_of` and `find` return `Option` and never fail.
//!
//! ## Callbacks
//!
//! `each` and `find` borrow the dictionary immutably, so callbacks cannot
//! mutate it during iteration. Entries are visited in insertion order.

use collection_core::{
    is_numeric, validate_key_with_limits, Error, Limits, Offset, Result, Value,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// What `update` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new key was appended
    Inserted,
    /// An existing entry's value was overwritten in place
    Replaced,
}

/// Ordered map keyed by non-numeric strings, also addressable by index
///
/// # Example
///
/// ```
/// use collection_containers::Dictionary;
///
/// let mut dict = Dictionary::new();
/// dict.add("a", 1)?.add("b", 2)?.add("c", 3)?;
/// dict.remove("b")?;
///
/// assert_eq!(dict.get_offsets(), ["a", "c"]);
/// assert_eq!(dict.key_of(1), Some("c"));
/// assert_eq!(dict.get(1)?.as_int(), Some(3));
/// # Ok::<(), collection_core::Error>(())
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(into = "DictionaryRepr", try_from = "DictionaryRepr")]
pub struct Dictionary {
    entries: FxHashMap<String, Value>,
    keys: Vec<String>,
    limits: Limits,
}

impl Dictionary {
    /// Create an empty dictionary with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dictionary with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            entries: FxHashMap::default(),
            keys: Vec::new(),
            limits,
        }
    }

    /// Create a dictionary pre-filled from `(key, value)` pairs
    ///
    /// Pairs are added in iteration order; the first invalid or duplicate key
    /// fails the whole construction.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut dict = Self::new();
        dict.fill(entries)?;
        Ok(dict)
    }

    /// Limits applied to this dictionary
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Alias of [`len`](Self::len)
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Whether the dictionary holds no entries
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    // ========== Mutation ==========

    /// Store a new value and index its key
    fn index(&mut self, key: String, value: Value) {
        self.keys.push(key.clone());
        self.entries.insert(key, value);
    }

    /// Add a new entry at the end
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the key is numeric or too long
    /// - `DuplicateKey` if the key is already present
    /// - `LimitExceeded` if the dictionary is full
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        let key = key.into();
        validate_key_with_limits(&key, &self.limits)?;

        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }
        self.limits.check_entries(self.len())?;

        self.index(key, value.into());
        Ok(self)
    }

    /// Remove an entry by key
    ///
    /// Every key after the removed one moves down one index.
    pub fn remove(&mut self, key: &str) -> Result<&mut Self> {
        let index = self
            .index_of(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        self.remove_slot(index);
        Ok(self)
    }

    /// Remove an entry by index
    pub fn remove_at(&mut self, index: usize) -> Result<&mut Self> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.len(),
            });
        }
        self.remove_slot(index);
        Ok(self)
    }

    fn remove_slot(&mut self, index: usize) {
        let key = self.keys.remove(index);
        self.entries.remove(&key);
    }

    /// Overwrite an entry, or add it if the key is new
    ///
    /// Dispatch:
    /// - existing key: value replaced in place, order and size unchanged
    /// - integer index, or numeric string read as one: the entry at that
    ///   index is replaced; an index with no entry fails with
    ///   `IndexOutOfRange`
    /// - any other key: behaves as [`add`](Self::add)
    pub fn update(
        &mut self,
        offset: impl Into<Offset>,
        value: impl Into<Value>,
    ) -> Result<UpdateOutcome> {
        let value = value.into();
        match offset.into() {
            Offset::Key(key) => {
                if is_numeric(&key) {
                    return self.update_index(numeric_index(&key), value);
                }
                if let Some(slot) = self.entries.get_mut(&key) {
                    *slot = value;
                    return Ok(UpdateOutcome::Replaced);
                }
                self.add(key, value)?;
                Ok(UpdateOutcome::Inserted)
            }
            Offset::Index(index) => self.update_index(index, value),
        }
    }

    fn update_index(&mut self, index: i64, value: Value) -> Result<UpdateOutcome> {
        let key = self
            .resolve_index(index)
            .map(str::to_string)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        self.update(key, value)
    }

    /// Add every pair in order, stopping at the first failure
    ///
    /// Not atomic: pairs added before the failing one stay in the
    /// dictionary. Use [`fill_atomic`](Self::fill_atomic) to get
    /// all-or-nothing behaviour.
    pub fn fill<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (inserted, (key, value)) in entries.into_iter().enumerate() {
            if let Err(e) = self.add(key, value) {
                warn!(inserted, error = %e, "bulk load stopped partway");
                return Err(e);
            }
        }
        Ok(self)
    }

    /// Add every pair, or none of them
    ///
    /// All keys are validated against the current contents, each other and
    /// the limits before anything is inserted.
    pub fn fill_atomic<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let batch: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut seen = FxHashSet::default();
        for (position, (key, _)) in batch.iter().enumerate() {
            validate_key_with_limits(key, &self.limits)?;
            if self.entries.contains_key(key) || !seen.insert(key.as_str()) {
                return Err(Error::DuplicateKey(key.clone()));
            }
            self.limits.check_entries(self.len() + position)?;
        }

        debug!(entries = batch.len(), "atomic bulk load validated");
        for (key, value) in batch {
            self.index(key, value);
        }
        Ok(self)
    }

    /// Remove every entry
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self.keys.clear();
        self
    }

    // ========== Lookup ==========

    /// Get a value by key or index
    ///
    /// Numeric strings are not read as indices here; pass an integer.
    pub fn get(&self, offset: impl Into<Offset>) -> Result<&Value> {
        let offset = offset.into();
        let found = match &offset {
            Offset::Key(key) => self.entries.get(key),
            Offset::Index(index) => self
                .resolve_index(*index)
                .and_then(|key| self.entries.get(key)),
        };
        found.ok_or_else(|| Error::OffsetNotFound(offset.to_string()))
    }

    /// Whether a key or index addresses a live entry
    pub fn exists(&self, offset: impl Into<Offset>) -> bool {
        match offset.into() {
            Offset::Key(key) => self.entries.contains_key(&key),
            Offset::Index(index) => self.resolve_index(index).is_some(),
        }
    }

    /// Index of `key`, or `None`
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Key at `index`, or `None`
    pub fn key_of(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    fn resolve_index(&self, index: i64) -> Option<&str> {
        usize::try_from(index).ok().and_then(|i| self.key_of(i))
    }

    /// Keys in index order
    pub fn get_offsets(&self) -> &[String] {
        &self.keys
    }

    /// Ordered snapshot of every entry
    pub fn get_all(&self) -> Vec<(String, Value)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Unordered snapshot of every entry
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Call `f(key, value)` for every entry in order and collect the results
    pub fn each<R, F>(&self, mut f: F) -> Vec<R>
    where
        F: FnMut(&str, &Value) -> R,
    {
        self.iter().map(|(k, v)| f(k, v)).collect()
    }

    /// First value for which `predicate(key, value)` holds
    pub fn find<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&str, &Value) -> bool,
    {
        self.iter().find(|(k, v)| predicate(*k, *v)).map(|(_, v)| v)
    }

    /// Iterate `(key, value)` pairs in index order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            keys: self.keys.iter(),
            entries: &self.entries,
        }
    }

    // ========== Serialization ==========

    /// Encode as a JSON object, keys in index order
    pub fn to_json(&self) -> Result<String> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.clone())))
            .collect();
        serde_json::to_string(&map).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// Merge JSON into this dictionary with [`update`](Self::update) semantics
    ///
    /// An object updates per key (numeric keys address indices); an array
    /// updates per index. Entries applied before a failing one are kept.
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let parsed: serde_json::Value = serde_json::from_str(json)?;
        match parsed {
            serde_json::Value::Object(map) => {
                debug!(entries = map.len(), "merging JSON object");
                for (key, value) in map {
                    self.update(key, Value::from(value))?;
                }
                Ok(())
            }
            serde_json::Value::Array(items) => {
                debug!(entries = items.len(), "merging JSON array by index");
                for (index, value) in items.into_iter().enumerate() {
                    self.update(index, Value::from(value))?;
                }
                Ok(())
            }
            other => Err(Error::ParseError(format!(
                "expected a JSON object or array, found {}",
                Value::from(other).type_name()
            ))),
        }
    }

    /// Build a dictionary from a JSON object or array
    pub fn from_json(json: &str) -> Result<Self> {
        let mut dict = Self::new();
        dict.load_json(json)?;
        Ok(dict)
    }

    /// Encode entries, in order, as bytes
    ///
    /// Unlike JSON, the encoding keeps every variant exact (`Int` vs
    /// `Float`, resources).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Replace the contents with entries decoded from `bytes`
    ///
    /// Values and key order are rebuilt together. On failure the dictionary
    /// is left untouched. This dictionary's limits apply to the decoded
    /// entries.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let repr: DictionaryRepr = bincode::deserialize(bytes)?;
        let mut rebuilt = Self::with_limits(self.limits);
        rebuilt.fill(repr.entries)?;
        debug!(entries = rebuilt.len(), "replaced dictionary contents");
        *self = rebuilt;
        Ok(())
    }

    /// Decode a dictionary from bytes produced by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut dict = Self::new();
        dict.load_bytes(bytes)?;
        Ok(dict)
    }
}

/// Read a numeric key as an index, truncating any fraction
fn numeric_index(key: &str) -> i64 {
    let trimmed = key.trim();
    trimmed
        .parse::<i64>()
        .or_else(|_| trimmed.parse::<f64>().map(|f| f.trunc() as i64))
        .unwrap_or(i64::MAX)
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.entries == other.entries
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
// serde
// ============================================================================

/// Ordered wire form of a dictionary
#[derive(Serialize, Deserialize)]
struct DictionaryRepr {
    entries: Vec<(String, Value)>,
}

impl From<Dictionary> for DictionaryRepr {
    fn from(dict: Dictionary) -> Self {
        DictionaryRepr {
            entries: dict.into_iter().collect(),
        }
    }
}

impl TryFrom<DictionaryRepr> for Dictionary {
    type Error = Error;

    fn try_from(repr: DictionaryRepr) -> Result<Self> {
        Dictionary::from_entries(repr.entries)
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Borrowing iterator over `(key, value)` pairs in index order
pub struct Iter<'a> {
    keys: std::slice::Iter<'a, String>,
    entries: &'a FxHashMap<String, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.entries.get(key)?;
        Some((key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        let value = self.entries.get(key)?;
        Some((key.as_str(), value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Owning iterator over `(key, value)` pairs in index order
pub struct IntoIter {
    keys: std::vec::IntoIter<String>,
    entries: FxHashMap<String, Value>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.entries.remove(&key)?;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Dictionary {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            keys: self.keys.into_iter(),
            entries: self.entries,
        }
    }
}
