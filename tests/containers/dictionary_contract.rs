//! Dictionary contract tests
//!
//! 1. add/get/exists and the duplicate and numeric key rules
//! 2. remove and index compaction
//! 3. update dispatch (fresh add, index redirect, in-place overwrite)
//! 4. Soft lookups and callbacks
//! 5. Bulk loading, atomic and not

use crate::common::{abc, assert_bijection, keys, record};
use collection::{Collection, Dictionary, Error, KeyError, Limits, UpdateOutcome, Value};

// ============================================================================
// Module 1: add / get / exists
// ============================================================================

#[test]
fn test_add_then_get_and_exists() {
    let samples: Vec<(&str, Value)> = vec![
        ("key1", Value::from("value one")),
        ("key2", Value::Int(2)),
        ("key3", Value::Array(vec![Value::from("one"), Value::Int(2)])),
        ("key4", record("nested", true)),
    ];

    let mut dict = Dictionary::new();
    for (key, value) in samples {
        let before = dict.len();
        dict.add(key, value.clone()).unwrap();
        assert_eq!(dict.get(key).unwrap(), &value);
        assert!(dict.exists(key));
        assert_eq!(dict.len(), before + 1);
    }
    assert_bijection(&dict);
}

#[test]
fn test_add_is_fluent() {
    let mut dict = Collection::new();
    dict.add("x", 1).unwrap().add("y", 2).unwrap().add("z", 3).unwrap();
    assert_eq!(keys(&dict), ["x", "y", "z"]);
}

#[test]
fn test_duplicate_add_leaves_container_unchanged() {
    let mut dict = abc();
    let before = dict.clone();

    let err = dict.add("a", 100).unwrap_err();

    assert_eq!(err, Error::DuplicateKey("a".to_string()));
    assert_eq!(dict, before);
    assert_eq!(dict.get("a").unwrap(), &Value::Int(1));
}

#[test]
fn test_numeric_keys_are_reserved() {
    let mut dict = Dictionary::new();
    for key in ["123", "0", "-1", "1.5", "1e3"] {
        let err = dict.add(key, "links").unwrap_err();
        assert_eq!(err, Error::InvalidKey(KeyError::Numeric(key.to_string())));
    }
    assert!(dict.is_empty());
}

#[test]
fn test_get_unknown_offset() {
    let dict = abc();
    assert!(matches!(dict.get("missing"), Err(Error::OffsetNotFound(_))));
    assert!(matches!(dict.get(3), Err(Error::OffsetNotFound(_))));
    assert!(matches!(dict.get(-1), Err(Error::OffsetNotFound(_))));
}

// ============================================================================
// Module 2: remove and compaction
// ============================================================================

#[test]
fn test_end_to_end_remove_middle() {
    let mut dict = Dictionary::new();
    dict.add("a", 1).unwrap();
    dict.add("b", 2).unwrap();
    dict.add("c", 3).unwrap();
    assert_eq!(keys(&dict), ["a", "b", "c"]);

    dict.remove("b").unwrap();

    assert_eq!(keys(&dict), ["a", "c"]);
    assert_eq!(dict.key_of(1), Some("c"));
    assert_eq!(dict.get(1).unwrap(), &Value::Int(3));
    assert_bijection(&dict);
}

#[test]
fn test_remove_shifts_every_later_index() {
    let mut dict = Dictionary::from_entries((0..10).map(|i| (format!("k{}", i), i))).unwrap();
    let before: Vec<_> = (0..10).map(|i| dict.index_of(&format!("k{}", i))).collect();

    dict.remove("k3").unwrap();

    assert!(!dict.exists("k3"));
    assert_eq!(dict.len(), 9);
    for i in 0..10 {
        let now = dict.index_of(&format!("k{}", i));
        match i {
            0..=2 => assert_eq!(now, before[i]),
            3 => assert_eq!(now, None),
            _ => assert_eq!(now, before[i].map(|idx| idx - 1)),
        }
    }
    assert_bijection(&dict);
}

#[test]
fn test_remove_counts() {
    let mut dict = Dictionary::from_entries(vec![
        ("keyOne", Value::from("value1")),
        ("keyTwo", Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])),
        ("keyThree", record("a", 1)),
    ])
    .unwrap();

    let before = dict.count();
    dict.remove("keyTwo").unwrap();

    assert!(!dict.to_map().contains_key("keyTwo"));
    assert_eq!(dict.count(), before - 1);
}

#[test]
fn test_remove_absent_key_fails() {
    let mut dict = abc();
    assert_eq!(
        dict.remove("nope").unwrap_err(),
        Error::KeyNotFound("nope".to_string())
    );
    assert_eq!(dict, abc());
}

#[test]
fn test_remove_everything_then_reuse() {
    let mut dict = abc();
    dict.remove("a").unwrap().remove("b").unwrap().remove("c").unwrap();
    assert!(dict.is_empty());
    dict.add("b", 9).unwrap();
    assert_eq!(dict.index_of("b"), Some(0));
}

// ============================================================================
// Module 3: update dispatch
// ============================================================================

#[test]
fn test_update_fresh_key_behaves_as_add() {
    let mut via_update = abc();
    let mut via_add = abc();

    assert_eq!(via_update.update("d", 4).unwrap(), UpdateOutcome::Inserted);
    via_add.add("d", 4).unwrap();

    assert_eq!(via_update, via_add);
}

#[test]
fn test_update_existing_key_keeps_order_and_size() {
    let mut dict = Dictionary::new();
    dict.add("keyValue", "value").unwrap();
    dict.add("other", 0).unwrap();

    dict.update("keyValue", "new value").unwrap();

    assert_eq!(dict.get("keyValue").unwrap(), &Value::from("new value"));
    assert_eq!(keys(&dict), ["keyValue", "other"]);
    assert_eq!(dict.len(), 2);
}

#[test]
fn test_update_by_live_index() {
    let mut dict = abc();
    assert_eq!(dict.update(1, "B").unwrap(), UpdateOutcome::Replaced);
    assert_eq!(dict.get("b").unwrap(), &Value::from("B"));
    assert_eq!(keys(&dict), ["a", "b", "c"]);
}

#[test]
fn test_update_by_dead_index() {
    let mut dict = abc();
    let err = dict.update(5, 0).unwrap_err();
    assert_eq!(err, Error::IndexOutOfRange { index: 5, len: 3 });
    assert_eq!(dict, abc());
}

#[test]
fn test_update_numeric_string_addresses_index() {
    let mut dict = abc();
    dict.update("2", 33).unwrap();
    assert_eq!(dict.get("c").unwrap(), &Value::Int(33));
    assert!(!dict.exists("2"));
}

#[test]
fn test_update_after_remove_uses_compacted_index() {
    let mut dict = abc();
    dict.remove("a").unwrap();
    dict.update(0, "first").unwrap();
    assert_eq!(dict.get("b").unwrap(), &Value::from("first"));
}

// ============================================================================
// Module 4: soft lookups and callbacks
// ============================================================================

#[test]
fn test_soft_lookups_never_fail() {
    let dict = Dictionary::new();
    assert_eq!(dict.index_of("x"), None);
    assert_eq!(dict.key_of(0), None);
    assert!(dict.find(|_, _| true).is_none());
}

#[test]
fn test_key_of_index_of_roundtrip() {
    let dict = abc();
    for key in ["a", "b", "c"] {
        let index = dict.index_of(key).unwrap();
        assert_eq!(dict.key_of(index), Some(key));
    }
}

#[test]
fn test_each_returns_callback_results_in_order() {
    let dict = abc();
    let results = dict.each(|key, value| (key.to_uppercase(), value.as_int().unwrap() * 10));
    assert_eq!(
        results,
        vec![
            ("A".to_string(), 10),
            ("B".to_string(), 20),
            ("C".to_string(), 30)
        ]
    );
}

#[test]
fn test_each_on_empty() {
    let dict = Dictionary::new();
    let results: Vec<()> = dict.each(|_, _| ());
    assert!(results.is_empty());
}

#[test]
fn test_find_scans_in_insertion_order() {
    let mut dict = Dictionary::new();
    dict.fill(vec![("z", 5), ("y", 5), ("x", 6)]).unwrap();

    let mut visited = Vec::new();
    let found = dict.find(|key, value| {
        visited.push(key.to_string());
        value == &Value::Int(5)
    });

    assert_eq!(found, Some(&Value::Int(5)));
    assert_eq!(visited, ["z"]);
}

#[test]
fn test_for_loop_iteration_is_restartable() {
    let dict = abc();
    let mut first = Vec::new();
    for (key, _) in &dict {
        first.push(key);
    }
    let second: Vec<_> = dict.iter().map(|(k, _)| k).collect();
    assert_eq!(first, second);
}

// ============================================================================
// Module 5: bulk loading
// ============================================================================

#[test]
fn test_from_entries_rejects_numeric_key() {
    let result = Dictionary::from_entries(vec![(
        "123",
        Value::Array(vec![Value::from("http://jquery.com")]),
    )]);
    assert!(matches!(result, Err(Error::InvalidKey(_))));
}

#[test]
fn test_fill_keeps_entries_before_failure() {
    let mut dict = Dictionary::new();
    let result = dict.fill(vec![("one", 1), ("two", 2), ("one", 3), ("four", 4)]);

    assert_eq!(result.unwrap_err(), Error::DuplicateKey("one".to_string()));
    assert_eq!(keys(&dict), ["one", "two"]);
    assert_bijection(&dict);
}

#[test]
fn test_fill_atomic_is_all_or_nothing() {
    let mut dict = abc();
    let result = dict.fill_atomic(vec![("d", 4), ("5", 5)]);

    assert!(matches!(result, Err(Error::InvalidKey(KeyError::Numeric(_)))));
    assert_eq!(dict, abc());

    dict.fill_atomic(vec![("d", 4), ("e", 5)]).unwrap();
    assert_eq!(keys(&dict), ["a", "b", "c", "d", "e"]);
}

#[test]
fn test_clear_resets_keys_and_values() {
    let mut dict = abc();
    dict.clear();
    assert_eq!(dict.count(), 0);
    assert!(dict.get_offsets().is_empty());
    assert!(dict.get_all().is_empty());
}

#[test]
fn test_key_length_limit() {
    let mut dict = Dictionary::with_limits(Limits::with_small_limits());
    let long = "k".repeat(17);
    assert!(matches!(
        dict.add(long.as_str(), 1),
        Err(Error::InvalidKey(KeyError::TooLong { .. }))
    ));
    assert!(matches!(
        dict.update(long, 1),
        Err(Error::InvalidKey(KeyError::TooLong { .. }))
    ));
    assert!(dict.is_empty());
}
