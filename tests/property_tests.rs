//! Property-based tests for the parser and the flat writer.
//!
//! The writer is lossy, so the round-trip properties are limited to flat
//! tables of scalars, where re-parsing must reproduce the same key set.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_toml_lite::{from_str, parse, to_string, TomlMap, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z_][A-Za-z0-9_-]{0,12}",
        "[a-z ]{1,8}\\.[a-z]{1,4}",
    ]
}

/// Strings without backslashes or newlines: the writer only escapes `"`.
fn plain_string() -> impl Strategy<Value = String> {
    "[^\\\\\n\r]{0,24}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        plain_string().prop_map(Value::String),
        any::<i64>().prop_map(Value::Integer),
        (-1.0e12f64..1.0e12).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
    ]
}

proptest! {
    #[test]
    fn prop_i64(n in any::<i64>()) {
        let wrapped = Wrapper { value: n };
        prop_assert!(roundtrip(&wrapped));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        let wrapped = Wrapper { value: b };
        prop_assert!(roundtrip(&wrapped));
    }

    #[test]
    fn prop_string(s in plain_string()) {
        let wrapped = Wrapper { value: s };
        prop_assert!(roundtrip(&wrapped));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        let wrapped = Wrapper { value: v };
        prop_assert!(roundtrip(&wrapped));
    }

    #[test]
    fn prop_option_field(opt in proptest::option::of(any::<i32>())) {
        let wrapped = Wrapper { value: opt };
        prop_assert!(roundtrip(&wrapped));
    }

    #[test]
    fn prop_flat_table_reparses_to_same_pairs(
        entries in prop::collection::vec((key(), scalar()), 0..12)
    ) {
        let mut table = TomlMap::new();
        for (k, v) in entries {
            table.insert(k, v);
        }
        let original = Value::Table(table);
        let text = original.to_toml_string();
        let reparsed = parse(&text).map_err(|e| TestCaseError::fail(format!("{}\n{}", e, text)))?;
        prop_assert_eq!(reparsed, original);
    }

    #[test]
    fn prop_integer_literals(n in any::<i64>()) {
        let root = parse(&format!("n = {}", n)).unwrap();
        prop_assert_eq!(root.get("n"), Some(&Value::Integer(n)));
    }

    #[test]
    fn prop_parser_never_panics(input in "[ -~\n]{0,64}") {
        let _ = parse(&input);
    }
}
