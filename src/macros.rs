/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Objects become tables with keys in the order written, arrays become
/// arrays, and any other token is converted through [`to_value`](crate::to_value).
/// Values with no TOML form (such as `None`) collapse to an empty table.
///
/// ```rust
/// use serde_toml_lite::{toml, Value};
///
/// let value = toml!({
///     "name": "svc",
///     "ports": [80, 443],
///     "tls": { "enabled": true }
/// });
/// assert_eq!(value.get("ports").and_then(|p| p.get_index(1)), Some(&Value::Integer(443)));
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Table($crate::TomlMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::TomlMap::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or_default()
    }};
}

#[cfg(test)]
mod tests {
    use crate::{TomlMap, Value};

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(true), Value::Boolean(true));
        assert_eq!(toml!(42), Value::Integer(42));
        assert_eq!(toml!(3.5), Value::Float(3.5));
        assert_eq!(toml!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_toml_macro_nested() {
        let value = toml!({
            "a": [1, [2, 3]],
            "b": {},
            "c": { "d": false }
        });
        let keys: Vec<&String> = value.as_table().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(
            value.get("a").and_then(|a| a.get_index(1)),
            Some(&Value::Array(vec![Value::Integer(2), Value::Integer(3)]))
        );
        assert_eq!(value.get("b"), Some(&Value::Table(TomlMap::new())));
        assert_eq!(
            value.get("c").and_then(|c| c.get("d")),
            Some(&Value::Boolean(false))
        );
    }

    #[test]
    fn test_toml_macro_expression_fallback() {
        let port: u16 = 8080;
        assert_eq!(toml!(port), Value::Integer(8080));
        let missing: Option<i32> = None;
        assert_eq!(toml!(missing), Value::default());
    }
}
