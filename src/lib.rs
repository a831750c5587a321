//! # serde_toml_lite
//!
//! A small TOML parser that turns configuration text into an ordered
//! [`Value`] tree, with Serde and JSON bridges on top.
//!
//! ## Key Features
//!
//! - **Ordered Tables**: keys keep their insertion order, backed by `indexmap`
//! - **Positioned Errors**: every parse error carries byte offset, line and column
//! - **Serde Compatible**: read config straight into `#[derive(Deserialize)]` types
//! - **JSON Bridge**: convert to and from `serde_json::Value`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_toml_lite::{parse, Value};
//!
//! let root = parse(r#"
//! title = "demo"
//!
//! [server]
//! host = "localhost"
//! ports = [8080, 8081]
//!
//! [[user]]
//! name = "ada"
//! "#).unwrap();
//!
//! assert_eq!(root.get("title").and_then(Value::as_str), Some("demo"));
//! let server = root.get("server").unwrap();
//! assert_eq!(server.get("ports").and_then(|p| p.get_index(1)), Some(&Value::Integer(8081)));
//! let first_user = root.get("user").and_then(|u| u.get_index(0)).unwrap();
//! assert_eq!(first_user.get("name"), Some(&Value::from("ada")));
//! ```
//!
//! ### Typed Configuration
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_toml_lite::from_str;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Config {
//!     server: Server,
//! }
//!
//! let config: Config = from_str("[server]\nhost = \"localhost\"\nport = 8080").unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```
//!
//! ## Supported Syntax
//!
//! Comments, `key = value` assignments, dotted keys, `[table]` and
//! `[[array.of.tables]]` headers, inline tables, arrays, basic, literal and
//! multi-line strings, integers (with `0x`/`0o`/`0b` prefixes and `_`
//! separators), floats including `inf`/`nan`, booleans and datetimes.
//! Datetimes are kept as their source text; see [`Value::parse_datetime`].
//!
//! Writing goes the other way only in a lossy, flat form: see
//! [`Value::to_toml_string`].

mod cursor;
pub mod de;
pub mod encoding;
pub mod error;
pub mod json;
pub mod macros;
pub mod map;
pub mod options;
pub mod parser;
pub mod ser;
pub mod value;

pub use encoding::Encoding;
pub use error::{Error, ErrorKind, Position, Result};
pub use json::{from_json, to_json};
pub use map::TomlMap;
pub use options::ParseOptions;
pub use parser::Parser;
pub use ser::ValueSerializer;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::Path;

/// Parses TOML text into its root table.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{parse, Value};
///
/// let root = parse("a.b = 1").unwrap();
/// assert_eq!(root.get("a").and_then(|a| a.get("b")), Some(&Value::Integer(1)));
/// ```
///
/// # Errors
///
/// Returns a positioned [`Error`] for malformed syntax, invalid literals and
/// duplicate keys. Parsing stops at the first error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Value> {
    Parser::new(input).parse()
}

/// Parses TOML text with custom [`ParseOptions`].
///
/// # Errors
///
/// Same as [`parse`], plus the checks the options enable.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Value> {
    Parser::with_options(input, options).parse()
}

/// Deserialize an instance of type `T` from TOML text.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns a parse error, or [`Error::MissingKey`] and
/// [`Error::InvalidValue`] when the tree does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse(s)?)
}

/// Deserialize an instance of type `T` from TOML bytes.
///
/// A leading byte-order mark selects UTF-8, UTF-16 or UTF-32 decoding;
/// without one the bytes must be UTF-8.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"\xEF\xBB\xBFx = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns [`Error::Encoding`] for undecodable bytes, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let (text, _) = encoding::decode(v)?;
    from_str(&text)
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`from_slice`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice(&bytes)
}

/// Reads and parses a TOML file into its root table.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, [`Error::Encoding`] if
/// its bytes cannot be decoded, otherwise as [`parse`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(&format!("{}: {}", path.display(), e)))?;
    let (text, encoding) = encoding::decode(&bytes)?;
    tracing::debug!(path = %path.display(), ?encoding, bytes = bytes.len(), "loading TOML file");
    parse(&text)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.get("y"), Some(&Value::Integer(2)));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] for null at the root or inside arrays,
/// non-string map keys and integers outside the `i64` range.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::invalid_value("TOML has no null value"))
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Errors
///
/// Returns an error if the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to flat TOML-like text.
///
/// # Errors
///
/// Same as [`to_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_value(value)?.to_toml_string())
}

/// Serialize any `T: Serialize` to a writer as flat TOML-like text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::io::Cursor;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, "x = 1\ny = 2\n");
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let text = to_string(&user).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_missing_field_is_missing_key() {
        let err = from_str::<Point>("x = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingKey);
    }

    #[test]
    fn test_from_reader_and_writer() {
        let point: Point = from_reader(Cursor::new(b"x = 3\ny = 4".to_vec())).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "x = 3\ny = 4\n");
    }

    #[test]
    fn test_from_slice_rejects_bad_utf8() {
        let err = from_slice::<Point>(b"x = \xFF").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = from_path("/definitely/not/here.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("serde_toml_lite_{}.toml", std::process::id()));
        std::fs::write(&path, "[app]\nname = \"demo\"\n").unwrap();
        let root = from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            root.get("app").and_then(|a| a.get("name")),
            Some(&Value::from("demo"))
        );
    }
}
