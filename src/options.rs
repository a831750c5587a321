//! Configuration options for parsing.
//!
//! The defaults accept everything the core grammar allows and keep escape
//! handling minimal. Both switches tighten or extend that behavior on request.
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{parse_with_options, ParseOptions, Value};
//!
//! let options = ParseOptions::new().with_unicode_escapes(true);
//! let root = parse_with_options(r#"s = "caf\u00e9""#, options).unwrap();
//! assert_eq!(root.get("s"), Some(&Value::from("café")));
//! ```

/// Configuration options for [`parse_with_options`](crate::parse_with_options).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject arrays whose elements are not all of the same value type.
    pub homogeneous_arrays: bool,
    /// Decode `\uXXXX` and `\UXXXXXXXX` escapes instead of keeping them verbatim.
    pub decode_unicode_escapes: bool,
}

impl ParseOptions {
    /// Creates default options: mixed arrays allowed, unicode escapes kept verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert!(!options.homogeneous_arrays);
    /// assert!(!options.decode_unicode_escapes);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject mixed-type arrays and decode unicode escapes.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            homogeneous_arrays: true,
            decode_unicode_escapes: true,
        }
    }

    /// Requires every array to hold values of a single type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::{parse_with_options, ErrorKind, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_homogeneous_arrays(true);
    /// let err = parse_with_options("a = [1, \"two\"]", options).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidValue);
    /// ```
    #[must_use]
    pub fn with_homogeneous_arrays(mut self, enabled: bool) -> Self {
        self.homogeneous_arrays = enabled;
        self
    }

    #[must_use]
    pub fn with_unicode_escapes(mut self, enabled: bool) -> Self {
        self.decode_unicode_escapes = enabled;
        self
    }
}
