//! Recursive-descent TOML parser.
//!
//! The document is read as a flat sequence of line-terminated constructs:
//! comments, `key = value` assignments, `[table]` headers and `[[array]]`
//! headers. Assignments land in the table opened by the most recent header,
//! or in the root table before any header.
//!
//! Most users should go through [`parse`](crate::parse):
//!
//! ```rust
//! use serde_toml_lite::{parse, Value};
//!
//! let root = parse("[[x]]\na = 1\n[[x]]\na = 2").unwrap();
//! let x = root.get("x").unwrap();
//! assert_eq!(x.get_index(0).and_then(|t| t.get("a")), Some(&Value::Integer(1)));
//! assert_eq!(x.get_index(1).and_then(|t| t.get("a")), Some(&Value::Integer(2)));
//! ```

use crate::cursor::ParseCursor;
use crate::error::Position;
use crate::{Error, ParseOptions, Result, TomlMap, Value};
use indexmap::map::Entry;

/// One segment of a key path, with where it was written.
#[derive(Debug, Clone)]
struct Key {
    name: String,
    position: Position,
}

/// Arrays and inline tables nested deeper than this are rejected.
const MAX_NESTING: usize = 128;

/// The TOML parser. Created per buffer and consumed by [`Parser::parse`].
pub struct Parser<'a> {
    cursor: ParseCursor<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            cursor: ParseCursor::new(input),
            options,
            depth: 0,
        }
    }

    /// Parses the whole buffer into a root table.
    ///
    /// Stops at the first error; no partial tree is ever returned.
    pub fn parse(mut self) -> Result<Value> {
        tracing::debug!(bytes = self.cursor.rest().len(), "parsing document");
        let result = self.parse_document();
        match &result {
            Ok(Value::Table(root)) => tracing::debug!(keys = root.len(), "parsed document"),
            Ok(_) => {}
            Err(err) => tracing::debug!(error = %err, "parse failed"),
        }
        result
    }

    fn parse_document(&mut self) -> Result<Value> {
        let mut root = TomlMap::new();
        let mut current: Vec<Key> = Vec::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek_char() {
                None => break,
                Some('#') => self.cursor.skip_comment(),
                Some('[') => current = self.parse_header(&mut root)?,
                Some(_) if self.cursor.at_newline() => {}
                Some(_) => {
                    let table = descend(&mut root, &current, true)?;
                    self.parse_assignment(table)?;
                }
            }
            self.end_of_line()?;
        }

        Ok(Value::Table(root))
    }

    /// Requires the rest of the line to be blank or a comment, then consumes
    /// the line ending.
    fn end_of_line(&mut self) -> Result<()> {
        self.cursor.skip_whitespace();
        self.cursor.skip_comment();
        if self.cursor.at_end() || self.cursor.eat_newline() {
            Ok(())
        } else {
            Err(self.cursor.unexpected("end of line"))
        }
    }

    /// Parses `[a.b]` or `[[a.b]]` and returns the path of the table that
    /// following assignments belong to.
    fn parse_header(&mut self, root: &mut TomlMap) -> Result<Vec<Key>> {
        self.cursor.next_char();
        let is_array = self.cursor.eat("[");
        let keys = self.parse_key_path()?;
        if !self.cursor.eat("]") {
            return Err(self.cursor.unexpected("`]` to close the table header"));
        }
        if is_array && !self.cursor.eat("]") {
            return Err(self.cursor.unexpected("`]]` to close the array-of-tables header"));
        }

        let Some((last, parents)) = keys.split_last() else {
            return Err(self.cursor.syntax_error("empty table header"));
        };
        let parent = descend(root, parents, true)?;
        match parent.entry(last.name.clone()) {
            Entry::Vacant(slot) => {
                let table = Value::Table(TomlMap::new());
                slot.insert(if is_array {
                    Value::Array(vec![table])
                } else {
                    table
                });
            }
            Entry::Occupied(mut slot) => match (is_array, slot.get_mut()) {
                (false, Value::Table(_)) => {}
                (true, Value::Array(items)) => items.push(Value::Table(TomlMap::new())),
                _ => return Err(Error::duplicate_key(last.position, &last.name)),
            },
        }

        tracing::trace!(path = %dotted(&keys), array = is_array, "table header");
        Ok(keys)
    }

    fn parse_assignment(&mut self, table: &mut TomlMap) -> Result<()> {
        let position = self.cursor.position();
        let keys = self.parse_key_path()?;
        if !self.cursor.eat("=") {
            return Err(self.cursor.unexpected("`=` after key"));
        }
        self.cursor.skip_whitespace();
        let value = self.parse_value()?;
        insert_dotted(table, &keys, value, position)
    }

    fn parse_key_path(&mut self) -> Result<Vec<Key>> {
        let mut keys = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            keys.push(self.parse_simple_key()?);
            self.cursor.skip_whitespace();
            if !self.cursor.eat(".") {
                return Ok(keys);
            }
        }
    }

    fn parse_simple_key(&mut self) -> Result<Key> {
        let position = self.cursor.position();
        let name = match self.cursor.peek_char() {
            Some('"') => {
                self.cursor.next_char();
                self.parse_basic_string_body(position)?
            }
            Some('\'') => {
                self.cursor.next_char();
                self.parse_literal_string_body(position)?
            }
            _ => {
                let bare = self.cursor.take_while(is_bare_key_char);
                if bare.is_empty() {
                    return Err(self.cursor.unexpected("a key"));
                }
                bare.to_string()
            }
        };
        Ok(Key { name, position })
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.cursor.peek_char() {
            Some('"') => self.parse_basic_string().map(Value::String),
            Some('\'') => self.parse_literal_string().map(Value::String),
            Some('t') | Some('f') => self.parse_bool(),
            Some('i') | Some('n') => self.parse_special_float(),
            Some('[') => self.nested(Self::parse_array),
            Some('{') => self.nested(Self::parse_inline_table),
            Some(ch) if ch.is_ascii_digit() || ch == '+' || ch == '-' => self.parse_number(),
            _ => Err(self.cursor.unexpected("a value")),
        }
    }

    fn parse_basic_string(&mut self) -> Result<String> {
        let open = self.cursor.position();
        if self.cursor.eat("\"\"\"") {
            return self.parse_multiline_string('"', open);
        }
        self.cursor.next_char();
        self.parse_basic_string_body(open)
    }

    fn parse_literal_string(&mut self) -> Result<String> {
        let open = self.cursor.position();
        if self.cursor.eat("'''") {
            return self.parse_multiline_string('\'', open);
        }
        self.cursor.next_char();
        self.parse_literal_string_body(open)
    }

    /// Reads a single-line basic string; the opening quote is already consumed.
    fn parse_basic_string_body(&mut self, open: Position) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.cursor.next_char() {
                Some('"') => return Ok(result),
                Some('\\') => self.parse_escape(&mut result, open)?,
                Some('\n') | None => {
                    return Err(Error::syntax(open, "unterminated string"));
                }
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Reads a single-line literal string; the opening quote is already consumed.
    fn parse_literal_string_body(&mut self, open: Position) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.cursor.next_char() {
                Some('\'') => return Ok(result),
                Some('\n') | None => {
                    return Err(Error::syntax(open, "unterminated literal string"));
                }
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Reads a `"""` or `'''` string; the opening delimiter is already consumed.
    fn parse_multiline_string(&mut self, quote: char, open: Position) -> Result<String> {
        let delimiter = if quote == '"' { "\"\"\"" } else { "'''" };
        let single = &delimiter[..1];
        self.cursor.eat_newline();

        let mut result = String::new();
        loop {
            if self.cursor.eat(delimiter) {
                // A run of four or five quotes ends with one or two quotes of content.
                for _ in 0..2 {
                    if !self.cursor.eat(single) {
                        break;
                    }
                    result.push(quote);
                }
                return Ok(result);
            }
            match self.cursor.next_char() {
                None => return Err(Error::syntax(open, "unterminated multi-line string")),
                Some('\\') if quote == '"' => {
                    if self.at_line_ending_backslash() {
                        self.cursor.take_while(char::is_whitespace);
                    } else {
                        self.parse_escape(&mut result, open)?;
                    }
                }
                Some(ch) => result.push(ch),
            }
        }
    }

    fn at_line_ending_backslash(&self) -> bool {
        let rest = self
            .cursor
            .rest()
            .trim_start_matches(|ch| ch == ' ' || ch == '\t');
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }

    /// Handles the character after a backslash in a basic string.
    fn parse_escape(&mut self, out: &mut String, open: Position) -> Result<()> {
        let position = self.cursor.position();
        match self.cursor.next_char() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(marker @ ('u' | 'U')) => {
                if self.options.decode_unicode_escapes {
                    let width = if marker == 'u' { 4 } else { 8 };
                    out.push(self.parse_unicode_escape(width, position)?);
                } else {
                    // Kept verbatim; the hex digits follow as ordinary characters.
                    out.push('\\');
                    out.push(marker);
                }
            }
            Some(other) => {
                return Err(Error::syntax(
                    position,
                    &format!("invalid escape sequence `\\{}`", other.escape_debug()),
                ));
            }
            None => return Err(Error::syntax(open, "unterminated string")),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self, width: usize, position: Position) -> Result<char> {
        let mut taken = 0;
        let digits = self.cursor.take_while(|ch| {
            let accept = taken < width && ch.is_ascii_hexdigit();
            if accept {
                taken += 1;
            }
            accept
        });
        if digits.len() != width {
            return Err(Error::syntax(
                position,
                &format!("unicode escape needs {} hex digits", width),
            ));
        }
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                Error::syntax(
                    position,
                    &format!("`{}` is not a unicode scalar value", digits),
                )
            })
    }

    fn parse_bool(&mut self) -> Result<Value> {
        let position = self.cursor.position();
        let word = self
            .cursor
            .take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        match word {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(Error::invalid_value_at(
                position,
                &format!("expected `true` or `false`, found `{}`", word),
            )),
        }
    }

    fn parse_special_float(&mut self) -> Result<Value> {
        let position = self.cursor.position();
        match self.cursor.take_while(|ch| ch.is_ascii_alphanumeric()) {
            "inf" => Ok(Value::Float(f64::INFINITY)),
            "nan" => Ok(Value::Float(f64::NAN)),
            word => Err(Error::syntax(
                position,
                &format!("unrecognized value `{}`", word),
            )),
        }
    }

    /// Runs a container parser one level deeper, bounding recursion.
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= MAX_NESTING {
            return Err(self.cursor.syntax_error(&format!(
                "values nested deeper than {} levels",
                MAX_NESTING
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Numbers and datetimes share a lead character, so both are scanned as
    /// one lexeme and told apart afterwards.
    fn parse_number(&mut self) -> Result<Value> {
        let position = self.cursor.position();
        let mut lexeme = self.cursor.take_while(is_number_char).to_string();

        // `1979-05-27 07:32:00` separates date and time with a single space.
        if lexeme.len() == 10
            && is_date_prefix(&lexeme)
            && self.cursor.peek_char() == Some(' ')
            && self.cursor.peek_nth(1).is_some_and(|ch| ch.is_ascii_digit())
        {
            self.cursor.next_char();
            lexeme.push(' ');
            lexeme.push_str(self.cursor.take_while(is_number_char));
        }

        number_from_lexeme(&lexeme).map_err(|msg| Error::invalid_value_at(position, &msg))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.next_char();
        let mut items: Vec<Value> = Vec::new();
        loop {
            self.skip_array_filler();
            if self.cursor.eat("]") {
                break;
            }

            let position = self.cursor.position();
            let item = self.parse_value()?;
            if self.options.homogeneous_arrays {
                if let Some(first) = items.first() {
                    if first.type_str() != item.type_str() {
                        return Err(Error::invalid_value_at(
                            position,
                            &format!(
                                "mixed array: expected {}, found {}",
                                first.type_str(),
                                item.type_str()
                            ),
                        ));
                    }
                }
            }
            items.push(item);

            self.skip_array_filler();
            if self.cursor.eat(",") {
                continue;
            }
            if self.cursor.eat("]") {
                break;
            }
            return Err(self.cursor.unexpected("`,` or `]` in array"));
        }
        Ok(Value::Array(items))
    }

    /// Arrays may span lines, so newlines and comments are skipped between
    /// elements.
    fn skip_array_filler(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            self.cursor.skip_comment();
            if !self.cursor.eat_newline() {
                break;
            }
        }
    }

    fn parse_inline_table(&mut self) -> Result<Value> {
        self.cursor.next_char();
        let mut table = TomlMap::new();
        self.cursor.skip_whitespace();
        if self.cursor.eat("}") {
            return Ok(Value::Table(table));
        }

        loop {
            let position = self.cursor.position();
            let keys = self.parse_key_path()?;
            if !self.cursor.eat("=") {
                return Err(self.cursor.unexpected("`=` after key"));
            }
            self.cursor.skip_whitespace();
            let value = self.parse_value()?;
            insert_dotted(&mut table, &keys, value, position)?;

            self.cursor.skip_whitespace();
            if self.cursor.eat(",") {
                continue;
            }
            if self.cursor.eat("}") {
                break;
            }
            return Err(self.cursor.unexpected("`,` or `}` in inline table"));
        }
        Ok(Value::Table(table))
    }
}

/// Walks `keys` from `table`, creating missing tables on the way.
///
/// With `through_arrays`, an array of tables is entered through its last
/// element, which is how headers and table bodies address `[[x]]` entries.
fn descend<'t>(
    mut table: &'t mut TomlMap,
    keys: &[Key],
    through_arrays: bool,
) -> Result<&'t mut TomlMap> {
    for key in keys {
        let slot = table
            .entry(key.name.clone())
            .or_insert_with(|| Value::Table(TomlMap::new()));
        table = match slot {
            Value::Table(inner) => inner,
            Value::Array(items) if through_arrays => match items.last_mut() {
                Some(Value::Table(inner)) => inner,
                _ => return Err(Error::duplicate_key(key.position, &key.name)),
            },
            _ => return Err(Error::duplicate_key(key.position, &key.name)),
        };
    }
    Ok(table)
}

/// Assigns `value` at the dotted path `keys`; `at` locates the assignment
/// when the path is empty.
fn insert_dotted(table: &mut TomlMap, keys: &[Key], value: Value, at: Position) -> Result<()> {
    let Some((last, parents)) = keys.split_last() else {
        return Err(Error::syntax(at, "empty key"));
    };
    let parent = descend(table, parents, false)?;
    match parent.entry(last.name.clone()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(_) => Err(Error::duplicate_key(last.position, &last.name)),
    }
}

fn dotted(keys: &[Key]) -> String {
    keys.iter()
        .map(|key| key.name.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

fn is_bare_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-' | ':')
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// `dddd-dd-dd` at the start of the lexeme.
fn is_date_prefix(lexeme: &str) -> bool {
    let bytes = lexeme.as_bytes();
    bytes.len() >= 10
        && all_digits(&bytes[..4])
        && bytes[4] == b'-'
        && all_digits(&bytes[5..7])
        && bytes[7] == b'-'
        && all_digits(&bytes[8..10])
}

/// `dd:dd:dd` at the start of `bytes`. Fractions and offsets that follow are
/// left to [`Value::parse_datetime`].
fn is_time_prefix(bytes: &[u8]) -> bool {
    bytes.len() >= 8
        && all_digits(&bytes[..2])
        && bytes[2] == b':'
        && all_digits(&bytes[3..5])
        && bytes[5] == b':'
        && all_digits(&bytes[6..8])
}

/// A full date, optionally followed by `T`, `t` or a space and a time, or a
/// bare time.
fn is_datetime(lexeme: &str) -> bool {
    if !is_date_prefix(lexeme) {
        return is_time_prefix(lexeme.as_bytes());
    }
    let bytes = lexeme.as_bytes();
    match bytes.get(10) {
        None => true,
        Some(b'T' | b't' | b' ') => is_time_prefix(&bytes[11..]),
        Some(_) => false,
    }
}

/// Classifies a scanned lexeme as a datetime, integer or float.
///
/// Integer versus float is decided by the presence of `.`, `e` or `E`;
/// anything that then fails to convert is reported as an invalid value.
fn number_from_lexeme(lexeme: &str) -> std::result::Result<Value, String> {
    if is_datetime(lexeme) {
        return Ok(Value::Datetime(lexeme.to_string()));
    }

    match lexeme {
        "+inf" | "inf" => return Ok(Value::Float(f64::INFINITY)),
        "-inf" => return Ok(Value::Float(f64::NEG_INFINITY)),
        "+nan" | "-nan" | "nan" => return Ok(Value::Float(f64::NAN)),
        _ => {}
    }

    let invalid = || format!("invalid number `{}`", lexeme);

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lexeme.strip_prefix(prefix) {
            let digits = strip_underscores(digits, radix).ok_or_else(invalid)?;
            return i64::from_str_radix(&digits, radix)
                .map(Value::Integer)
                .map_err(|_| invalid());
        }
    }

    let cleaned = strip_underscores(lexeme, 10).ok_or_else(invalid)?;
    if lexeme.contains(|ch| matches!(ch, '.' | 'e' | 'E')) {
        cleaned
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid())
    } else {
        cleaned
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| invalid())
    }
}

/// Removes `_` digit separators; each must sit between two digits of `radix`.
fn strip_underscores(text: &str, radix: u32) -> Option<String> {
    let is_digit = |c: u8| char::from(c).is_digit(radix);
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            if !before.is_some_and(is_digit) || !after.is_some_and(is_digit) {
                return None;
            }
        }
    }
    Some(text.replace('_', ""))
}
