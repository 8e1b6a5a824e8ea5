//! # serde_toml_lite
//!
//! A small TOML parser and stringifier built from parser combinators, with a
//! Serde bridge on top.
//!
//! ## Key Features
//!
//! - **Combinator grammar**: every construct is a small function over a
//!   character cursor, composed with `or`, `join`, `repeat` and friends
//! - **Ordered tables**: keys keep their document order through
//!   [`parse`] and [`stringify`]
//! - **Positioned errors**: failures report a 1-based line and column
//! - **Serde compatible**: [`from_str`] and [`to_string`] work with any
//!   `#[derive(Serialize, Deserialize)]` type
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_toml_lite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Package {
//!     name: String,
//!     version: u32,
//!     keywords: Vec<String>,
//! }
//!
//! let package = Package {
//!     name: "demo".to_string(),
//!     version: 3,
//!     keywords: vec!["toml".to_string()],
//! };
//!
//! let text = to_string(&package).unwrap();
//! assert_eq!(text, "name = \"demo\"\nversion = 3\nkeywords = [\"toml\"]\n");
//!
//! let back: Package = from_str(&text).unwrap();
//! assert_eq!(package, back);
//! ```
//!
//! ### Working with the value tree
//!
//! ```rust
//! use serde_toml_lite::{parse, stringify, TomlOptions, TomlValue};
//!
//! let doc = parse(r#"
//! [[bin]]
//! name = "deno"
//!
//! [[bin]]
//! name = "deno_core"
//! "#).unwrap();
//!
//! let bins = doc.get("bin").and_then(TomlValue::as_array).unwrap();
//! assert_eq!(bins.len(), 2);
//!
//! let text = stringify(&doc, &TomlOptions::new());
//! assert_eq!(parse(&text).unwrap(), doc);
//! ```
//!
//! ## Data model
//!
//! | TOML | [`TomlValue`] |
//! |---|---|
//! | strings, radix integers (`0xff`) | `String` |
//! | integers, floats, `inf`, `nan` | `Number` |
//! | `true` / `false` | `Bool` |
//! | offset or local date-times, dates | `Datetime` (UTC) |
//! | local times | `LocalTime` |
//! | arrays | `Array` |
//! | tables, inline tables | `Table` |
//!
//! ## Logging
//!
//! Parsing and stringifying emit [`tracing`] events at `debug` and `trace`
//! level. The crate installs no subscriber.

mod combinator;
pub mod de;
pub mod error;
mod grammar;
pub mod macros;
pub mod map;
pub mod options;
mod parser;
mod scanner;
pub mod ser;
mod token;
pub mod value;

pub use de::{from_value, Deserializer};
pub use error::{Error, Result};
pub use map::TomlMap;
pub use options::TomlOptions;
pub use parser::parse;
pub use ser::{stringify, TomlValueSerializer};
pub use value::{Number, TomlValue};

use serde::{Deserialize, Serialize};
use std::io;

/// Convert any `T: Serialize` to a [`TomlValue`].
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{to_value, TomlValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns an error if the value has no TOML representation, including a
/// top-level `None` or `()`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<TomlValue>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(TomlValueSerializer)?
        .ok_or_else(|| Error::unsupported_type("missing value at the top level"))
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize to a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, TomlOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{to_string_with_options, TomlOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Limits { min: i32, maximum: i32 }
///
/// let text = to_string_with_options(&Limits { min: 1, maximum: 9 }, TomlOptions::aligned()).unwrap();
/// assert_eq!(text, "min     = 1\nmaximum = 9\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not serialize to a table.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: TomlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        TomlValue::Table(table) => Ok(stringify(&table, &options)),
        other => Err(Error::unsupported_type(&format!(
            "{} at the top level, expected a table",
            other.type_str()
        ))),
    }
}

/// Serialize any `T: Serialize` to a writer in TOML format.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, TomlOptions::default())
}

/// Serialize any `T: Serialize` to a writer in TOML format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: TomlOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of TOML text.
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
/// Returns an error if the input is not valid TOML or cannot be deserialized
/// to type `T`. Parse errors carry line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(Deserializer::from_str(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream of TOML.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// TOML, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of TOML text.
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
/// let point: Point = from_slice(b"x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOML, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

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
        home: Option<Point>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Some(Point { x: 1, y: 2 }),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let text = to_string(&user).unwrap();
        assert_eq!(
            text,
            "id = 123\nname = \"Alice\"\nactive = true\ntags = [\"admin\", \"user\"]\n\n[home]\nx = 1\ny = 2\n"
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_none_field_is_omitted() {
        let user = User { home: None, ..alice() };
        let text = to_string(&user).unwrap();
        assert!(!text.contains("home"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_aligned_output_round_trips() {
        let user = alice();
        let text = to_string_with_options(&user, TomlOptions::aligned()).unwrap();
        assert!(text.starts_with("id     = 123\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let TomlValue::Table(table) = value else {
            panic!("Expected table");
        };
        assert_eq!(table.get("x"), Some(&TomlValue::Number(Number::Integer(1))));
        assert_eq!(table.get("y"), Some(&TomlValue::Number(Number::Integer(2))));
    }

    #[test]
    fn test_top_level_must_be_table() {
        assert!(to_string(&vec![1, 2, 3]).is_err());
        assert!(to_string(&42).is_err());
        assert!(to_value(&None::<i32>).is_err());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(matches!(result, Err(Error::Custom(_))));
    }

    #[test]
    fn test_parse_error_surfaces_through_from_str() {
        let result: Result<Point> = from_str("x = 1\ny = [");
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }
}
