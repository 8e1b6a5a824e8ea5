//! TOML serialization.
//!
//! Two halves live here:
//!
//! - [`stringify`] turns a [`TomlMap`] into TOML text
//! - [`TomlValueSerializer`] turns any `T: Serialize` into a [`TomlValue`]
//!
//! ## Layout of the output
//!
//! Within every table, keys whose values fit on one line (scalars and arrays
//! that are not arrays of tables) are written first as `key = value`. Nested
//! tables follow as `[path]` sections and arrays of tables as one `[[path]]`
//! section per element. Arrays mixing tables with other values, and arrays of
//! arrays, are written inline.
//!
//! ```rust
//! use serde_toml_lite::{parse, stringify, TomlOptions};
//!
//! let doc = parse("[server]\nhost = 'localhost'\n\n[[bin]]\nname = 'a'").unwrap();
//! let text = stringify(&doc, &TomlOptions::new());
//!
//! assert_eq!(text, "[server]\nhost = \"localhost\"\n\n[[bin]]\nname = \"a\"\n");
//! ```
//!
//! A header whose table holds nothing but further tables is left out, since
//! the nested headers already create it:
//!
//! ```rust
//! use serde_toml_lite::{parse, stringify, TomlOptions};
//!
//! let doc = parse("[a.b]\nc = 1").unwrap();
//! assert_eq!(stringify(&doc, &TomlOptions::new()), "[a.b]\nc = 1\n");
//! ```

use crate::{Error, Number, Result, TomlMap, TomlOptions, TomlValue};
use serde::{ser, Serialize};
use std::fmt::Write as _;
use tracing::debug;

/// Shape of an array's elements, deciding where it is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArrayKind {
    /// Scalars only, or empty.
    Primitive,
    /// Tables only: written as `[[path]]` sections.
    Tables,
    /// Anything else, including nested arrays.
    Mixed,
}

fn array_kind(items: &[TomlValue]) -> ArrayKind {
    let Some((first, rest)) = items.split_first() else {
        return ArrayKind::Primitive;
    };
    if first.is_array() {
        return ArrayKind::Mixed;
    }
    let primitive = first.is_primitive();
    let uniform = rest
        .iter()
        .all(|item| item.is_primitive() == primitive && !item.is_array());
    match (uniform, primitive) {
        (false, _) => ArrayKind::Mixed,
        (true, true) => ArrayKind::Primitive,
        (true, false) => ArrayKind::Tables,
    }
}

/// Values written on the `key = value` line rather than as a section.
fn is_inline(value: &TomlValue) -> bool {
    match value {
        TomlValue::Table(_) => false,
        TomlValue::Array(items) => array_kind(items) != ArrayKind::Tables,
        _ => true,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Blank,
    /// `[path]`
    Table(String),
    /// `[[path]]`
    TableArray(String),
    Declaration { key: String, value: String },
}

struct Stringifier {
    lines: Vec<Line>,
    key_width: usize,
}

impl Stringifier {
    fn new() -> Self {
        Stringifier {
            lines: Vec::new(),
            key_width: 0,
        }
    }

    fn declare(&mut self, key: &str, value: &TomlValue) {
        let key = join_keys(&[key]);
        self.key_width = self.key_width.max(key.chars().count());
        let mut rendered = String::new();
        write_inline_value(&mut rendered, value);
        self.lines.push(Line::Declaration {
            key,
            value: rendered,
        });
    }

    fn write_table(&mut self, table: &TomlMap, path: &[&str]) {
        let (inline, sections): (Vec<_>, Vec<_>) =
            table.iter().partition(|(_, value)| is_inline(value));

        for (key, value) in inline {
            self.declare(key, value);
        }

        for (key, value) in sections {
            let mut child: Vec<&str> = path.to_vec();
            child.push(key);
            match value {
                TomlValue::Table(inner) => {
                    self.lines.push(Line::Blank);
                    self.lines.push(Line::Table(join_keys(&child)));
                    self.write_table(inner, &child);
                }
                TomlValue::Array(items) => {
                    for item in items {
                        if let TomlValue::Table(inner) = item {
                            self.lines.push(Line::Blank);
                            self.lines.push(Line::TableArray(join_keys(&child)));
                            self.write_table(inner, &child);
                        }
                    }
                }
                _ => {}
            }
        }

        self.lines.push(Line::Blank);
    }

    /// Drops headers of tables that only hold tables, pads keys when asked,
    /// and squeezes runs of blank lines.
    fn finish(self, options: &TomlOptions) -> String {
        let lines = self.lines;
        let mut kept: Vec<&Line> = Vec::with_capacity(lines.len());
        let mut index = 0;
        while index < lines.len() {
            let line = &lines[index];
            if let Line::Table(path) = line {
                let prefix = format!("{}.", path);
                let only_subtables = matches!(lines.get(index + 1), Some(Line::Blank))
                    && matches!(lines.get(index + 2), Some(Line::Table(next)) if next.starts_with(&prefix));
                if only_subtables {
                    index += 2;
                    continue;
                }
            }
            kept.push(line);
            index += 1;
        }

        let mut out = String::new();
        let mut previous_blank = true;
        for line in kept {
            match line {
                Line::Blank if previous_blank => continue,
                Line::Blank => {}
                Line::Table(path) => {
                    let _ = write!(out, "[{}]", path);
                }
                Line::TableArray(path) => {
                    let _ = write!(out, "[[{}]]", path);
                }
                Line::Declaration { key, value } => {
                    if options.key_alignment {
                        let _ = write!(out, "{:width$} = {}", key, value, width = self.key_width);
                    } else {
                        let _ = write!(out, "{} = {}", key, value);
                    }
                }
            }
            previous_blank = matches!(line, Line::Blank);
            out.push('\n');
        }
        if previous_blank && out.ends_with("\n\n") {
            out.pop();
        }
        out
    }
}

/// Renders a table as TOML text.
///
/// Lines are separated by `\n` and a non-empty document ends with one
/// line break.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{toml, stringify, TomlOptions, TomlValue};
///
/// let TomlValue::Table(doc) = toml!({ "name": "demo", "version": 2 }) else { unreachable!() };
/// assert_eq!(stringify(&doc, &TomlOptions::new()), "name = \"demo\"\nversion = 2\n");
/// ```
#[must_use]
pub fn stringify(table: &TomlMap, options: &TomlOptions) -> String {
    debug!(keys = table.len(), key_alignment = options.key_alignment, "stringifying table");
    let mut stringifier = Stringifier::new();
    stringifier.write_table(table, &[]);
    let text = stringifier.finish(options);
    debug!(bytes = text.len(), "stringified table");
    text
}

/// Dotted key path, quoting segments that are empty or not bare.
fn join_keys(path: &[&str]) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        let bare = !segment.is_empty()
            && segment
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if bare {
            out.push_str(segment);
        } else {
            write_quoted(&mut out, segment);
        }
    }
    out
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Writes `value` the way it appears to the right of `key = `.
pub(crate) fn write_inline_value(out: &mut String, value: &TomlValue) {
    match value {
        TomlValue::String(s) => write_quoted(out, s),
        TomlValue::Number(number) => {
            let _ = write!(out, "{}", number);
        }
        TomlValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        TomlValue::Datetime(dt) => {
            let _ = write!(out, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3f"));
        }
        TomlValue::LocalTime(time) => out.push_str(time),
        TomlValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_value(out, item);
            }
            out.push(']');
        }
        TomlValue::Table(table) => {
            out.push('{');
            for (i, (key, item)) in table.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&join_keys(&[key]));
                out.push_str(" = ");
                write_inline_value(out, item);
            }
            out.push('}');
        }
    }
}

/// Serializer producing a [`TomlValue`] tree from any `T: Serialize`.
///
/// TOML has no null. `None` and `()` serialize to `Ok(None)`: struct fields
/// and map entries holding them are left out, anywhere else they are an error.
pub struct TomlValueSerializer;

pub struct SerializeVec {
    vec: Vec<TomlValue>,
}

pub struct SerializeMap {
    map: TomlMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    inner: SerializeMap,
}

impl ser::Serializer for TomlValueSerializer {
    type Ok = Option<TomlValue>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Option<TomlValue>, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Number(Number::Integer(v))))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        match i64::try_from(v) {
            Ok(v) => self.serialize_i64(v),
            Err(_) => self.serialize_f64(v as f64),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Number(Number::from(v))))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Ok(Some(TomlValue::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Some(TomlValue::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let vec = v
            .iter()
            .map(|&b| TomlValue::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Some(TomlValue::Array(vec)))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(TomlValue::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        let mut map = TomlMap::new();
        if let Some(inner) = value.serialize(TomlValueSerializer)? {
            map.insert(variant.to_string(), inner);
        }
        Ok(Some(TomlValue::Table(map)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            inner: SerializeMap::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        match value.serialize(TomlValueSerializer)? {
            Some(item) => {
                self.vec.push(item);
                Ok(())
            }
            None => Err(Error::unsupported_type("missing value inside an array")),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: TomlMap::new(),
            current_key: None,
        }
    }

    fn insert<T: Serialize + ?Sized>(&mut self, key: String, value: &T) -> Result<()> {
        if let Some(item) = value.serialize(TomlValueSerializer)? {
            self.map.insert(key, item);
        }
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Array(self.vec)))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Array(self.vec)))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(TomlValueSerializer)? {
            Some(TomlValue::String(s)) => {
                self.current_key = Some(s);
                Ok(())
            }
            Some(TomlValue::Number(Number::Integer(i))) => {
                self.current_key = Some(i.to_string());
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Table(self.map)))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(TomlValue::Table(self.map)))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Option<TomlValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        let mut outer = TomlMap::new();
        outer.insert(self.variant.to_string(), TomlValue::Table(self.inner.map));
        Ok(Some(TomlValue::Table(outer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn table(entries: Vec<(&str, TomlValue)>) -> TomlMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn render(entries: Vec<(&str, TomlValue)>) -> String {
        stringify(&table(entries), &TomlOptions::new())
    }

    #[test]
    fn test_array_kind() {
        assert_eq!(array_kind(&[]), ArrayKind::Primitive);
        assert_eq!(array_kind(&[1.into(), "a".into()]), ArrayKind::Primitive);
        assert_eq!(
            array_kind(&[TomlValue::Table(TomlMap::new()), TomlValue::Table(TomlMap::new())]),
            ArrayKind::Tables
        );
        assert_eq!(
            array_kind(&[1.into(), TomlValue::Table(TomlMap::new())]),
            ArrayKind::Mixed
        );
        assert_eq!(
            array_kind(&[TomlValue::Array(vec![]), 1.into()]),
            ArrayKind::Mixed
        );
        assert_eq!(
            array_kind(&[1.into(), TomlValue::Array(vec![])]),
            ArrayKind::Mixed
        );
    }

    #[test]
    fn test_join_keys_quotes_non_bare_segments() {
        assert_eq!(join_keys(&["a", "b-c", "d_1"]), "a.b-c.d_1");
        assert_eq!(join_keys(&["a b", ""]), "\"a b\".\"\"");
        assert_eq!(join_keys(&["x.y"]), "\"x.y\"");
    }

    #[test]
    fn test_inline_values() {
        let mut out = String::new();
        write_inline_value(&mut out, &TomlValue::from("tab\there\u{1}"));
        assert_eq!(out, "\"tab\\there\\u0001\"");

        let date = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        assert_eq!(TomlValue::from(date).to_string(), "1979-05-27T07:32:00.000");
        assert_eq!(TomlValue::from(1.0).to_string(), "1.0");
        assert_eq!(TomlValue::from(f64::INFINITY).to_string(), "inf");
        assert_eq!(TomlValue::from(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(TomlValue::from(f64::NAN).to_string(), "nan");

        let inline = TomlValue::Table(table(vec![("a b", 1.into()), ("c", TomlValue::Bool(false))]));
        assert_eq!(inline.to_string(), "{\"a b\" = 1, c = false}");
    }

    #[test]
    fn test_inline_keys_come_first() {
        let text = render(vec![
            ("sub", TomlValue::Table(table(vec![("x", 1.into())]))),
            ("name", "n".into()),
        ]);
        assert_eq!(text, "name = \"n\"\n\n[sub]\nx = 1\n");
    }

    #[test]
    fn test_table_arrays_and_mixed_arrays() {
        let text = render(vec![
            (
                "bin",
                TomlValue::Array(vec![
                    TomlValue::Table(table(vec![("name", "a".into())])),
                    TomlValue::Table(table(vec![("name", "b".into())])),
                ]),
            ),
            (
                "mixed",
                TomlValue::Array(vec![1.into(), TomlValue::Table(table(vec![("k", 2.into())]))]),
            ),
        ]);
        assert_eq!(
            text,
            "mixed = [1, {k = 2}]\n\n[[bin]]\nname = \"a\"\n\n[[bin]]\nname = \"b\"\n"
        );
    }

    #[test]
    fn test_header_of_table_with_only_subtables_is_dropped() {
        let inner = table(vec![("c", 1.into())]);
        let text = render(vec![(
            "a",
            TomlValue::Table(table(vec![("b", TomlValue::Table(inner))])),
        )]);
        assert_eq!(text, "[a.b]\nc = 1\n");
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let text = render(vec![("a", TomlValue::Table(TomlMap::new()))]);
        assert_eq!(text, "[a]\n");
    }

    #[test]
    fn test_key_alignment_spans_the_document() {
        let doc = table(vec![
            ("a", 1.into()),
            ("sub", TomlValue::Table(table(vec![("longest", 2.into())]))),
        ]);
        let text = stringify(&doc, &TomlOptions::aligned());
        assert_eq!(text, "a       = 1\n\n[sub]\nlongest = 2\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(stringify(&TomlMap::new(), &TomlOptions::new()), "");
    }

    #[test]
    fn test_value_serializer_skips_missing_fields() {
        #[derive(Serialize)]
        struct Config {
            name: &'static str,
            port: Option<u16>,
        }

        let value = Config {
            name: "x",
            port: None,
        }
        .serialize(TomlValueSerializer)
        .unwrap()
        .unwrap();
        assert_eq!(value, TomlValue::Table(table(vec![("name", "x".into())])));
    }

    #[test]
    fn test_value_serializer_rejects_missing_array_items() {
        let items = vec![Some(1), None];
        assert!(items.serialize(TomlValueSerializer).is_err());
        assert_eq!(().serialize(TomlValueSerializer).unwrap(), None);
    }

    #[test]
    fn test_value_serializer_enums() {
        #[derive(Serialize)]
        enum Shape {
            Point,
            Circle(f64),
            Rect { w: u8 },
        }

        assert_eq!(
            Shape::Point.serialize(TomlValueSerializer).unwrap(),
            Some(TomlValue::from("Point"))
        );
        assert_eq!(
            Shape::Circle(1.5).serialize(TomlValueSerializer).unwrap(),
            Some(TomlValue::Table(table(vec![("Circle", 1.5.into())])))
        );
        assert_eq!(
            Shape::Rect { w: 2 }.serialize(TomlValueSerializer).unwrap(),
            Some(TomlValue::Table(table(vec![(
                "Rect",
                TomlValue::Table(table(vec![("w", 2.into())]))
            )])))
        );
    }
}
