//! TOML deserialization.
//!
//! Text is first parsed into a [`TomlMap`] by [`parse`](crate::parse); the
//! [`Deserializer`] then walks that tree to build any `T: Deserialize`.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_toml_lite::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x = 1\ny = 2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Type mapping
//!
//! - date-times are handed to visitors as RFC 3339 strings, which is what
//!   `chrono::DateTime` deserializes from
//! - local times and radix-prefixed integers are strings
//! - a missing key deserializes as `None` for `Option` fields
//! - enums are either a bare string (unit variants) or a one-key table

use crate::{Error, Number, Result, TomlMap, TomlValue};
use serde::de;
use serde::forward_to_deserialize_any;

/// Deserializer over a parsed TOML document.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::from_table`].
pub struct Deserializer {
    root: TomlMap,
}

impl Deserializer {
    /// Parses `input` and wraps the resulting table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `input` is not a valid document.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Ok(Deserializer {
            root: crate::parse(input)?,
        })
    }

    #[must_use]
    pub fn from_table(root: TomlMap) -> Self {
        Deserializer { root }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_any(
            ValueDeserializer::new(TomlValue::Table(self.root)),
            visitor,
        )
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_enum(
            ValueDeserializer::new(TomlValue::Table(self.root)),
            name,
            variants,
            visitor,
        )
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Deserializes a `T` out of an already-built value tree.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{from_value, toml};
///
/// let ports: Vec<u16> = from_value(toml!([80, 443])).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not have the shape `T` expects.
pub fn from_value<T>(value: TomlValue) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<TomlValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<TomlValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, TomlValue>,
    value: Option<TomlValue>,
}

impl MapDeserializer {
    fn new(map: TomlMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(TomlValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<TomlValue>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(TomlValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<TomlValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(TomlValue::Table(table)) if table.is_empty() => Ok(()),
            Some(other) => Err(Error::custom(format!(
                "Expected unit variant, found {}",
                other.type_str()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TomlValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(TomlValue::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

struct ValueDeserializer {
    value: TomlValue,
}

impl ValueDeserializer {
    fn new(value: TomlValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlValue::Bool(b) => visitor.visit_bool(b),
            TomlValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            TomlValue::Number(number) => visitor.visit_f64(number.as_f64()),
            TomlValue::String(s) | TomlValue::LocalTime(s) => visitor.visit_string(s),
            TomlValue::Datetime(dt) => visitor.visit_string(dt.to_rfc3339()),
            TomlValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            TomlValue::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlValue::Table(table) if table.is_empty() => visitor.visit_unit(),
            other => Err(Error::custom(format!(
                "Expected unit, found {}",
                other.type_str()
            ))),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            TomlValue::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            TomlValue::Table(table) if table.len() == 1 => {
                let mut entries = table.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            other => Err(Error::custom(format!(
                "Expected enum, found {}",
                other.type_str()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf seq tuple tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Package {
        name: String,
        version: Option<String>,
        authors: Vec<String>,
    }

    #[test]
    fn test_struct_with_missing_option() {
        let package: Package =
            from_value(crate::toml!({ "name": "demo", "authors": ["a", "b"] })).unwrap();
        assert_eq!(
            package,
            Package {
                name: "demo".into(),
                version: None,
                authors: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn test_datetime_as_rfc3339() {
        #[derive(Deserialize)]
        struct Event {
            at: DateTime<Utc>,
        }

        let event: Event = crate::from_str("at = 1979-05-27T07:32:00Z").unwrap();
        assert_eq!(event.at.to_rfc3339(), "1979-05-27T07:32:00+00:00");
    }

    #[test]
    fn test_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Mode {
            Fast,
            Limit(u32),
            Window { width: u32 },
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Settings {
            a: Mode,
            b: Mode,
            c: Mode,
        }

        let settings: Settings = from_value(crate::toml!({
            "a": "Fast",
            "b": { "Limit": 3 },
            "c": { "Window": { "width": 80 } }
        }))
        .unwrap();
        assert_eq!(
            settings,
            Settings {
                a: Mode::Fast,
                b: Mode::Limit(3),
                c: Mode::Window { width: 80 },
            }
        );
    }

    #[test]
    fn test_document_root_as_struct_and_enum() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Command {
            Stop,
            Limit(u32),
            Window { width: u32 },
        }

        let package: Package = crate::from_str("name = 'demo'\nauthors = []").unwrap();
        assert_eq!(package.name, "demo");

        let command: Command = crate::from_str("Limit = 3").unwrap();
        assert_eq!(command, Command::Limit(3));
        let command: Command = crate::from_str("[Window]\nwidth = 80").unwrap();
        assert_eq!(command, Command::Window { width: 80 });
        assert!(crate::from_str::<Command>("").is_err());
    }

    #[test]
    fn test_map_and_special_floats() {
        let map: HashMap<String, f64> =
            from_value(crate::toml!({ "up": (f64::INFINITY), "one": 1.5 })).unwrap();
        assert_eq!(map["up"], f64::INFINITY);
        assert_eq!(map["one"], 1.5);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let result: Result<Vec<i32>> = from_value(TomlValue::from("x"));
        assert!(result.is_err());
        let result: Result<u8> = from_value(TomlValue::from(300));
        assert!(result.is_err());
    }
}
