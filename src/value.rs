//! Dynamic value representation for TOML data.
//!
//! [`TomlValue`] is the tree produced by [`parse`](crate::parse) and consumed by
//! [`stringify`](crate::stringify).
//!
//! ## Core Types
//!
//! - [`TomlValue`]: string, number, boolean, date-time, local time, array or table
//! - [`Number`]: integers, floats and the special values `inf`, `-inf` and `nan`
//!
//! ## Usage Patterns
//!
//! ```rust
//! use serde_toml_lite::{parse, TomlValue, Number};
//!
//! let doc = parse("port = 8080\nratio = inf").unwrap();
//!
//! assert_eq!(doc.get("port").and_then(TomlValue::as_i64), Some(8080));
//! assert_eq!(doc.get("ratio"), Some(&TomlValue::Number(Number::Infinity)));
//! ```
//!
//! Integers written with a radix prefix (`0xff`, `0o17`, `0b101`) are kept as
//! [`TomlValue::String`] holding the literal text, so no information about the
//! radix is lost.

use crate::TomlMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any TOML value.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{TomlValue, Number};
///
/// let num = TomlValue::Number(Number::Integer(42));
/// let text = TomlValue::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TomlValue {
    String(String),
    Number(Number),
    Bool(bool),
    Datetime(DateTime<Utc>),
    /// A time of day with no date, kept as written (`07:32:00.999`).
    LocalTime(String),
    Array(Vec<TomlValue>),
    Table(TomlMap),
}

/// A numeric value: an integer, a finite float or one of the special floats.
///
/// Non-finite floats always live in their dedicated variants, which makes
/// `Number::NaN == Number::NaN` hold and keeps parsed trees comparable.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::Number;
///
/// assert_eq!(Number::from(f64::NAN), Number::NaN);
/// assert_eq!(Number::from(f64::NEG_INFINITY), Number::NegativeInfinity);
/// assert!(Number::Infinity.is_special());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` for any floating-point value, special values included.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        !self.is_integer()
    }

    /// Returns `true` if this is `inf`, `-inf` or `nan`.
    #[inline]
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(
            self,
            Number::Infinity | Number::NegativeInfinity | Number::NaN
        )
    }

    /// Converts this number to an `i64` if it holds an integral value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::Infinity.as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

/// TOML spelling: special floats as `inf`/`-inf`/`nan`, finite floats always
/// with a fractional part or exponent so they read back as floats.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{:?}", fl),
            Number::Infinity => write!(f, "inf"),
            Number::NegativeInfinity => write!(f, "-inf"),
            Number::NaN => write!(f, "nan"),
        }
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(i64::from(value))
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::from(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value == f64::INFINITY {
            Number::Infinity
        } else if value == f64::NEG_INFINITY {
            Number::NegativeInfinity
        } else {
            Number::Float(value)
        }
    }
}

impl TomlValue {
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TomlValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, TomlValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, TomlValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, TomlValue::Datetime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local_time(&self) -> bool {
        matches!(self, TomlValue::LocalTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TomlValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, TomlValue::Table(_))
    }

    /// Anything that is neither an array nor a table.
    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, TomlValue::Array(_) | TomlValue::Table(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TomlValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::TomlValue;
    ///
    /// assert_eq!(TomlValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(TomlValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TomlValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TomlValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TomlValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<TomlValue>> {
        match self {
            TomlValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlMap> {
        match self {
            TomlValue::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            TomlValue::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_time(&self) -> Option<&str> {
        match self {
            TomlValue::LocalTime(t) => Some(t),
            _ => None,
        }
    }

    /// Name of the variant, used in conversion errors.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            TomlValue::String(_) => "string",
            TomlValue::Number(Number::Integer(_)) => "integer",
            TomlValue::Number(_) => "float",
            TomlValue::Bool(_) => "boolean",
            TomlValue::Datetime(_) => "datetime",
            TomlValue::LocalTime(_) => "local time",
            TomlValue::Array(_) => "array",
            TomlValue::Table(_) => "table",
        }
    }
}

/// Renders the value the way it appears on the right of `key = `.
impl fmt::Display for TomlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::ser::write_inline_value(&mut out, self);
        f.write_str(&out)
    }
}

impl Serialize for TomlValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TomlValue::Bool(b) => serializer.serialize_bool(*b),
            TomlValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            TomlValue::Number(n) => serializer.serialize_f64(n.as_f64()),
            TomlValue::String(s) | TomlValue::LocalTime(s) => serializer.serialize_str(s),
            TomlValue::Datetime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            TomlValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            TomlValue::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for TomlValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct TomlValueVisitor;

        impl<'de> Visitor<'de> for TomlValueVisitor {
            type Value = TomlValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(TomlValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(TomlValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(TomlValue::Number(Number::Integer(value as i64)))
                } else {
                    Ok(TomlValue::Number(Number::from(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(TomlValue::Number(Number::from(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(TomlValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(TomlValue::String(value))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(TomlValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = TomlMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(TomlValue::Table(values))
            }
        }

        deserializer.deserialize_any(TomlValueVisitor)
    }
}

impl TryFrom<TomlValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Number(n) => n
                .as_i64()
                .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for bool {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value.type_str()
            ))),
        }
    }
}

impl TryFrom<TomlValue> for String {
    type Error = crate::Error;

    fn try_from(value: TomlValue) -> crate::Result<Self> {
        match value {
            TomlValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.type_str()
            ))),
        }
    }
}

impl From<bool> for TomlValue {
    fn from(value: bool) -> Self {
        TomlValue::Bool(value)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TomlValue {
                fn from(value: $ty) -> Self {
                    TomlValue::Number(Number::from(value))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl From<Number> for TomlValue {
    fn from(value: Number) -> Self {
        TomlValue::Number(value)
    }
}

impl From<String> for TomlValue {
    fn from(value: String) -> Self {
        TomlValue::String(value)
    }
}

impl From<&str> for TomlValue {
    fn from(value: &str) -> Self {
        TomlValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for TomlValue {
    fn from(value: DateTime<Utc>) -> Self {
        TomlValue::Datetime(value)
    }
}

impl From<Vec<TomlValue>> for TomlValue {
    fn from(value: Vec<TomlValue>) -> Self {
        TomlValue::Array(value)
    }
}

impl From<TomlMap> for TomlValue {
    fn from(value: TomlMap) -> Self {
        TomlValue::Table(value)
    }
}
