/// Builds a [`TomlValue`](crate::TomlValue) from JSON-like syntax.
///
/// Arrays use `[...]`, tables use `{ "key": value, ... }` with string literal
/// keys. Any other token tree is converted with `TomlValue::from`, so wrap
/// multi-token expressions such as `-1` or `f64::NAN` in parentheses when
/// they appear inside an array or table.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{toml, TomlValue};
///
/// let value = toml!({
///     "name": "demo",
///     "ports": [80, 443],
///     "limits": { "low": (-1), "high": 2.5 }
/// });
///
/// let TomlValue::Table(table) = value else { unreachable!() };
/// assert_eq!(table.get("name").and_then(TomlValue::as_str), Some("demo"));
/// assert_eq!(table.len(), 3);
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::TomlValue::Bool(true)
    };

    (false) => {
        $crate::TomlValue::Bool(false)
    };

    ([]) => {
        $crate::TomlValue::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::TomlValue::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::TomlValue::Table($crate::TomlMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::TomlMap::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::TomlValue::Table(table)
    }};

    ($other:expr) => {
        $crate::TomlValue::from($other)
    };
}
