//! Generic parser building blocks.
//!
//! A parser is any `Fn(&mut Scanner) -> PResult<T>`. Its outcome is one of:
//!
//! - `Ok(Some(value))`: matched, cursor moved past the match
//! - `Ok(None)`: this production does not apply here, try another. Leading
//!   inline whitespace may have been consumed, nothing past it
//! - `Err(Structural)`: the production committed and found malformed input
//!
//! Combinators never turn an `Err` into `Ok(None)`; hard errors travel straight
//! to the driver.

use crate::error::Structural;
use crate::scanner::{Scanner, Skip};
use crate::{TomlMap, TomlValue};

pub(crate) type PResult<T> = Result<Option<T>, Structural>;

/// Plain function parsers, the element type of [`or`].
pub(crate) type Parser<T> = fn(&mut Scanner) -> PResult<T>;

/// First parser to match wins.
pub(crate) fn or<T, const N: usize>(parsers: [Parser<T>; N]) -> impl Fn(&mut Scanner) -> PResult<T> {
    move |scanner: &mut Scanner| {
        for parser in parsers {
            if let Some(value) = parser(scanner)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// One or more `parser` matches separated by `separator`.
///
/// A separator must be followed by another match.
pub(crate) fn join<T, P>(parser: P, separator: &'static str) -> impl Fn(&mut Scanner) -> PResult<Vec<T>>
where
    P: Fn(&mut Scanner) -> PResult<T>,
{
    move |scanner: &mut Scanner| {
        let Some(first) = parser(scanner)? else {
            return Ok(None);
        };
        let mut out = vec![first];
        while !scanner.at_end() {
            if literal(separator)(scanner)?.is_none() {
                break;
            }
            match parser(scanner)? {
                Some(item) => out.push(item),
                None => {
                    return Err(Structural(format!(
                        "Invalid token after \"{}\"",
                        separator
                    )))
                }
            }
        }
        Ok(Some(out))
    }
}

/// `key separator value`, producing a one-entry table nested along the key
/// path: `a.b = 1` gives `{a: {b: 1}}`.
pub(crate) fn kv<K, V>(
    key: K,
    separator: &'static str,
    value: V,
) -> impl Fn(&mut Scanner) -> PResult<TomlMap>
where
    K: Fn(&mut Scanner) -> PResult<Vec<String>>,
    V: Fn(&mut Scanner) -> PResult<TomlValue>,
{
    move |scanner: &mut Scanner| {
        let Some(path) = key(scanner)? else {
            return Ok(None);
        };
        if literal(separator)(scanner)?.is_none() {
            return Err(Structural(format!(
                "key/value pair doesn't have \"{}\"",
                separator
            )));
        }
        let Some(leaf) = value(scanner)? else {
            return Err(Structural::new(
                "Value of key/value pair is invalid data format",
            ));
        };
        Ok(Some(nest(&path, leaf)))
    }
}

/// Wraps `leaf` in one table per key segment, innermost last.
pub(crate) fn nest(path: &[String], leaf: TomlValue) -> TomlMap {
    let mut table = TomlMap::new();
    let Some((last, parents)) = path.split_last() else {
        return table;
    };
    table.insert(last.clone(), leaf);
    for segment in parents.iter().rev() {
        let mut outer = TomlMap::new();
        outer.insert(segment.clone(), TomlValue::Table(table));
        table = outer;
    }
    table
}

/// Deep-merges every table a repetition produced, left to right.
pub(crate) fn merge<P>(parser: P) -> impl Fn(&mut Scanner) -> PResult<TomlMap>
where
    P: Fn(&mut Scanner) -> PResult<Vec<TomlMap>>,
{
    move |scanner: &mut Scanner| {
        Ok(parser(scanner)?.map(|tables| {
            tables
                .into_iter()
                .fold(TomlMap::new(), |acc, table| acc.merge(table))
        }))
    }
}

/// One or more matches, skipping whitespace, line breaks and comments after each.
pub(crate) fn repeat<T, P>(parser: P) -> impl Fn(&mut Scanner) -> PResult<Vec<T>>
where
    P: Fn(&mut Scanner) -> PResult<T>,
{
    move |scanner: &mut Scanner| {
        let mut out = Vec::new();
        while !scanner.at_end() {
            match parser(scanner)? {
                Some(item) => out.push(item),
                None => break,
            }
            scanner.skip(Skip::Full)?;
        }
        Ok(if out.is_empty() { None } else { Some(out) })
    }
}

/// `left parser right`; once `left` matched the rest is mandatory.
pub(crate) fn surround<T, P>(
    left: &'static str,
    parser: P,
    right: &'static str,
) -> impl Fn(&mut Scanner) -> PResult<T>
where
    P: Fn(&mut Scanner) -> PResult<T>,
{
    move |scanner: &mut Scanner| {
        if literal(left)(scanner)?.is_none() {
            return Ok(None);
        }
        let Some(inner) = parser(scanner)? else {
            return Err(Structural(format!("Invalid token after \"{}\"", left)));
        };
        if literal(right)(scanner)?.is_none() {
            return Err(Structural(format!(
                "Not closed by \"{}\" after started with \"{}\"",
                right, left
            )));
        }
        Ok(Some(inner))
    }
}

/// Exact text, with inline whitespace allowed on both sides.
///
/// On a non-match the leading whitespace stays consumed and the cursor rests
/// on the first other character.
pub(crate) fn literal(text: &'static str) -> impl Fn(&mut Scanner) -> PResult<()> {
    move |scanner: &mut Scanner| {
        scanner.skip(Skip::Inline)?;
        if !scanner.starts_with(text) {
            return Ok(None);
        }
        scanner.advance(text.chars().count());
        scanner.skip(Skip::Inline)?;
        Ok(Some(()))
    }
}
