//! Document grammar: values, pairs, blocks, table headers and the assignment
//! of table declarations into the root table.

use crate::combinator::{kv, merge, nest, or, repeat, surround, PResult, Parser};
use crate::error::Structural;
use crate::scanner::{Scanner, Skip};
use crate::token::{
    array, basic_string, date_time, dotted_key, float, inline_table, integer, literal_string,
    local_time, multiline_basic_string, multiline_literal_string, symbols,
};
use crate::{TomlMap, TomlValue};
use tracing::trace;

/// One top-level construct of a document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Declaration {
    /// Bare `key = value` lines.
    Block(TomlMap),
    /// `[a.b]` followed by its pairs.
    Table { keys: Vec<String>, body: TomlMap },
    /// `[[a.b]]` followed by its pairs.
    TableArray { keys: Vec<String>, body: TomlMap },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Table,
    TableArray,
}

fn string_value(parser: Parser<String>, scanner: &mut Scanner) -> PResult<TomlValue> {
    Ok(parser(scanner)?.map(TomlValue::String))
}

fn multiline_basic(scanner: &mut Scanner) -> PResult<TomlValue> {
    string_value(multiline_basic_string, scanner)
}

fn multiline_literal(scanner: &mut Scanner) -> PResult<TomlValue> {
    string_value(multiline_literal_string, scanner)
}

fn basic(scanner: &mut Scanner) -> PResult<TomlValue> {
    string_value(basic_string, scanner)
}

fn literal(scanner: &mut Scanner) -> PResult<TomlValue> {
    string_value(literal_string, scanner)
}

/// Multi-line forms share a prefix with the single-line ones, and `float`
/// must see a number before `integer` can take its leading digits.
const VALUE: [Parser<TomlValue>; 11] = [
    multiline_basic,
    multiline_literal,
    basic,
    literal,
    symbols,
    date_time,
    local_time,
    float,
    integer,
    array,
    inline_table,
];

pub(crate) fn value(scanner: &mut Scanner) -> PResult<TomlValue> {
    or(VALUE)(scanner)
}

/// `dotted.key = value`, nested into a one-entry table.
pub(crate) fn pair(scanner: &mut Scanner) -> PResult<TomlMap> {
    kv(dotted_key, "=", value)(scanner)
}

pub(crate) fn block(scanner: &mut Scanner) -> PResult<Declaration> {
    scanner.skip(Skip::Full)?;
    Ok(merge(repeat(pair))(scanner)?.map(Declaration::Block))
}

fn table_body(scanner: &mut Scanner) -> Result<TomlMap, Structural> {
    scanner.skip(Skip::Full)?;
    Ok(merge(repeat(pair))(scanner)?.unwrap_or_default())
}

pub(crate) fn table(scanner: &mut Scanner) -> PResult<Declaration> {
    scanner.skip(Skip::Full)?;
    let Some(keys) = surround("[", dotted_key, "]")(scanner)? else {
        return Ok(None);
    };
    let body = table_body(scanner)?;
    Ok(Some(Declaration::Table { keys, body }))
}

pub(crate) fn table_array(scanner: &mut Scanner) -> PResult<Declaration> {
    scanner.skip(Skip::Full)?;
    let Some(keys) = surround("[[", dotted_key, "]]")(scanner)? else {
        return Ok(None);
    };
    let body = table_body(scanner)?;
    Ok(Some(Declaration::TableArray { keys, body }))
}

/// `[[x]]` has to be tried before `[x]`, which would otherwise claim its
/// first bracket.
const DECLARATION: [Parser<Declaration>; 3] = [block, table_array, table];

/// Folds every top-level construct into one root table.
pub(crate) fn document(scanner: &mut Scanner) -> PResult<TomlMap> {
    scanner.skip(Skip::Full)?;
    let declarations = repeat(or(DECLARATION))(scanner)?.unwrap_or_default();

    let mut root = TomlMap::new();
    for declaration in declarations {
        match declaration {
            Declaration::Block(pairs) => {
                trace!(keys = pairs.len(), "merging block");
                root = root.merge(pairs);
            }
            Declaration::Table { keys, body } => {
                trace!(path = %keys.join("."), "assigning table");
                assign(&mut root, TableKind::Table, &keys, body)?;
            }
            Declaration::TableArray { keys, body } => {
                trace!(path = %keys.join("."), "appending to table array");
                assign(&mut root, TableKind::TableArray, &keys, body)?;
            }
        }
    }
    Ok(Some(root))
}

/// Places a table declaration at `keys` below `target`.
///
/// A path through an existing array descends into its last element, so
/// `[arr.sub]` after `[[arr]]` attaches to the most recent entry.
fn assign(
    target: &mut TomlMap,
    kind: TableKind,
    keys: &[String],
    body: TomlMap,
) -> Result<(), Structural> {
    let Some((head, rest)) = keys.split_first() else {
        return Err(Structural::new("Unexpected key length"));
    };

    match target.get_mut(head) {
        None => {
            let leaf = match kind {
                TableKind::Table => TomlValue::Table(body),
                TableKind::TableArray => TomlValue::Array(vec![TomlValue::Table(body)]),
            };
            let nested = nest(keys, leaf);
            for (key, value) in nested {
                target.insert(key, value);
            }
            Ok(())
        }
        Some(TomlValue::Array(items)) => {
            if kind == TableKind::TableArray && rest.is_empty() {
                items.push(TomlValue::Table(body));
                return Ok(());
            }
            match items.last_mut() {
                Some(TomlValue::Table(last)) => assign(last, kind, rest, body),
                _ => Err(unexpected_assign(keys)),
            }
        }
        Some(TomlValue::Table(inner)) => assign(inner, kind, rest, body),
        Some(_) => Err(unexpected_assign(keys)),
    }
}

fn unexpected_assign(keys: &[String]) -> Structural {
    Structural(format!("Unexpected assign: {}", keys.join(".")))
}
