//! Entry point turning TOML text into a [`TomlMap`].

use crate::combinator::PResult;
use crate::grammar::document;
use crate::scanner::Scanner;
use crate::{Error, Result, TomlMap};
use tracing::debug;

/// Runs `grammar` over `source`, requiring it to match and consume all input.
///
/// This is the only place a structural error or a non-match becomes an
/// [`Error::Parse`] carrying the cursor's line and column.
pub(crate) fn run<T>(source: &str, grammar: fn(&mut Scanner) -> PResult<T>) -> Result<T> {
    let mut scanner = Scanner::new(source);
    let message = match grammar(&mut scanner) {
        Ok(Some(value)) if scanner.at_end() => return Ok(value),
        Err(structural) => structural.0,
        Ok(_) => match scanner.current() {
            Some(ch) => format!("Unexpected character: \"{}\"", ch),
            None => "Unexpected end of input".to_string(),
        },
    };
    let (line, column) = scanner.line_column();
    debug!(line, column, %message, "parse failed");
    Err(Error::parse(line, column, message))
}

/// Parses a TOML document into an ordered table.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::{parse, TomlValue};
///
/// let doc = parse("[package]\nname = \"demo\"\nversion = 1").unwrap();
/// let package = doc.get("package").and_then(TomlValue::as_table).unwrap();
/// assert_eq!(package.get("name").and_then(TomlValue::as_str), Some("demo"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with a 1-based line and column when the text is
/// not a valid document.
///
/// ```rust
/// use serde_toml_lite::parse;
///
/// let err = parse("a = 1\nb = [1, 2").unwrap_err();
/// assert_eq!(err.position().map(|(line, _)| line), Some(2));
/// ```
pub fn parse(source: &str) -> Result<TomlMap> {
    debug!(bytes = source.len(), "parsing document");
    let table = run(source, document)?;
    debug!(keys = table.len(), "parsed document");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TomlValue;

    fn digit(scanner: &mut Scanner) -> PResult<char> {
        match scanner.current() {
            Some(ch) if ch.is_ascii_digit() => {
                scanner.advance(1);
                Ok(Some(ch))
            }
            _ => Ok(None),
        }
    }

    #[test]
    fn test_run_requires_full_consumption() {
        assert_eq!(run("7", digit).unwrap(), '7');

        let err = run("7x", digit).unwrap_err();
        assert_eq!(err, Error::parse(1, 2, "Unexpected character: \"x\""));
    }

    #[test]
    fn test_run_reports_non_match_at_start() {
        let err = run("x", digit).unwrap_err();
        assert_eq!(err.position(), Some((1, 1)));
    }

    #[test]
    fn test_structural_error_position() {
        let err = parse("a = 1\nb = \"open").unwrap_err();
        let Error::Parse { line, message, .. } = err else {
            panic!("expected parse error");
        };
        assert_eq!(line, 2);
        assert!(message.starts_with("Single-line string is not closed"));
    }

    #[test]
    fn test_parse_simple_document() {
        let doc = parse("a = 1\nb = 'two'\n").unwrap();
        assert_eq!(doc.get("a"), Some(&TomlValue::from(1)));
        assert_eq!(doc.get("b"), Some(&TomlValue::from("two")));
    }

    #[test]
    fn test_unknown_top_level_construct() {
        let err = parse("a = 1\n= 2").unwrap_err();
        assert_eq!(err, Error::parse(2, 1, "Unexpected character: \"=\""));
    }
}
