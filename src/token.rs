//! Token recognizers: keys, strings, numbers, symbols, dates and the inline
//! array/table forms.
//!
//! Every recognizer first skips inline whitespace, then either matches or
//! returns `Ok(None)`. A non-match may leave that leading whitespace consumed
//! but never moves past the start of the token. Once a recognizer has
//! consumed a distinguishing prefix (an opening quote, a `[`, a fixed-width
//! date) malformed input becomes a hard error.

use crate::combinator::{join, or, surround, PResult, Parser};
use crate::error::Structural;
use crate::grammar::{pair, value};
use crate::scanner::{Scanner, Skip};
use crate::{Number, TomlMap, TomlValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

const KEY_SEGMENT: [Parser<String>; 3] = [bare_key, basic_string, literal_string];

fn is_bare_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn is_float_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '_' | '.' | 'e' | 'E' | '+' | '-')
}

fn is_value_end(scanner: &Scanner, offset: usize) -> bool {
    match scanner.peek(offset) {
        None => true,
        Some(' ' | '\t' | '#' | ',' | '}' | ']' | '\n') => true,
        Some('\r') => scanner.peek(offset + 1) == Some('\n'),
        Some(_) => false,
    }
}

pub(crate) fn bare_key(scanner: &mut Scanner) -> PResult<String> {
    scanner.skip(Skip::Inline)?;
    let mut key = String::new();
    while let Some(ch) = scanner.current().filter(|&ch| is_bare_key_char(ch)) {
        key.push(ch);
        scanner.advance(1);
    }
    Ok(if key.is_empty() { None } else { Some(key) })
}

/// `a`, `"quoted key"`, `'literal'`, joined by dots.
pub(crate) fn dotted_key(scanner: &mut Scanner) -> PResult<Vec<String>> {
    join(or(KEY_SEGMENT), ".")(scanner)
}

/// Decodes one backslash escape at the cursor, `Ok(None)` if there is none.
fn escape_sequence(scanner: &mut Scanner) -> PResult<char> {
    if scanner.current() != Some('\\') {
        return Ok(None);
    }
    scanner.advance(1);
    let decoded = match scanner.current() {
        Some('b') => '\u{0008}',
        Some('t') => '\t',
        Some('n') => '\n',
        Some('f') => '\u{000C}',
        Some('r') => '\r',
        Some('"') => '"',
        Some('\\') => '\\',
        Some(marker @ ('u' | 'U')) => {
            let width = if marker == 'u' { 4 } else { 6 };
            let digits = scanner.slice(1, 1 + width);
            let well_formed =
                digits.chars().count() == width && digits.chars().all(|c| c.is_ascii_hexdigit());
            let code_point = well_formed
                .then(|| u32::from_str_radix(&digits, 16).ok())
                .flatten()
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    Structural(format!("Invalid unicode escape: \\{}{}", marker, digits))
                })?;
            scanner.advance(1 + width);
            return Ok(Some(code_point));
        }
        Some(other) => {
            return Err(Structural(format!("Invalid escape sequence: \\{}", other)))
        }
        None => return Err(Structural::new("Invalid escape sequence at end of input")),
    };
    scanner.advance(1);
    Ok(Some(decoded))
}

pub(crate) fn basic_string(scanner: &mut Scanner) -> PResult<String> {
    scanner.skip(Skip::Inline)?;
    if scanner.current() != Some('"') {
        return Ok(None);
    }
    scanner.advance(1);
    let mut acc = String::new();
    while let Some(ch) = scanner.current().filter(|&ch| ch != '"') {
        if ch == '\n' {
            return Err(Structural::new("Single-line string cannot contain EOL"));
        }
        match escape_sequence(scanner)? {
            Some(decoded) => acc.push(decoded),
            None => {
                acc.push(ch);
                scanner.advance(1);
            }
        }
    }
    if scanner.at_end() {
        return Err(Structural(format!(
            "Single-line string is not closed:\n{}",
            acc
        )));
    }
    scanner.advance(1);
    Ok(Some(acc))
}

pub(crate) fn literal_string(scanner: &mut Scanner) -> PResult<String> {
    scanner.skip(Skip::Inline)?;
    if scanner.current() != Some('\'') {
        return Ok(None);
    }
    scanner.advance(1);
    let mut acc = String::new();
    while let Some(ch) = scanner.current().filter(|&ch| ch != '\'') {
        if ch == '\n' {
            return Err(Structural::new("Single-line string cannot contain EOL"));
        }
        acc.push(ch);
        scanner.advance(1);
    }
    if scanner.at_end() {
        return Err(Structural(format!(
            "Single-line string is not closed:\n{}",
            acc
        )));
    }
    scanner.advance(1);
    Ok(Some(acc))
}

/// Consumes the line break directly after an opening `"""` or `'''`.
fn trim_leading_line_break(scanner: &mut Scanner) {
    if scanner.current() == Some('\n') {
        scanner.advance(1);
    } else if scanner.starts_with("\r\n") {
        scanner.advance(2);
    }
}

/// Closes a multi-line string: a fourth quote belongs to the content.
fn close_multiline(scanner: &mut Scanner, quote: char, acc: &mut String) {
    if scanner.peek(3) == Some(quote) {
        acc.push(quote);
        scanner.advance(1);
    }
    scanner.advance(3);
}

pub(crate) fn multiline_basic_string(scanner: &mut Scanner) -> PResult<String> {
    scanner.skip(Skip::Inline)?;
    if !scanner.starts_with("\"\"\"") {
        return Ok(None);
    }
    scanner.advance(3);
    trim_leading_line_break(scanner);

    let mut acc = String::new();
    while !scanner.at_end() && !scanner.starts_with("\"\"\"") {
        if scanner.starts_with("\\\n") || scanner.starts_with("\\\r\n") {
            scanner.advance(1);
            scanner.skip(Skip::FullKeepComments)?;
            continue;
        }
        match escape_sequence(scanner)? {
            Some(decoded) => acc.push(decoded),
            None => {
                if let Some(ch) = scanner.current() {
                    acc.push(ch);
                }
                scanner.advance(1);
            }
        }
    }
    if scanner.at_end() {
        return Err(Structural(format!(
            "Multi-line string is not closed:\n{}",
            acc
        )));
    }
    close_multiline(scanner, '"', &mut acc);
    Ok(Some(acc))
}

pub(crate) fn multiline_literal_string(scanner: &mut Scanner) -> PResult<String> {
    scanner.skip(Skip::Inline)?;
    if !scanner.starts_with("'''") {
        return Ok(None);
    }
    scanner.advance(3);
    trim_leading_line_break(scanner);

    let mut acc = String::new();
    while !scanner.at_end() && !scanner.starts_with("'''") {
        if let Some(ch) = scanner.current() {
            acc.push(ch);
        }
        scanner.advance(1);
    }
    if scanner.at_end() {
        return Err(Structural(format!(
            "Multi-line string is not closed:\n{}",
            acc
        )));
    }
    close_multiline(scanner, '\'', &mut acc);
    Ok(Some(acc))
}

/// `true`, `false` and the special floats. No entry is a prefix of a later one.
const SYMBOLS: [(&str, TomlValue); 8] = [
    ("true", TomlValue::Bool(true)),
    ("false", TomlValue::Bool(false)),
    ("inf", TomlValue::Number(Number::Infinity)),
    ("+inf", TomlValue::Number(Number::Infinity)),
    ("-inf", TomlValue::Number(Number::NegativeInfinity)),
    ("nan", TomlValue::Number(Number::NaN)),
    ("+nan", TomlValue::Number(Number::NaN)),
    ("-nan", TomlValue::Number(Number::NaN)),
];

pub(crate) fn symbols(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    let Some((text, symbol)) = SYMBOLS.iter().find(|(text, _)| scanner.starts_with(text)) else {
        return Ok(None);
    };
    scanner.advance(text.len());
    Ok(Some(symbol.clone()))
}

/// Decimal integers become numbers; `0x`/`0o`/`0b` forms stay literal text.
pub(crate) fn integer(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    let start = scanner.position();

    let prefix = scanner.slice(0, 2);
    if matches!(prefix.to_ascii_lowercase().as_str(), "0x" | "0o" | "0b") {
        scanner.advance(2);
        let mut acc = prefix;
        while let Some(ch) = scanner
            .current()
            .filter(|&ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            acc.push(ch);
            scanner.advance(1);
        }
        if acc.len() == 2 {
            scanner.rewind(start);
            return Ok(None);
        }
        return Ok(Some(TomlValue::String(acc)));
    }

    let mut acc = String::new();
    if let Some(sign @ ('+' | '-')) = scanner.current() {
        acc.push(sign);
        scanner.advance(1);
    }
    let mut has_digit = false;
    while let Some(ch) = scanner.current().filter(|&ch| ch.is_ascii_digit() || ch == '_') {
        if ch != '_' {
            acc.push(ch);
            has_digit = true;
        }
        scanner.advance(1);
    }
    if !has_digit {
        scanner.rewind(start);
        return Ok(None);
    }
    acc.parse::<i64>()
        .map(|n| Some(TomlValue::Number(Number::Integer(n))))
        .map_err(|_| Structural(format!("Integer is out of range: {}", acc)))
}

/// Numbers with a fraction or exponent.
///
/// The whole token up to the next value terminator is checked before anything
/// is consumed, so integer-, date- and time-shaped input falls through intact.
pub(crate) fn float(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    let mut len = 0;
    while !is_value_end(scanner, len) {
        match scanner.peek(len) {
            Some(ch) if is_float_char(ch) => len += 1,
            _ => return Ok(None),
        }
    }

    let token = scanner.slice(0, len);
    let body = token.trim_start_matches(['+', '-']);
    if !body.contains(['.', 'e', 'E']) {
        return Ok(None);
    }
    let digits: String = token.chars().filter(|&ch| ch != '_').collect();
    match digits.parse::<f64>() {
        Ok(parsed) if !parsed.is_nan() => {
            scanner.advance(len);
            Ok(Some(TomlValue::Number(Number::from(parsed))))
        }
        _ => Ok(None),
    }
}

fn is_date_time_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, ' ' | 'T' | 'Z' | '.' | ':' | '+' | '-')
}

fn fixed_digits(text: &str, pattern: &str) -> bool {
    text.len() == pattern.len()
        && text.chars().zip(pattern.chars()).all(|(ch, p)| match p {
            'd' => ch.is_ascii_digit(),
            _ => ch == p,
        })
}

/// Parses a date with optional time and offset; values without an offset
/// are taken as UTC. Fractional seconds are truncated to milliseconds, the
/// precision the stringifier writes.
pub(crate) fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    parse_date_time_exact(text).map(|dt| dt.trunc_subsecs(3))
}

fn parse_date_time_exact(text: &str) -> Option<DateTime<Utc>> {
    let normalized = match text.as_bytes().get(10) {
        Some(b' ') => format!("{}T{}", &text[..10], &text[11..]),
        _ => text.to_string(),
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub(crate) fn date_time(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    let mut text = scanner.slice(0, 10);
    if !fixed_digits(&text, "dddd-dd-dd") {
        return Ok(None);
    }
    scanner.advance(10);
    while let Some(ch) = scanner.current().filter(|&ch| is_date_time_char(ch)) {
        text.push(ch);
        scanner.advance(1);
    }
    let text = text.trim_end();
    parse_date_time(text)
        .map(|dt| Some(TomlValue::Datetime(dt)))
        .ok_or_else(|| Structural(format!("Invalid date string \"{}\"", text)))
}

pub(crate) fn local_time(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    let mut text = scanner.slice(0, 8);
    if !fixed_digits(&text, "dd:dd:dd") {
        return Ok(None);
    }
    scanner.advance(8);
    if scanner.current() == Some('.') {
        text.push('.');
        scanner.advance(1);
        while let Some(ch) = scanner.current().filter(char::is_ascii_digit) {
            text.push(ch);
            scanner.advance(1);
        }
    }
    Ok(Some(TomlValue::LocalTime(text)))
}

/// `[v, v, ...]`; values may span lines, a trailing comma is allowed.
pub(crate) fn array(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Inline)?;
    if scanner.current() != Some('[') {
        return Ok(None);
    }
    scanner.advance(1);

    let mut items = Vec::new();
    while !scanner.at_end() {
        scanner.skip(Skip::Full)?;
        let Some(item) = value(scanner)? else {
            break;
        };
        items.push(item);
        scanner.skip(Skip::Inline)?;
        if scanner.current() != Some(',') {
            break;
        }
        scanner.advance(1);
    }
    scanner.skip(Skip::Full)?;
    if scanner.current() != Some(']') {
        return Err(Structural::new("Array is not closed"));
    }
    scanner.advance(1);
    Ok(Some(TomlValue::Array(items)))
}

/// `{k = v, ...}`, later pairs deep-merged over earlier ones.
pub(crate) fn inline_table(scanner: &mut Scanner) -> PResult<TomlValue> {
    scanner.skip(Skip::Full)?;
    if scanner.current() == Some('{') {
        let start = scanner.position();
        scanner.advance(1);
        scanner.skip(Skip::Inline)?;
        if scanner.current() == Some('}') {
            scanner.advance(1);
            return Ok(Some(TomlValue::Table(TomlMap::new())));
        }
        scanner.rewind(start);
    }
    let Some(pairs) = surround("{", join(pair, ","), "}")(scanner)? else {
        return Ok(None);
    };
    let table = pairs
        .into_iter()
        .fold(TomlMap::new(), |acc, pair| acc.merge(pair));
    Ok(Some(TomlValue::Table(table)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn run<T>(parser: fn(&mut Scanner) -> PResult<T>, input: &str) -> PResult<T> {
        parser(&mut Scanner::new(input))
    }

    fn matched<T: std::fmt::Debug>(parser: fn(&mut Scanner) -> PResult<T>, input: &str) -> T {
        run(parser, input).unwrap().unwrap()
    }

    #[test]
    fn test_bare_key() {
        assert_eq!(matched(bare_key, "  server-1_a = 1"), "server-1_a");
        assert_eq!(run(bare_key, "=").unwrap(), None);
    }

    #[test]
    fn test_non_match_stops_at_token_start() {
        for parser in [integer, float, symbols, date_time] {
            let mut scanner = Scanner::new("  \"x\"");
            assert_eq!(parser(&mut scanner).unwrap(), None);
            assert_eq!(scanner.position(), 2);
        }
        let mut scanner = Scanner::new("\t0x = 1");
        assert_eq!(integer(&mut scanner).unwrap(), None);
        assert_eq!(scanner.current(), Some('0'));
    }

    #[test]
    fn test_dotted_key_mixes_segment_kinds() {
        assert_eq!(
            matched(dotted_key, r#"a . "b.c" . 'd'"#),
            vec!["a", "b.c", "d"]
        );
        assert!(run(dotted_key, "a.").is_err());
        assert!(run(dotted_key, "a..b").is_err());
    }

    #[test]
    fn test_basic_string_escapes() {
        assert_eq!(
            matched(basic_string, r#""tab\there \"q\" \\ \u00e9 \U01F600""#),
            "tab\there \"q\" \\ é 😀"
        );
        assert_eq!(matched(basic_string, r#""\b\f\r\n""#), "\u{8}\u{c}\r\n");
    }

    #[test]
    fn test_basic_string_errors() {
        assert!(run(basic_string, "\"unterminated").is_err());
        assert!(run(basic_string, "\"line\nbreak\"").is_err());
        assert!(run(basic_string, r#""bad \q""#).is_err());
        assert!(run(basic_string, r#""bad \u12""#).is_err());
        assert!(run(basic_string, r#""bad \u+123""#).is_err());
        assert!(run(basic_string, r#""bad \U+00041""#).is_err());
        assert!(run(basic_string, r#""bad \u-041""#).is_err());
        assert_eq!(run(basic_string, "'x'").unwrap(), None);
    }

    #[test]
    fn test_literal_string_keeps_backslashes() {
        assert_eq!(matched(literal_string, r"'C:\Users\nodejs'"), r"C:\Users\nodejs");
        assert!(run(literal_string, "'open").is_err());
        assert!(run(literal_string, "'a\nb'").is_err());
    }

    #[test]
    fn test_multiline_basic_string() {
        assert_eq!(matched(multiline_basic_string, "\"\"\"\na\nb\"\"\""), "a\nb");
        assert_eq!(matched(multiline_basic_string, "\"\"\"a\\\n   b\"\"\""), "ab");
        assert_eq!(
            matched(multiline_basic_string, "\"\"\"a\\\r\n\n  \t b\"\"\""),
            "ab"
        );
        assert_eq!(matched(multiline_basic_string, "\"\"\"q\\tx\"\"\""), "q\tx");
        assert!(run(multiline_basic_string, "\"\"\"open").is_err());
    }

    #[test]
    fn test_multiline_absorbs_one_extra_quote() {
        assert_eq!(matched(multiline_basic_string, "\"\"\"say \"hi\"\"\"\""), "say \"hi\"");
        assert_eq!(matched(multiline_literal_string, "'''it''''"), "it'");

        let mut scanner = Scanner::new("\"\"\"a\"\"\"\"\"");
        assert_eq!(multiline_basic_string(&mut scanner).unwrap().unwrap(), "a\"");
        assert_eq!(scanner.current(), Some('"'));
    }

    #[test]
    fn test_multiline_literal_string() {
        assert_eq!(
            matched(multiline_literal_string, "'''\nraw \\n text\n'''"),
            "raw \\n text\n"
        );
        assert!(run(multiline_literal_string, "'''open").is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(matched(symbols, "true"), TomlValue::Bool(true));
        assert_eq!(matched(symbols, "false"), TomlValue::Bool(false));
        assert_eq!(matched(symbols, "+inf"), TomlValue::Number(Number::Infinity));
        assert_eq!(
            matched(symbols, "-inf"),
            TomlValue::Number(Number::NegativeInfinity)
        );
        assert_eq!(matched(symbols, "-nan"), TomlValue::Number(Number::NaN));
        assert_eq!(run(symbols, "maybe").unwrap(), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(matched(integer, "+99"), TomlValue::from(99));
        assert_eq!(matched(integer, "-17"), TomlValue::from(-17));
        assert_eq!(matched(integer, "1_000"), TomlValue::from(1000));
        assert_eq!(matched(integer, "0xDEAD_beef"), TomlValue::from("0xDEAD_beef"));
        assert_eq!(matched(integer, "0o755"), TomlValue::from("0o755"));
        assert_eq!(matched(integer, "0B1101"), TomlValue::from("0B1101"));
        assert!(run(integer, "99999999999999999999").is_err());
    }

    #[test]
    fn test_integer_non_match_restores_cursor() {
        let mut scanner = Scanner::new("-x");
        assert_eq!(integer(&mut scanner).unwrap(), None);
        assert_eq!(scanner.position(), 0);

        let mut scanner = Scanner::new("0x");
        assert_eq!(integer(&mut scanner).unwrap(), None);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn test_float() {
        assert_eq!(matched(float, "3.1415"), TomlValue::from(3.1415));
        assert_eq!(matched(float, "-0.01"), TomlValue::from(-0.01));
        assert_eq!(matched(float, "5e+22"), TomlValue::from(5e22));
        assert_eq!(matched(float, "6.626E-34"), TomlValue::from(6.626e-34));
        assert_eq!(matched(float, "224_617.445_991"), TomlValue::from(224617.445991));
    }

    #[test]
    fn test_float_defers_to_other_recognizers() {
        for input in ["42", "1979-05-27", "07:32:00", "1.2.3", "0x1f", "1.5abc"] {
            let mut scanner = Scanner::new(input);
            assert_eq!(float(&mut scanner).unwrap(), None, "{}", input);
            assert_eq!(scanner.position(), 0, "{}", input);
        }
    }

    #[test]
    fn test_date_time() {
        let expected = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        assert_eq!(
            matched(date_time, "1979-05-27T07:32:00Z"),
            TomlValue::Datetime(expected)
        );
        assert_eq!(
            matched(date_time, "1979-05-27 07:32:00"),
            TomlValue::Datetime(expected)
        );
        assert_eq!(
            matched(date_time, "1979-05-27T00:32:00-07:00"),
            TomlValue::Datetime(expected)
        );
        assert_eq!(
            matched(date_time, "1979-05-27T16:32:00+09:00"),
            TomlValue::Datetime(expected)
        );
        assert_eq!(
            matched(date_time, "1979-05-27"),
            TomlValue::Datetime(Utc.with_ymd_and_hms(1979, 5, 27, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_date_time_truncates_to_milliseconds() {
        let expected = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(
            matched(date_time, "1979-05-27T07:32:00.999999Z"),
            TomlValue::Datetime(expected)
        );
        assert_eq!(
            matched(date_time, "1979-05-27T07:32:00.999999999"),
            TomlValue::Datetime(expected)
        );
    }

    #[test]
    fn test_date_time_commits_after_prefix() {
        assert!(run(date_time, "1979-13-45").is_err());
        assert_eq!(run(date_time, "1979-5-27").unwrap(), None);
    }

    #[test]
    fn test_local_time() {
        assert_eq!(matched(local_time, "07:32:00"), TomlValue::LocalTime("07:32:00".into()));
        assert_eq!(
            matched(local_time, "00:32:00.999999"),
            TomlValue::LocalTime("00:32:00.999999".into())
        );
        assert_eq!(run(local_time, "7:32:00").unwrap(), None);
    }

    #[test]
    fn test_array() {
        assert_eq!(
            matched(array, "[ 1, 2 ,3 ]"),
            TomlValue::Array(vec![1.into(), 2.into(), 3.into()])
        );
        assert_eq!(
            matched(array, "[\n  \"a\", # first\n  'b',\n]"),
            TomlValue::Array(vec!["a".into(), "b".into()])
        );
        assert_eq!(matched(array, "[]"), TomlValue::Array(vec![]));
        assert_eq!(
            matched(array, "[[1], []]"),
            TomlValue::Array(vec![TomlValue::Array(vec![1.into()]), TomlValue::Array(vec![])])
        );
    }

    #[test]
    fn test_array_errors() {
        let err = run(array, "[1,,2]").unwrap_err();
        assert_eq!(err.0, "Array is not closed");
        assert!(run(array, "[1, 2").is_err());
        assert!(run(array, "[1 2]").is_err());
    }

    #[test]
    fn test_inline_table() {
        let TomlValue::Table(table) = matched(inline_table, "{ x = 1, y.z = 'a', y.w = true }")
        else {
            panic!("expected table");
        };
        assert_eq!(table.get("x"), Some(&TomlValue::from(1)));
        let y = table.get("y").and_then(TomlValue::as_table).unwrap();
        assert_eq!(y.get("z"), Some(&TomlValue::from("a")));
        assert_eq!(y.get("w"), Some(&TomlValue::Bool(true)));

        assert_eq!(matched(inline_table, "{}"), TomlValue::Table(TomlMap::new()));
        assert_eq!(matched(inline_table, "{ }"), TomlValue::Table(TomlMap::new()));
        assert!(run(inline_table, "{ x = 1").is_err());
        assert_eq!(run(inline_table, "x").unwrap(), None);
    }
}
