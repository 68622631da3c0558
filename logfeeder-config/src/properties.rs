//! Parser for the `.properties` text format
//!
//! Supports `key=value`, `key: value` and `key value` entries, `#` and `!`
//! comment lines, backslash line continuations and the usual escapes
//! (`\t`, `\n`, `\r`, `\f`, `\uXXXX`). Any other escaped character stands
//! for itself, which is how `\=`, `\:` and `\ ` end up inside keys.

use crate::error::{ConfigError, ConfigResult};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text into `(key, value)` pairs in file order.
///
/// Duplicate keys are returned as they appear; callers decide which wins.
pub fn parse_properties(input: &str) -> ConfigResult<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for (line_no, line) in logical_lines(input) {
        let (raw_key, raw_value) = split_entry(&line);
        let key = unescape(raw_key, line_no)?;
        let value = unescape(raw_value, line_no)?;
        entries.push((key, value));
    }
    Ok(entries)
}

/// Join continued lines and drop blanks and comments.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (idx, raw) in physical_lines(input).enumerate() {
        let trimmed = raw.trim_start_matches(WHITESPACE);
        match current.take() {
            Some((line_no, mut buf)) => {
                let (content, continues) = strip_continuation(trimmed);
                buf.push_str(content);
                if continues {
                    current = Some((line_no, buf));
                } else {
                    lines.push((line_no, buf));
                }
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                let (content, continues) = strip_continuation(trimmed);
                let entry = (idx + 1, content.to_string());
                if continues {
                    current = Some(entry);
                } else {
                    lines.push(entry);
                }
            }
        }
    }

    // A continuation on the last line of the input just ends the entry.
    if let Some(entry) = current {
        lines.push(entry);
    }
    lines
}

/// Lines end at `\n`, `\r\n` or a lone `\r`.
fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, next) = match rest.find(['\r', '\n']) {
            Some(i) if rest[i..].starts_with("\r\n") => (&rest[..i], &rest[i + 2..]),
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        rest = next;
        Some(line)
    })
}

/// An odd number of trailing backslashes marks a continuation.
fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    if trailing % 2 == 1 {
        (&line[..line.len() - 1], true)
    } else {
        (line, false)
    }
}

/// Split a logical line at the first unescaped separator.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut explicit_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                explicit_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if explicit_separator {
        rest = rest[1..].trim_start_matches(WHITESPACE);
    } else {
        rest = rest.trim_start_matches(WHITESPACE);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped.trim_start_matches(WHITESPACE);
        }
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> ConfigResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out);
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let unit = (hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| ConfigError::ParseError {
                        line,
                        message: format!("malformed \\uXXXX encoding '\\u{}'", hex),
                    })?;
                units.push(unit);
            }
            Some(other) => {
                flush_units(&mut units, &mut out);
                out.push(match other {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    c => c,
                });
            }
            None => {}
        }
    }
    flush_units(&mut units, &mut out);
    Ok(out)
}

/// Decode pending `\u` escapes, which may form surrogate pairs.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(String, String)> {
        parse_properties(input).unwrap()
    }

    #[test]
    fn test_separators() {
        let parsed = pairs("a=1\nb: 2\nc 3\nd   =   4\ne\n");
        assert_eq!(
            parsed,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
                ("d".to_string(), "4".to_string()),
                ("e".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let parsed = pairs("# comment\n! other comment\n\n   \ncluster.name=cl1\n");
        assert_eq!(parsed, vec![("cluster.name".to_string(), "cl1".to_string())]);
    }

    #[test]
    fn test_line_continuation() {
        let parsed = pairs("logfeeder.solr.urls=http://a:8983,\\\n    http://b:8983\n");
        assert_eq!(parsed[0].1, "http://a:8983,http://b:8983");
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let parsed = pairs("path=c:\\\\temp\\\\\nnext=1\n");
        assert_eq!(parsed[0].1, "c:\\temp\\");
        assert_eq!(parsed[1].0, "next");
    }

    #[test]
    fn test_escapes_in_keys_and_values() {
        let parsed = pairs("my\\ key\\=x=tab\\there\nuni=caf\\u00e9\n");
        assert_eq!(parsed[0], ("my key=x".to_string(), "tab\there".to_string()));
        assert_eq!(parsed[1].1, "café");
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let parsed = pairs("emoji=\\ud83d\\ude00\n");
        assert_eq!(parsed[0].1, "😀");
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = parse_properties("\n\nbad=\\u12\n").unwrap_err();
        match err {
            ConfigError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unicode_escape_requires_four_hex_digits() {
        for input in ["k=\\u+041", "k=\\u-041", "k=\\u 041", "k=\\u00g1"] {
            let err = parse_properties(input).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { line: 1, .. }), "{input}");
        }
        assert_eq!(pairs("k=\\u0041\\u004A")[0].1, "AJ");
    }

    #[test]
    fn test_line_terminators() {
        let expected = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ];
        assert_eq!(pairs("a=1\rb=2\r"), expected);
        assert_eq!(pairs("a=1\r\nb=2\r\n"), expected);
        assert_eq!(pairs("a=1\n\rb=2"), expected);

        let parsed = pairs("urls=x,\\\r  y\r# note\rlast=\\u0041");
        assert_eq!(parsed[0].1, "x,y");
        assert_eq!(parsed[1], ("last".to_string(), "A".to_string()));

        let err = parse_properties("a=1\rb=2\rbad=\\u12").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_value_keeps_trailing_whitespace_and_separators() {
        let parsed = pairs("k = a=b:c  \n");
        assert_eq!(parsed[0].1, "a=b:c  ");
    }
}
