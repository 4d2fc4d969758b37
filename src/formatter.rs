// Copyright (C) 2025 Arjun Guha
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Serialization policy for the output pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// 4-space indentation, keys in original insertion order.
    Pretty,
    /// As `Pretty`, with object keys sorted lexicographically at every level.
    PrettySorted,
    /// Single line, no whitespace outside string literals.
    Minified,
}

/// Serializes a JSON value according to the requested mode.
///
/// Pure: the input value is never mutated. Non-ASCII characters are
/// emitted literally, not escaped.
pub fn format_value(value: &Value, mode: FormatMode) -> String {
    match mode {
        FormatMode::Pretty => pretty(value),
        FormatMode::PrettySorted => pretty(&sort_keys(value)),
        FormatMode::Minified => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Pretty-prints with a 4-space indent and `", "`/`": "` separators.
fn pretty(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

/// Returns a copy of `value` with object keys sorted at every nesting level.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, val) in entries {
                sorted.insert(key.clone(), sort_keys(val));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    #[test]
    fn test_pretty_four_space_indent() {
        let value = parse_document(r#"{"a": [1,2,3]}"#).unwrap();
        let text = format_value(&value, FormatMode::Pretty);
        assert_eq!(
            text,
            "{\n    \"a\": [\n        1,\n        2,\n        3\n    ]\n}"
        );
    }

    #[test]
    fn test_pretty_keeps_insertion_order() {
        let value = parse_document(r#"{"b": 1, "a": 2}"#).unwrap();
        let text = format_value(&value, FormatMode::Pretty);
        assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
    }

    #[test]
    fn test_sorted_scenario() {
        let value = parse_document(r#"{"b":1,"a":2}"#).unwrap();
        let text = format_value(&value, FormatMode::PrettySorted);
        assert_eq!(text, "{\n    \"a\": 2,\n    \"b\": 1\n}");
    }

    #[test]
    fn test_sorted_at_every_level() {
        let value = parse_document(r#"{"z": {"c": 1, "a": 2}, "m": [{"y": 1, "x": 2}]}"#).unwrap();
        let text = format_value(&value, FormatMode::PrettySorted);
        fn keys_ascending(value: &Value) -> bool {
            match value {
                Value::Object(map) => {
                    let keys: Vec<&String> = map.keys().collect();
                    keys.windows(2).all(|w| w[0] < w[1])
                        && map.values().all(keys_ascending)
                }
                Value::Array(items) => items.iter().all(keys_ascending),
                _ => true,
            }
        }
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert!(keys_ascending(&reparsed));
    }

    #[test]
    fn test_minified_scenario() {
        let value = parse_document(r#"{"a": [1,2,3]}"#).unwrap();
        assert_eq!(format_value(&value, FormatMode::Minified), r#"{"a":[1,2,3]}"#);
    }

    #[test]
    fn test_minify_no_whitespace_outside_strings() {
        let value = parse_document(r#"{"a b": "c d", "e": [1, 2]}"#).unwrap();
        let text = format_value(&value, FormatMode::Minified);
        let mut in_string = false;
        let mut escaped = false;
        for ch in text.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' if in_string => escaped = true,
                '"' => in_string = !in_string,
                c if c.is_whitespace() => assert!(in_string, "bare whitespace in {:?}", text),
                _ => {}
            }
        }
    }

    #[test]
    fn test_round_trip_pretty() {
        let source = r#"{"b": {"y": [1, 2.5, null]}, "a": ["x", true, false], "c": "é 中文"}"#;
        let value = parse_document(source).unwrap();
        let text = format_value(&value, FormatMode::Pretty);
        let reparsed = parse_document(&text).unwrap();
        assert_eq!(value, reparsed);
    }

    #[test]
    fn test_pretty_idempotent() {
        let value = parse_document(r#"{"b": [1, {"k": "v"}], "a": null}"#).unwrap();
        let once = format_value(&value, FormatMode::Pretty);
        let twice = format_value(&parse_document(&once).unwrap(), FormatMode::Pretty);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_non_ascii_preserved() {
        let value = parse_document(r#"{"msg": "héllo 世界"}"#).unwrap();
        let text = format_value(&value, FormatMode::Minified);
        assert!(text.contains("héllo 世界"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let value = parse_document(r#"{"b": 1, "a": 2}"#).unwrap();
        let _ = format_value(&value, FormatMode::PrettySorted);
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
