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

use serde_json::Value;
use thiserror::Error;

/// Location and description of a JSON syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// 1-based line of the first offending character.
    pub line: usize,
    /// 1-based column of the first offending character.
    pub column: usize,
    pub message: String,
}

/// Errors surfaced by session actions.
///
/// None of these are fatal: every error is reported at the triggering
/// action and leaves the buffers unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("invalid JSON at line {}, column {}: {}", .0.line, .0.column, .0.message)]
    Parse(ParseFailure),
    #[error("no JSON text to process")]
    EmptyInput,
    #[error("nothing to copy")]
    EmptyOutput,
}

impl ActionError {
    /// Empty-input and empty-output conditions are warnings, not failures.
    pub fn is_warning(&self) -> bool {
        matches!(self, ActionError::EmptyInput | ActionError::EmptyOutput)
    }
}

/// Parses raw input text into a JSON value.
///
/// Blank or whitespace-only input is reported as [`ActionError::EmptyInput`]
/// rather than a parse failure. Malformed JSON is reported with the
/// 1-based line and column of the error.
///
/// Object key insertion order is preserved, so a parsed value can be
/// re-serialized without reordering keys.
pub fn parse_document(text: &str) -> Result<Value, ActionError> {
    if text.trim().is_empty() {
        return Err(ActionError::EmptyInput);
    }

    serde_json::from_str(text).map_err(|e| {
        ActionError::Parse(ParseFailure {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_object() {
        let value = parse_document(r#"{"name": "test", "value": 42}"#).unwrap();
        assert_eq!(value["name"], "test");
        assert_eq!(value["value"], 42);
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let value = parse_document(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_document(""), Err(ActionError::EmptyInput));
        assert_eq!(parse_document("   \n\t  "), Err(ActionError::EmptyInput));
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = parse_document("{bad json").unwrap_err();
        match err {
            ActionError::Parse(failure) => {
                assert_eq!(failure.line, 1);
                assert!(failure.column >= 2);
                assert!(!failure.message.is_empty());
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_multiline_position() {
        let err = parse_document("{\n    \"a\": 1,\n    oops\n}").unwrap_err();
        match err {
            ActionError::Parse(failure) => assert_eq!(failure.line, 3),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_warning_classification() {
        assert!(ActionError::EmptyInput.is_warning());
        assert!(ActionError::EmptyOutput.is_warning());
        let err = parse_document("{").unwrap_err();
        assert!(!err.is_warning());
    }
}
