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

//! The session controller: orchestrates user actions over the two pane
//! buffers and the display tree.
//!
//! Every action reparses the current input text; no parse result is
//! cached between actions. Each action either returns a status message
//! for the status bar or an [`ActionError`] the caller presents.

use serde_json::Value;

use crate::buffer::PaneBuffer;
use crate::document::{parse_document, ActionError, ParseFailure};
use crate::formatter::{format_value, FormatMode};
use crate::tree::{build_tree, TreeNode};

/// Outcome of the most recent parse attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Idle,
    Parsed,
    ParseError(ParseFailure),
}

#[derive(Debug, Default)]
pub struct Session {
    input: PaneBuffer,
    output: PaneBuffer,
    tree: Option<TreeNode>,
    state: ValidationState,
}

impl Session {
    pub fn new() -> Self {
        Session {
            input: PaneBuffer::editable(),
            output: PaneBuffer::locked(),
            tree: None,
            state: ValidationState::Idle,
        }
    }

    pub fn input(&self) -> &PaneBuffer {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PaneBuffer {
        &mut self.input
    }

    pub fn output(&self) -> &PaneBuffer {
        &self.output
    }

    pub fn set_input(&mut self, text: &str) {
        self.input.set_text(text);
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Fresh parse of the current input; updates the validation state.
    fn reparse(&mut self) -> Result<Value, ActionError> {
        match parse_document(self.input.text()) {
            Ok(value) => {
                self.state = ValidationState::Parsed;
                Ok(value)
            }
            Err(err) => {
                self.state = match &err {
                    ActionError::Parse(failure) => ValidationState::ParseError(failure.clone()),
                    _ => ValidationState::Idle,
                };
                Err(err)
            }
        }
    }

    /// Pretty-prints the input into the output pane and rebuilds the tree.
    pub fn beautify(&mut self) -> Result<&'static str, ActionError> {
        let value = self.reparse()?;
        self.output.set_text(&format_value(&value, FormatMode::Pretty));
        self.tree = Some(build_tree(&value));
        tracing::info!("input formatted");
        Ok("JSON formatted")
    }

    /// Like [`Session::beautify`] with keys sorted at every level.
    pub fn sort(&mut self) -> Result<&'static str, ActionError> {
        let value = self.reparse()?;
        self.output
            .set_text(&format_value(&value, FormatMode::PrettySorted));
        self.tree = Some(build_tree(&value));
        tracing::info!("input sorted and formatted");
        Ok("JSON sorted and formatted")
    }

    /// Minifies into the output pane. The tree is left as-is.
    pub fn minify(&mut self) -> Result<&'static str, ActionError> {
        let value = self.reparse()?;
        self.output
            .set_text(&format_value(&value, FormatMode::Minified));
        tracing::info!("input minified");
        Ok("JSON minified")
    }

    /// Syntax check only; buffers are not touched.
    pub fn validate(&mut self) -> Result<&'static str, ActionError> {
        self.reparse()?;
        Ok("JSON is valid")
    }

    /// Returns the output text for the host clipboard.
    pub fn copy_output(&self) -> Result<&str, ActionError> {
        let text = self.output.text().trim();
        if text.is_empty() {
            return Err(ActionError::EmptyOutput);
        }
        Ok(text)
    }

    /// Empties both panes and the tree.
    pub fn clear(&mut self) -> &'static str {
        self.input.clear();
        self.output.clear();
        self.tree = None;
        self.state = ValidationState::Idle;
        tracing::info!("session cleared");
        "Cleared"
    }
}
