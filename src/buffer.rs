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

/// A text pane's content plus its edit policy.
///
/// The read-only flag guards user-level mutation (replace operations);
/// the session controller itself always may overwrite the content, which
/// is how the output pane gets its formatted text.
#[derive(Debug, Clone, Default)]
pub struct PaneBuffer {
    text: String,
    read_only: bool,
}

impl PaneBuffer {
    /// An editable buffer (the input pane).
    pub fn editable() -> Self {
        PaneBuffer {
            text: String::new(),
            read_only: false,
        }
    }

    /// A read-only buffer (the output pane).
    pub fn locked() -> Self {
        PaneBuffer {
            text: String::new(),
            read_only: true,
        }
    }

    pub fn with_text(text: &str, read_only: bool) -> Self {
        PaneBuffer {
            text: text.to_string(),
            read_only,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Splices `replacement` over `start..end` (byte offsets).
    ///
    /// Returns false without mutating if the buffer is read-only. The
    /// range must lie on character boundaries of the current text.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.text.replace_range(start..end, replacement);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_range_editable() {
        let mut buffer = PaneBuffer::with_text("hello world", false);
        assert!(buffer.replace_range(0, 5, "goodbye"));
        assert_eq!(buffer.text(), "goodbye world");
    }

    #[test]
    fn test_replace_range_read_only() {
        let mut buffer = PaneBuffer::with_text("hello", true);
        assert!(!buffer.replace_range(0, 5, "x"));
        assert_eq!(buffer.text(), "hello");
    }

    #[test]
    fn test_set_text_allowed_on_read_only() {
        let mut buffer = PaneBuffer::locked();
        buffer.set_text("formatted output");
        assert_eq!(buffer.text(), "formatted output");
    }
}
