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

//! Plain-text search over a pane buffer.
//!
//! Matches are byte ranges on character boundaries of the buffer. The
//! engine returns at most one match per call; [`SearchState`] advances a
//! cursor so consecutive calls walk successive occurrences, wrapping at
//! the buffer edges. A match is metadata only: highlighting is applied
//! by the renderer and cleared on the next search or edit.

/// A search hit as a half-open `[start, end)` byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    /// Require the match to be bounded by non-word characters or buffer
    /// edges on both sides. Word characters are alphanumerics and `_`.
    pub whole_word: bool,
}

/// Finds one occurrence of `query` in `buffer`.
///
/// Forward search returns the first match starting at or after `from`;
/// backward search returns the nearest match ending at or before `from`.
/// If the pass reaches the buffer edge without a hit, the search wraps
/// around once; `None` means the query occurs nowhere in the buffer.
/// An empty query is a no-op.
pub fn find(
    buffer: &str,
    query: &str,
    from: usize,
    direction: Direction,
    options: SearchOptions,
) -> Option<Match> {
    if query.is_empty() {
        return None;
    }
    let from = from.min(buffer.len());

    match direction {
        Direction::Forward => scan_forward(buffer, query, from, options)
            .or_else(|| (from > 0).then(|| scan_forward(buffer, query, 0, options)).flatten()),
        Direction::Backward => scan_backward(buffer, query, from, options).or_else(|| {
            (from < buffer.len())
                .then(|| scan_backward(buffer, query, buffer.len(), options))
                .flatten()
        }),
    }
}

/// First match starting at or after `from`, without wraparound.
pub(crate) fn scan_forward(
    buffer: &str,
    query: &str,
    from: usize,
    options: SearchOptions,
) -> Option<Match> {
    let mut pos = ceil_char_boundary(buffer, from);
    while pos < buffer.len() {
        if let Some(end) = match_at(buffer, pos, query, options.case_sensitive) {
            if !options.whole_word || is_whole_word(buffer, pos, end) {
                return Some(Match { start: pos, end });
            }
        }
        pos = next_char_boundary(buffer, pos);
    }
    None
}

/// Nearest match ending at or before `from`, without wraparound.
fn scan_backward(buffer: &str, query: &str, from: usize, options: SearchOptions) -> Option<Match> {
    let mut pos = floor_char_boundary(buffer, from);
    loop {
        if let Some(end) = match_at(buffer, pos, query, options.case_sensitive) {
            if end <= from && (!options.whole_word || is_whole_word(buffer, pos, end)) {
                return Some(Match { start: pos, end });
            }
        }
        if pos == 0 {
            return None;
        }
        pos = prev_char_boundary(buffer, pos);
    }
}

/// Checks whether `query` matches the buffer contents beginning at
/// `start`, returning the end offset of the matched span.
///
/// Case-insensitive comparison lowercase-folds one character at a time,
/// so the matched span in the buffer can differ in byte length from the
/// query.
fn match_at(buffer: &str, start: usize, query: &str, case_sensitive: bool) -> Option<usize> {
    if case_sensitive {
        return buffer[start..]
            .starts_with(query)
            .then(|| start + query.len());
    }

    let mut hay = buffer[start..].char_indices();
    let mut end = start;
    for qc in query.chars() {
        let (offset, hc) = hay.next()?;
        if !chars_eq_fold(hc, qc) {
            return None;
        }
        end = start + offset + hc.len_utf8();
    }
    Some(end)
}

fn chars_eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_whole_word(buffer: &str, start: usize, end: usize) -> bool {
    let before_ok = buffer[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !is_word_char(c));
    let after_ok = buffer[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, i: usize) -> usize {
    ceil_char_boundary(s, i + 1)
}

fn prev_char_boundary(s: &str, i: usize) -> usize {
    floor_char_boundary(s, i.saturating_sub(1))
}

/// Per-pane search state: the active query, its flags, and the cursor
/// from which the next find proceeds.
///
/// Changing the query resets the cursor to the buffer start and drops
/// the selection. The cursor is clamped against the buffer on every
/// find, so a shrunken buffer cannot leave it out of range.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    pub options: SearchOptions,
    cursor: usize,
    selection: Option<Match>,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        if query != self.query {
            self.query = query.to_string();
            self.cursor = 0;
            self.selection = None;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The match located by the most recent find, if any.
    pub fn selection(&self) -> Option<Match> {
        self.selection
    }

    /// Drops the selection after a document change; stored spans would
    /// otherwise dangle into the old text.
    pub fn invalidate(&mut self) {
        self.selection = None;
    }

    /// Continues scanning from `offset`, dropping the selection.
    pub fn resume_at(&mut self, offset: usize) {
        self.cursor = offset;
        self.selection = None;
    }

    /// Finds the next occurrence after the cursor, wrapping at the end.
    /// On a hit the cursor advances to the match end.
    pub fn find_next(&mut self, buffer: &str) -> Option<Match> {
        let hit = find(
            buffer,
            &self.query,
            self.cursor.min(buffer.len()),
            Direction::Forward,
            self.options,
        );
        match hit {
            Some(m) => {
                self.cursor = m.end;
                self.selection = Some(m);
            }
            None => self.selection = None,
        }
        hit
    }

    /// Finds the previous occurrence before the current selection (or
    /// cursor), wrapping at the start. On a hit the cursor moves to the
    /// match start.
    pub fn find_previous(&mut self, buffer: &str) -> Option<Match> {
        let from = self
            .selection
            .map(|m| m.start)
            .unwrap_or(self.cursor)
            .min(buffer.len());
        let hit = find(buffer, &self.query, from, Direction::Backward, self.options);
        match hit {
            Some(m) => {
                self.cursor = m.start;
                self.selection = Some(m);
            }
            None => self.selection = None,
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> SearchOptions {
        SearchOptions::default()
    }

    #[test]
    fn test_forward_basic() {
        let m = find("hello world", "world", 0, Direction::Forward, opts()).unwrap();
        assert_eq!((m.start, m.end), (6, 11));
    }

    #[test]
    fn test_empty_query_is_noop() {
        assert_eq!(find("abc", "", 0, Direction::Forward, opts()), None);
        assert_eq!(find("abc", "", 3, Direction::Backward, opts()), None);
    }

    #[test]
    fn test_no_match_after_wrap() {
        assert_eq!(find("abc", "zzz", 1, Direction::Forward, opts()), None);
    }

    #[test]
    fn test_forward_wraparound() {
        // Start past the last match: wraps to the first occurrence.
        let buffer = "abcXabcXabc";
        let m = find(buffer, "abc", 9, Direction::Forward, opts()).unwrap();
        assert_eq!((m.start, m.end), (0, 3));
    }

    #[test]
    fn test_backward_wraparound() {
        let buffer = "abcXabcXabc";
        let m = find(buffer, "abc", 2, Direction::Backward, opts()).unwrap();
        assert_eq!((m.start, m.end), (8, 11));
    }

    #[test]
    fn test_backward_nearest_before() {
        let buffer = "abcXabcXabc";
        let m = find(buffer, "abc", 7, Direction::Backward, opts()).unwrap();
        assert_eq!((m.start, m.end), (4, 7));
    }

    #[test]
    fn test_case_insensitive() {
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: false,
        };
        let m = find("Hello WORLD", "world", 0, Direction::Forward, options).unwrap();
        assert_eq!((m.start, m.end), (6, 11));
    }

    #[test]
    fn test_case_sensitive_misses() {
        let options = SearchOptions {
            case_sensitive: true,
            whole_word: false,
        };
        assert_eq!(find("Hello WORLD", "world", 0, Direction::Forward, options), None);
    }

    #[test]
    fn test_whole_word() {
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: true,
        };
        let buffer = "cat catalog cat";
        let first = find(buffer, "cat", 0, Direction::Forward, options).unwrap();
        assert_eq!((first.start, first.end), (0, 3));
        let second = find(buffer, "cat", first.end, Direction::Forward, options).unwrap();
        // Skips the substring inside "catalog".
        assert_eq!((second.start, second.end), (12, 15));
    }

    #[test]
    fn test_whole_word_underscore_is_word_char() {
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: true,
        };
        let m = find("foo_bar foo", "foo", 0, Direction::Forward, options).unwrap();
        assert_eq!((m.start, m.end), (8, 11));
    }

    #[test]
    fn test_query_equals_buffer() {
        let m = find("exact", "exact", 0, Direction::Forward, opts()).unwrap();
        assert_eq!((m.start, m.end), (0, 5));
    }

    #[test]
    fn test_multibyte_buffer_offsets() {
        let buffer = "héllo wörld wörld";
        let m = find(buffer, "wörld", 0, Direction::Forward, opts()).unwrap();
        assert_eq!(&buffer[m.start..m.end], "wörld");
        let next = find(buffer, "wörld", m.end, Direction::Forward, opts()).unwrap();
        assert!(next.start > m.start);
        assert_eq!(&buffer[next.start..next.end], "wörld");
    }

    #[test]
    fn test_case_fold_multibyte() {
        let options = SearchOptions {
            case_sensitive: false,
            whole_word: false,
        };
        let m = find("saw Örn there", "örn", 0, Direction::Forward, options).unwrap();
        assert_eq!(&"saw Örn there"[m.start..m.end], "Örn");
    }

    #[test]
    fn test_state_walks_matches_then_wraps() {
        let buffer = "abcXabcXabc";
        let mut state = SearchState::default();
        state.set_query("abc");
        let hits: Vec<(usize, usize)> = (0..4)
            .map(|_| {
                let m = state.find_next(buffer).unwrap();
                (m.start, m.end)
            })
            .collect();
        assert_eq!(hits, vec![(0, 3), (4, 7), (8, 11), (0, 3)]);
    }

    #[test]
    fn test_state_query_change_resets_cursor() {
        let mut state = SearchState::default();
        state.set_query("abc");
        state.find_next("abcXabc");
        assert_eq!(state.cursor(), 3);
        state.set_query("X");
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_state_find_previous_from_selection() {
        let buffer = "abcXabcXabc";
        let mut state = SearchState::default();
        state.set_query("abc");
        state.find_next(buffer);
        state.find_next(buffer); // selection at (4, 7)
        let m = state.find_previous(buffer).unwrap();
        assert_eq!((m.start, m.end), (0, 3));
    }

    #[test]
    fn test_state_cursor_clamped_on_shrunk_buffer() {
        let mut state = SearchState::default();
        state.set_query("ab");
        state.find_next("xxxxab");
        assert_eq!(state.cursor(), 6);
        // Buffer shrank since the last find; the next call must not panic.
        let m = state.find_next("ab").unwrap();
        assert_eq!((m.start, m.end), (0, 2));
    }

    #[test]
    fn test_overlapping_matches_not_returned_together() {
        let buffer = "aaa";
        let mut state = SearchState::default();
        state.set_query("aa");
        let first = state.find_next(buffer).unwrap();
        assert_eq!((first.start, first.end), (0, 2));
        // Cursor sits at the end of the first hit, so the overlapping
        // occurrence at offset 1 is skipped and the search wraps.
        let second = state.find_next(buffer).unwrap();
        assert_eq!((second.start, second.end), (0, 2));
    }
}
