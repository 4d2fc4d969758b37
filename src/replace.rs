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

//! Substitution built on top of the search engine.
//!
//! Both operations are no-ops on a read-only buffer and with an empty
//! query, reporting zero replacements.

use crate::buffer::PaneBuffer;
use crate::search::{scan_forward, SearchOptions, SearchState};

/// Replaces the currently selected match, if it still equals the query.
///
/// Returns 1 when a substitution happened, 0 otherwise. When there is no
/// selection, or the selection no longer matches the query under the
/// active case rule, this call only locates the next match; the
/// replacement happens on the following invocation. That two-step
/// behavior is intentional: the first press after opening the replace
/// bar finds rather than replaces.
pub fn replace_current(
    buffer: &mut PaneBuffer,
    state: &mut SearchState,
    replacement: &str,
) -> usize {
    if buffer.is_read_only() || state.query().is_empty() {
        return 0;
    }

    let Some(selection) = state.selection() else {
        state.find_next(buffer.text());
        return 0;
    };

    let selected = &buffer.text()[selection.start..selection.end];
    if !text_matches(selected, state.query(), state.options.case_sensitive) {
        state.find_next(buffer.text());
        return 0;
    }

    buffer.replace_range(selection.start, selection.end, replacement);
    state.resume_at(selection.start + replacement.len());
    state.find_next(buffer.text());
    1
}

/// Replaces every occurrence of `query` in one forward pass.
///
/// The scan resumes after each inserted replacement, so a replacement
/// containing the query is never re-examined. The caller is expected to
/// have confirmed the operation with the user before invoking this.
pub fn replace_all(
    buffer: &mut PaneBuffer,
    query: &str,
    replacement: &str,
    options: SearchOptions,
) -> usize {
    if buffer.is_read_only() || query.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut pos = 0;
    while let Some(hit) = scan_forward(buffer.text(), query, pos, options) {
        buffer.replace_range(hit.start, hit.end, replacement);
        pos = hit.start + replacement.len();
        count += 1;
    }
    count
}

fn text_matches(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
    }
}
