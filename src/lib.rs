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

//! Core logic for the JSON formatter: parsing, formatting, tree
//! materialization, and text search/replace. Everything here is
//! UI-toolkit free; the GTK binary behind the `gtk-app` feature is a
//! thin adapter over these modules.

pub mod buffer;
pub mod document;
pub mod formatter;
pub mod replace;
pub mod search;
pub mod session;
pub mod settings;
pub mod tree;

pub use buffer::PaneBuffer;
pub use document::{parse_document, ActionError, ParseFailure};
pub use formatter::{format_value, FormatMode};
pub use replace::{replace_all, replace_current};
pub use search::{find, Direction, Match, SearchOptions, SearchState};
pub use session::{Session, ValidationState};
pub use settings::{FontSettings, SettingsStore, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use tree::{build_tree, NodeKind, TreeNode};
