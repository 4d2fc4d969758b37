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

//! Font-size preferences, persisted as JSON under
//! `<config>/JSONFormatter/FontSettings.json`.
//!
//! The text-pane size is immediate-apply: every change persists at once.
//! The UI-label size is stage-then-commit: [`SettingsStore::stage_ui_font_size`]
//! holds a pending value that only takes effect (and persists) on
//! [`SettingsStore::commit`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const MIN_FONT_SIZE: i32 = 1;
pub const MAX_FONT_SIZE: i32 = 999;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub text_font_size: i32,
    pub ui_font_size: i32,
}

impl Default for FontSettings {
    fn default() -> Self {
        FontSettings {
            text_font_size: 12,
            ui_font_size: 14,
        }
    }
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    live: FontSettings,
    staged_ui_font_size: i32,
}

impl SettingsStore {
    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("JSONFormatter")
            .join("FontSettings.json")
    }

    /// Loads settings from the default location, falling back to
    /// defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let live = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("ignoring malformed font settings: {}", e);
                    FontSettings::default()
                }
            },
            Err(_) => FontSettings::default(),
        };
        SettingsStore {
            path,
            staged_ui_font_size: live.ui_font_size,
            live,
        }
    }

    /// The settings currently in effect.
    pub fn font(&self) -> FontSettings {
        self.live
    }

    pub fn staged_ui_font_size(&self) -> i32 {
        self.staged_ui_font_size
    }

    /// Sets the text-pane font size; applies and persists immediately.
    pub fn set_text_font_size(&mut self, size: i32) {
        self.live.text_font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.persist();
    }

    /// Steps the text-pane font size by `delta` (modifier+scroll).
    pub fn adjust_text_font_size(&mut self, delta: i32) {
        self.set_text_font_size(self.live.text_font_size + delta);
    }

    /// Stages a pending UI-label size; nothing is applied or persisted
    /// until [`SettingsStore::commit`].
    pub fn stage_ui_font_size(&mut self, size: i32) {
        self.staged_ui_font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    /// Applies the staged UI-label size and persists everything.
    pub fn commit(&mut self) {
        self.live.ui_font_size = self.staged_ui_font_size;
        self.persist();
    }

    /// Synchronous write; a failure is logged and otherwise ignored
    /// (a two-integer preference store does not warrant recovery).
    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("failed to persist font settings: {}", e);
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.live)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
