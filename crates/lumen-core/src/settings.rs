// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Persistent engine settings stored as a JSON document.
//!
//! The file is a free-form object; the engine itself only reads and writes the
//! `RenderingAPI` section:
//!
//! ```json
//! { "RenderingAPI": { "API": 385, "Info": "OpenGL (Desktop)" } }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::renderer::{select_rendering_api, BackendSelection, BackendSupport, RenderError, RenderingApi};

const RENDERING_SECTION: &str = "RenderingAPI";

/// The `RenderingAPI` section. `Info` is for humans and ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RenderingApiEntry {
    #[serde(rename = "API")]
    api: u32,
    #[serde(rename = "Info", default)]
    info: String,
}

/// Errors from reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read or written.
    #[error("settings file '{path}' could not be accessed")]
    Io {
        /// The settings file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file does not hold a JSON object.
    #[error("settings file '{path}' is not a valid JSON object: {reason}")]
    Parse {
        /// The settings file.
        path: PathBuf,
        /// What the parser reported.
        reason: String,
    },
    /// Settings were resolved but no rendering API could be selected.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A JSON settings document bound to a file path.
#[derive(Debug, Clone)]
pub struct Settings {
    path: PathBuf,
    data: Value,
}

impl Settings {
    /// Opens the settings at `path`.
    ///
    /// Returns the settings and `true` if an existing file was read, or empty
    /// settings and `false` if the file does not exist yet. Nothing is written
    /// until [`flush`](Self::flush).
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, bool), SettingsError> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings file at '{}', using defaults.", path.display());
                return Ok((
                    Self {
                        path,
                        data: Value::Object(Map::new()),
                    },
                    false,
                ));
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };

        let data: Value = serde_json::from_str(&text).map_err(|e| SettingsError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        if !data.is_object() {
            return Err(SettingsError::Parse {
                path,
                reason: "top-level value is not an object".to_owned(),
            });
        }
        log::debug!("Loaded settings from '{}'.", path.display());
        Ok((Self { path, data }, true))
    }

    /// The file these settings are bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// The whole document, mutably.
    pub fn data_mut(&mut self) -> &mut Value {
        &mut self.data
    }

    /// Writes the document back to its file, creating parent directories.
    pub fn flush(&self) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string_pretty(&self.data).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, text).map_err(io_error)?;
        log::debug!("Settings written to '{}'.", self.path.display());
        Ok(())
    }

    /// The rendering API requested by the file.
    ///
    /// Falls back to [`RenderingApi::DEFAULT`] if the entry is missing or
    /// holds an unknown value.
    pub fn requested_rendering_api(&self) -> RenderingApi {
        let Some(section) = self.data.get(RENDERING_SECTION) else {
            return RenderingApi::DEFAULT;
        };
        match RenderingApiEntry::deserialize(section)
            .ok()
            .and_then(|entry| RenderingApi::from_bits(entry.api))
        {
            Some(api) => api,
            None => {
                log::warn!(
                    "Unknown rendering API {section} in settings, using {}.",
                    RenderingApi::DEFAULT
                );
                RenderingApi::DEFAULT
            }
        }
    }

    /// Records `api` as the rendering API in use.
    pub fn set_rendering_api(&mut self, api: RenderingApi) {
        let entry = RenderingApiEntry {
            api: api.bits(),
            info: api.name().to_owned(),
        };
        let section = match serde_json::to_value(&entry) {
            Ok(section) => section,
            Err(e) => {
                log::error!("Could not encode rendering API entry: {e}");
                return;
            }
        };
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.data {
            map.insert(RENDERING_SECTION.to_owned(), section);
        }
    }
}

/// Reads the requested rendering API, selects a supported one, and persists
/// the choice so the next start needs no fallback.
pub fn resolve_rendering_api(
    settings: &mut Settings,
    support: &dyn BackendSupport,
) -> Result<BackendSelection, SettingsError> {
    let requested = settings.requested_rendering_api();
    let selection = select_rendering_api(requested, support)?;
    settings.set_rendering_api(selection.api);
    settings.flush()?;
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    struct Everything;

    impl BackendSupport for Everything {
        fn is_backend_supported(&self, _api: RenderingApi) -> bool {
            true
        }
    }

    #[test]
    fn missing_file_is_empty_and_not_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let (settings, existed) = Settings::open(&path).unwrap();
        assert!(!existed);
        assert_eq!(settings.data(), &json!({}));
        assert_eq!(settings.requested_rendering_api(), RenderingApi::DEFAULT);
        assert!(!path.exists());
    }

    #[test]
    fn unrelated_keys_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let (mut settings, _) = Settings::open(&path).unwrap();
        settings.data_mut()["Editor"] = json!({ "Theme": "dark" });
        settings.set_rendering_api(RenderingApi::VulkanDesktop);
        settings.flush().unwrap();

        let (reloaded, existed) = Settings::open(&path).unwrap();
        assert!(existed);
        assert_eq!(reloaded.data()["Editor"]["Theme"], "dark");
        assert_eq!(reloaded.requested_rendering_api(), RenderingApi::VulkanDesktop);
        assert_eq!(reloaded.data()["RenderingAPI"]["Info"], "Vulkan (Desktop)");
    }

    #[test]
    fn unknown_api_value_uses_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"RenderingAPI": {"API": 12345}}"#).unwrap();
        let (settings, _) = Settings::open(&path).unwrap();
        assert_eq!(settings.requested_rendering_api(), RenderingApi::DEFAULT);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(Settings::open(&path), Err(SettingsError::Parse { .. })));
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(Settings::open(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn resolve_writes_the_selection_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let (mut settings, _) = Settings::open(&path).unwrap();
        let selection = resolve_rendering_api(&mut settings, &Everything).unwrap();
        assert_eq!(selection.api, RenderingApi::OpenGlDesktop);
        assert!(!selection.fell_back);

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["RenderingAPI"]["API"], 0x181);
        assert_eq!(written["RenderingAPI"]["Info"], "OpenGL (Desktop)");
    }
}
