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

//! Startup configuration for an [`Application`](crate::Application).

use std::path::PathBuf;
use std::time::Duration;

use lumen_core::platform::WindowProps;

/// How an application is started: its window and where it keeps its settings.
///
/// Built with `Default` and refined with the `with_*` methods:
///
/// ```
/// use lumen_sdk::ApplicationSpecification;
///
/// let spec = ApplicationSpecification::default()
///     .with_name("Sandbox")
///     .with_dimensions(1600, 900)
///     .with_vsync(false);
/// assert_eq!(spec.width, 1600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSpecification {
    /// The application name, also used as the window title.
    pub name: String,
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Whether the window starts with vertical sync.
    pub vsync: bool,
    /// The JSON settings file holding the requested rendering API.
    pub settings_path: PathBuf,
    /// How long the loop sleeps per frame while the window is minimized.
    pub minimized_frame_interval: Duration,
}

impl Default for ApplicationSpecification {
    fn default() -> Self {
        Self {
            name: "Lumen Application".to_owned(),
            width: 1280,
            height: 720,
            vsync: true,
            settings_path: PathBuf::from("config/settings.json"),
            minimized_frame_interval: Duration::from_millis(16),
        }
    }
}

impl ApplicationSpecification {
    /// Sets the application name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the initial window size.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the initial vsync state.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Sets the settings file location.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Sets the per-frame sleep used while minimized.
    pub fn with_minimized_frame_interval(mut self, interval: Duration) -> Self {
        self.minimized_frame_interval = interval;
        self
    }

    /// The window creation parameters this specification describes.
    pub fn window_props(&self) -> WindowProps {
        WindowProps {
            title: self.name.clone(),
            width: self.width,
            height: self.height,
            vsync: self.vsync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let spec = ApplicationSpecification::default()
            .with_name("Editor")
            .with_settings_path("/tmp/editor.json")
            .with_minimized_frame_interval(Duration::from_millis(50));
        assert_eq!(spec.name, "Editor");
        assert_eq!(spec.width, 1280);
        assert_eq!(spec.settings_path, PathBuf::from("/tmp/editor.json"));
        assert_eq!(spec.minimized_frame_interval, Duration::from_millis(50));
    }

    #[test]
    fn window_props_follow_spec() {
        let props = ApplicationSpecification::default()
            .with_name("Sandbox")
            .with_dimensions(800, 600)
            .with_vsync(false)
            .window_props();
        assert_eq!(props.title, "Sandbox");
        assert_eq!((props.width, props.height), (800, 600));
        assert!(!props.vsync);
    }
}
