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

//! The window contract consumed by the run loop.

use crate::event::Event;
use crate::math::Extent2D;
use raw_window_handle::RawWindowHandle;

/// Creation parameters for a platform window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowProps {
    /// The window title.
    pub title: String,
    /// Initial inner width in pixels.
    pub width: u32,
    /// Initial inner height in pixels.
    pub height: u32,
    /// Whether presentation waits for vertical blank.
    pub vsync: bool,
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            title: "Lumen Engine".to_owned(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// A trait that abstracts the behavior of a window.
///
/// Any windowing backend can implement this trait to drive the application
/// loop. The window owns the presentation surface; the application only
/// asks it to present and to report what happened since the last frame.
pub trait Window {
    /// Presents the current frame and polls the OS, returning the events
    /// produced by this poll in the order they occurred.
    fn on_update(&mut self) -> Vec<Event>;

    /// Monotonic platform time in seconds.
    fn platform_time(&self) -> f64;

    /// The current inner size of the window.
    fn dimensions(&self) -> Extent2D;

    /// Whether vertical sync is enabled.
    fn is_vsync(&self) -> bool;

    /// Enables or disables vertical sync.
    fn set_vsync(&mut self, enabled: bool);

    /// The raw OS window handle, if the backend has one.
    fn native_window(&self) -> Option<RawWindowHandle>;

    /// The window title.
    fn title(&self) -> &str;
}
