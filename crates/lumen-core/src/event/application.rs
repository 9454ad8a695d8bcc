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

//! Window and application lifecycle event payloads.

use super::impl_event_type;
use crate::math::Extent2D;
use std::fmt;

/// The user or the OS asked the window to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCloseEvent;

/// The window framebuffer changed size.
///
/// A zero width or height means the window was minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResizeEvent {
    /// New width in pixels.
    pub width: u32,
    /// New height in pixels.
    pub height: u32,
    /// Width before the resize.
    pub previous_width: u32,
    /// Height before the resize.
    pub previous_height: u32,
}

impl WindowResizeEvent {
    /// Creates a resize event from the new and previous dimensions.
    pub const fn new(width: u32, height: u32, previous_width: u32, previous_height: u32) -> Self {
        Self {
            width,
            height,
            previous_width,
            previous_height,
        }
    }

    /// The new dimensions.
    pub const fn extent(&self) -> Extent2D {
        Extent2D::new(self.width, self.height)
    }

    /// The dimensions before the resize.
    pub const fn previous_extent(&self) -> Extent2D {
        Extent2D::new(self.previous_width, self.previous_height)
    }
}

impl fmt::Display for WindowResizeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WindowResizeEvent: {}x{} (was {}x{})",
            self.width, self.height, self.previous_width, self.previous_height
        )
    }
}

/// The window gained keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFocusEvent;

/// The window lost keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowLostFocusEvent;

/// The window moved; coordinates are the new top-left corner in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMovedEvent {
    /// Screen x of the window origin.
    pub x: i32,
    /// Screen y of the window origin.
    pub y: i32,
}

impl fmt::Display for WindowMovedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowMovedEvent: {}, {}", self.x, self.y)
    }
}

/// A fixed-rate application tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppTickEvent;

/// An application update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppUpdateEvent;

/// An application render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppRenderEvent;

impl_event_type! {
    WindowCloseEvent => WindowClose,
    WindowResizeEvent => WindowResize,
    WindowFocusEvent => WindowFocus,
    WindowLostFocusEvent => WindowLostFocus,
    WindowMovedEvent => WindowMoved,
    AppTickEvent => AppTick,
    AppUpdateEvent => AppUpdate,
    AppRenderEvent => AppRender,
}
