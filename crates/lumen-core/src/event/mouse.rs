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

//! Mouse event payloads.

use super::codes::MouseButton;
use super::impl_event_type;
use std::fmt;

/// A mouse button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressedEvent {
    /// The button.
    pub button: MouseButton,
}

impl MouseButtonPressedEvent {
    /// Creates a button press.
    pub const fn new(button: MouseButton) -> Self {
        Self { button }
    }
}

/// A mouse button went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleasedEvent {
    /// The button.
    pub button: MouseButton,
}

impl MouseButtonReleasedEvent {
    /// Creates a button release.
    pub const fn new(button: MouseButton) -> Self {
        Self { button }
    }
}

/// The cursor moved, in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMovedEvent {
    /// Cursor x.
    pub x: f32,
    /// Cursor y.
    pub y: f32,
}

/// The wheel or trackpad scrolled. Positive `y_offset` scrolls up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolledEvent {
    /// Horizontal scroll.
    pub x_offset: f32,
    /// Vertical scroll.
    pub y_offset: f32,
}

impl fmt::Display for MouseButtonPressedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonPressedEvent: {:?}", self.button)
    }
}

impl fmt::Display for MouseButtonReleasedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseButtonReleasedEvent: {:?}", self.button)
    }
}

impl fmt::Display for MouseMovedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseMovedEvent: {}, {}", self.x, self.y)
    }
}

impl fmt::Display for MouseScrolledEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MouseScrolledEvent: {}, {}", self.x_offset, self.y_offset)
    }
}

impl_event_type! {
    MouseButtonPressedEvent => MouseButtonPressed,
    MouseButtonReleasedEvent => MouseButtonReleased,
    MouseMovedEvent => MouseMoved,
    MouseScrolledEvent => MouseScrolled,
}
