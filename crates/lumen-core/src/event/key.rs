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

//! Keyboard event payloads.

use super::codes::KeyCode;
use super::impl_event_type;
use std::fmt;

/// A key went down. `repeat_count` is non-zero for OS auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressedEvent {
    /// The physical key.
    pub key: KeyCode,
    /// How many auto-repeats this press represents.
    pub repeat_count: u32,
}

impl KeyPressedEvent {
    /// Creates a key press.
    pub const fn new(key: KeyCode, repeat_count: u32) -> Self {
        Self { key, repeat_count }
    }

    /// Returns `true` if this press is an auto-repeat.
    pub const fn is_repeat(&self) -> bool {
        self.repeat_count > 0
    }
}

impl fmt::Display for KeyPressedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KeyPressedEvent: {:?} ({} repeats)",
            self.key, self.repeat_count
        )
    }
}

/// A key went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleasedEvent {
    /// The physical key.
    pub key: KeyCode,
}

impl KeyReleasedEvent {
    /// Creates a key release.
    pub const fn new(key: KeyCode) -> Self {
        Self { key }
    }
}

impl fmt::Display for KeyReleasedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyReleasedEvent: {:?}", self.key)
    }
}

/// Text input produced by the keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTypedEvent {
    /// The typed character.
    pub character: char,
}

impl fmt::Display for KeyTypedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyTypedEvent: {:?}", self.character)
    }
}

impl_event_type! {
    KeyPressedEvent => KeyPressed,
    KeyReleasedEvent => KeyReleased,
    KeyTypedEvent => KeyTyped,
}
