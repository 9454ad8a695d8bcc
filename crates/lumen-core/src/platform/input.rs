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

//! Polled input state.
//!
//! [`Input`] is fed every event before dispatch, so layers can ask "is W held?"
//! during `on_update` without tracking key events themselves.

use std::collections::HashSet;

use crate::event::{Event, KeyCode, MouseButton};
use crate::math::Vec2;

/// Snapshot of the keyboard and mouse built from the event stream.
#[derive(Debug, Default, Clone)]
pub struct Input {
    keys: HashSet<KeyCode>,
    buttons: HashSet<MouseButton>,
    mouse_position: Vec2,
}

impl Input {
    /// Creates an empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state. Non-input events are ignored.
    pub fn on_event(&mut self, event: &Event) {
        match event {
            Event::KeyPressed(e) => {
                self.keys.insert(e.key);
            }
            Event::KeyReleased(e) => {
                self.keys.remove(&e.key);
            }
            Event::MouseButtonPressed(e) => {
                self.buttons.insert(e.button);
            }
            Event::MouseButtonReleased(e) => {
                self.buttons.remove(&e.button);
            }
            Event::MouseMoved(e) => {
                self.mouse_position = Vec2::new(e.x, e.y);
            }
            // Releases are lost while unfocused.
            Event::WindowLostFocus(_) => {
                self.keys.clear();
                self.buttons.clear();
            }
            _ => {}
        }
    }

    /// Returns `true` while `key` is held.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Returns `true` while either control key is held.
    pub fn is_control_pressed(&self) -> bool {
        self.keys.iter().any(|key| key.is_control())
    }

    /// Returns `true` while `button` is held.
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    /// The last known cursor position in window pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        KeyPressedEvent, KeyReleasedEvent, MouseButtonPressedEvent, MouseButtonReleasedEvent,
        MouseMovedEvent, WindowLostFocusEvent,
    };

    #[test]
    fn tracks_keys_and_buttons() {
        let mut input = Input::new();
        input.on_event(&KeyPressedEvent::new(KeyCode::W, 0).into());
        input.on_event(&MouseButtonPressedEvent::new(MouseButton::Right).into());
        assert!(input.is_key_pressed(KeyCode::W));
        assert!(input.is_mouse_button_pressed(MouseButton::Right));

        input.on_event(&KeyReleasedEvent::new(KeyCode::W).into());
        input.on_event(&MouseButtonReleasedEvent::new(MouseButton::Right).into());
        assert!(!input.is_key_pressed(KeyCode::W));
        assert!(!input.is_mouse_button_pressed(MouseButton::Right));
    }

    #[test]
    fn tracks_cursor_and_control() {
        let mut input = Input::new();
        input.on_event(&MouseMovedEvent { x: 12.0, y: 34.0 }.into());
        assert_eq!(input.mouse_position(), Vec2::new(12.0, 34.0));

        assert!(!input.is_control_pressed());
        input.on_event(&KeyPressedEvent::new(KeyCode::RightControl, 0).into());
        assert!(input.is_control_pressed());
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut input = Input::new();
        input.on_event(&KeyPressedEvent::new(KeyCode::A, 0).into());
        input.on_event(&WindowLostFocusEvent.into());
        assert!(!input.is_key_pressed(KeyCode::A));
    }
}
