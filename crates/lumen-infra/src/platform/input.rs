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
//! Translation from `winit` window events to the engine's [`Event`] type.
//!
//! This module acts as an adapter layer, decoupling the rest of the engine from
//! the specific event format of the `winit` crate.

use std::collections::HashMap;

use lumen_core::event::{
    Event, KeyCode, KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent, MouseButton,
    MouseButtonPressedEvent, MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent,
    WindowCloseEvent, WindowFocusEvent, WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};
use lumen_core::math::Extent2D;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Stateful translator from `winit` window events to engine events.
///
/// Resize events carry the previous size and key presses carry a repeat
/// count, so the translator remembers the last size and which keys are held.
#[derive(Debug, Default)]
pub struct EventTranslator {
    size: Extent2D,
    repeats: HashMap<KeyCode, u32>,
}

impl EventTranslator {
    /// Creates a translator for a window of the given initial size.
    pub fn new(size: Extent2D) -> Self {
        Self {
            size,
            repeats: HashMap::new(),
        }
    }

    /// The size reported by the last resize.
    pub fn size(&self) -> Extent2D {
        self.size
    }

    /// Translates one window event into zero or more engine events.
    ///
    /// A key press producing text also yields a [`KeyTypedEvent`] per
    /// printable character.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<Event> {
        match event {
            WindowEvent::CloseRequested => vec![WindowCloseEvent.into()],
            WindowEvent::Resized(size) => vec![self.resize(size.width, size.height)],
            WindowEvent::Moved(position) => vec![WindowMovedEvent {
                x: position.x,
                y: position.y,
            }
            .into()],
            WindowEvent::Focused(true) => vec![WindowFocusEvent.into()],
            WindowEvent::Focused(false) => {
                self.repeats.clear();
                vec![WindowLostFocusEvent.into()]
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return Vec::new();
                };
                let key = map_keycode(code);
                match key_event.state {
                    ElementState::Pressed => {
                        let mut events = vec![self.key_pressed(key, key_event.repeat)];
                        if let Some(text) = &key_event.text {
                            events.extend(typed_characters(text));
                        }
                        events
                    }
                    ElementState::Released => vec![self.key_released(key)],
                }
            }
            WindowEvent::CursorMoved { position, .. } => vec![MouseMovedEvent {
                x: position.x as f32,
                y: position.y as f32,
            }
            .into()],
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button);
                match state {
                    ElementState::Pressed => vec![MouseButtonPressedEvent::new(button).into()],
                    ElementState::Released => vec![MouseButtonReleasedEvent::new(button).into()],
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x_offset, y_offset): (f32, f32) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
                };
                if x_offset != 0.0 || y_offset != 0.0 {
                    vec![MouseScrolledEvent { x_offset, y_offset }.into()]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> Event {
        let previous = self.size;
        self.size = Extent2D::new(width, height);
        WindowResizeEvent::new(width, height, previous.width, previous.height).into()
    }

    fn key_pressed(&mut self, key: KeyCode, repeat: bool) -> Event {
        let count = self.repeats.entry(key).or_insert(0);
        if repeat {
            *count += 1;
        } else {
            *count = 0;
        }
        KeyPressedEvent::new(key, *count).into()
    }

    fn key_released(&mut self, key: KeyCode) -> Event {
        self.repeats.remove(&key);
        KeyReleasedEvent::new(key).into()
    }
}

fn typed_characters(text: &str) -> impl Iterator<Item = Event> + '_ {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|character| KeyTypedEvent { character }.into())
}

/// Maps a physical `winit` key to the engine's key code.
pub fn map_keycode(code: WinitKeyCode) -> KeyCode {
    match code {
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyB => KeyCode::B,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyE => KeyCode::E,
        WinitKeyCode::KeyF => KeyCode::F,
        WinitKeyCode::KeyG => KeyCode::G,
        WinitKeyCode::KeyH => KeyCode::H,
        WinitKeyCode::KeyI => KeyCode::I,
        WinitKeyCode::KeyJ => KeyCode::J,
        WinitKeyCode::KeyK => KeyCode::K,
        WinitKeyCode::KeyL => KeyCode::L,
        WinitKeyCode::KeyM => KeyCode::M,
        WinitKeyCode::KeyN => KeyCode::N,
        WinitKeyCode::KeyO => KeyCode::O,
        WinitKeyCode::KeyP => KeyCode::P,
        WinitKeyCode::KeyQ => KeyCode::Q,
        WinitKeyCode::KeyR => KeyCode::R,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyT => KeyCode::T,
        WinitKeyCode::KeyU => KeyCode::U,
        WinitKeyCode::KeyV => KeyCode::V,
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyX => KeyCode::X,
        WinitKeyCode::KeyY => KeyCode::Y,
        WinitKeyCode::KeyZ => KeyCode::Z,
        WinitKeyCode::Digit0 => KeyCode::Digit0,
        WinitKeyCode::Digit1 => KeyCode::Digit1,
        WinitKeyCode::Digit2 => KeyCode::Digit2,
        WinitKeyCode::Digit3 => KeyCode::Digit3,
        WinitKeyCode::Digit4 => KeyCode::Digit4,
        WinitKeyCode::Digit5 => KeyCode::Digit5,
        WinitKeyCode::Digit6 => KeyCode::Digit6,
        WinitKeyCode::Digit7 => KeyCode::Digit7,
        WinitKeyCode::Digit8 => KeyCode::Digit8,
        WinitKeyCode::Digit9 => KeyCode::Digit9,
        WinitKeyCode::F1 => KeyCode::F1,
        WinitKeyCode::F2 => KeyCode::F2,
        WinitKeyCode::F3 => KeyCode::F3,
        WinitKeyCode::F4 => KeyCode::F4,
        WinitKeyCode::F5 => KeyCode::F5,
        WinitKeyCode::F6 => KeyCode::F6,
        WinitKeyCode::F7 => KeyCode::F7,
        WinitKeyCode::F8 => KeyCode::F8,
        WinitKeyCode::F9 => KeyCode::F9,
        WinitKeyCode::F10 => KeyCode::F10,
        WinitKeyCode::F11 => KeyCode::F11,
        WinitKeyCode::F12 => KeyCode::F12,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
        WinitKeyCode::Tab => KeyCode::Tab,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::ArrowLeft => KeyCode::Left,
        WinitKeyCode::ArrowRight => KeyCode::Right,
        WinitKeyCode::ArrowUp => KeyCode::Up,
        WinitKeyCode::ArrowDown => KeyCode::Down,
        WinitKeyCode::ShiftLeft => KeyCode::LeftShift,
        WinitKeyCode::ShiftRight => KeyCode::RightShift,
        WinitKeyCode::ControlLeft => KeyCode::LeftControl,
        WinitKeyCode::ControlRight => KeyCode::RightControl,
        WinitKeyCode::AltLeft => KeyCode::LeftAlt,
        WinitKeyCode::AltRight => KeyCode::RightAlt,
        _ => KeyCode::Unknown,
    }
}

/// Maps a `winit` mouse button to the engine's mouse button.
pub fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::DeviceId;

    /// Keys map by physical position.
    #[test]
    fn test_map_keycode() {
        assert_eq!(map_keycode(WinitKeyCode::KeyW), KeyCode::W);
        assert_eq!(map_keycode(WinitKeyCode::Digit1), KeyCode::Digit1);
        assert_eq!(map_keycode(WinitKeyCode::ControlRight), KeyCode::RightControl);
        assert_eq!(map_keycode(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(map_keycode(WinitKeyCode::CapsLock), KeyCode::Unknown);
    }

    #[test]
    fn test_map_mouse_button() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(8)), MouseButton::Other(8));
    }

    /// Resize events carry the size reported by the previous resize.
    #[test]
    fn test_resize_tracks_previous_size() {
        let mut translator = EventTranslator::new(Extent2D::new(1280, 720));
        let events = translator.translate(&WindowEvent::Resized(PhysicalSize::new(0, 0)));
        assert_eq!(events, vec![Event::from(WindowResizeEvent::new(0, 0, 1280, 720))]);

        let events = translator.translate(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(events, vec![Event::from(WindowResizeEvent::new(800, 600, 0, 0))]);
        assert_eq!(translator.size(), Extent2D::new(800, 600));
    }

    #[test]
    fn test_key_repeats_are_counted_until_release() {
        let mut translator = EventTranslator::default();
        assert_eq!(
            translator.key_pressed(KeyCode::A, false),
            Event::from(KeyPressedEvent::new(KeyCode::A, 0))
        );
        translator.key_pressed(KeyCode::A, true);
        assert_eq!(
            translator.key_pressed(KeyCode::A, true),
            Event::from(KeyPressedEvent::new(KeyCode::A, 2))
        );
        translator.key_released(KeyCode::A);
        assert_eq!(
            translator.key_pressed(KeyCode::A, true),
            Event::from(KeyPressedEvent::new(KeyCode::A, 1))
        );
    }

    #[test]
    fn test_window_events() {
        let mut translator = EventTranslator::default();
        assert_eq!(
            translator.translate(&WindowEvent::CloseRequested),
            vec![Event::from(WindowCloseEvent)]
        );
        assert_eq!(
            translator.translate(&WindowEvent::Focused(false)),
            vec![Event::from(WindowLostFocusEvent)]
        );
        assert_eq!(
            translator.translate(&WindowEvent::Moved(PhysicalPosition::new(10, -20))),
            vec![Event::from(WindowMovedEvent { x: 10, y: -20 })]
        );
    }

    #[test]
    fn test_mouse_events() {
        let mut translator = EventTranslator::default();
        let moved = WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(12.0, 34.0),
        };
        assert_eq!(
            translator.translate(&moved),
            vec![Event::from(MouseMovedEvent { x: 12.0, y: 34.0 })]
        );

        let no_scroll = WindowEvent::MouseWheel {
            device_id: DeviceId::dummy(),
            delta: MouseScrollDelta::LineDelta(0.0, 0.0),
            phase: winit::event::TouchPhase::Moved,
        };
        assert!(translator.translate(&no_scroll).is_empty());

        let pressed = WindowEvent::MouseInput {
            device_id: DeviceId::dummy(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Right,
        };
        assert_eq!(
            translator.translate(&pressed),
            vec![Event::from(MouseButtonPressedEvent::new(MouseButton::Right))]
        );
    }

    #[test]
    fn test_typed_characters_skip_control() {
        let typed: Vec<_> = typed_characters("a\r").collect();
        assert_eq!(typed, vec![Event::from(KeyTypedEvent { character: 'a' })]);
    }
}
