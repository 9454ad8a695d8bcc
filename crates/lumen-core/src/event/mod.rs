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

//! Window, application and input events.
//!
//! An [`Event`] is produced by the platform window at the point of occurrence,
//! handed to the application for dispatch, and dropped once dispatch finishes.
//! Events are never queued across frames.
//!
//! Each variant wraps a payload struct implementing [`EventType`], which is what
//! [`EventDispatcher::dispatch`] is generic over.

pub mod application;
pub mod codes;
pub mod dispatcher;
pub mod key;
pub mod mouse;

pub use self::application::{
    AppRenderEvent, AppTickEvent, AppUpdateEvent, WindowCloseEvent, WindowFocusEvent,
    WindowLostFocusEvent, WindowMovedEvent, WindowResizeEvent,
};
pub use self::codes::{KeyCode, MouseButton};
pub use self::dispatcher::{EventDispatcher, Propagation};
pub use self::key::{KeyPressedEvent, KeyReleasedEvent, KeyTypedEvent};
pub use self::mouse::{
    MouseButtonPressedEvent, MouseButtonReleasedEvent, MouseMovedEvent, MouseScrolledEvent,
};

use std::fmt;

crate::lumen_bitflags! {
    /// Coarse classification of events, used for filtering.
    pub struct EventCategory: u8 {
        /// Window and application lifecycle events.
        const APPLICATION = 1 << 0;
        /// Any user input.
        const INPUT = 1 << 1;
        /// Keyboard input.
        const KEYBOARD = 1 << 2;
        /// Mouse movement, scrolling and buttons.
        const MOUSE = 1 << 3;
        /// Mouse button presses and releases.
        const MOUSE_BUTTON = 1 << 4;
    }
}

/// The immutable kind tag of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The window was asked to close.
    WindowClose,
    /// The window framebuffer changed size.
    WindowResize,
    /// The window gained focus.
    WindowFocus,
    /// The window lost focus.
    WindowLostFocus,
    /// The window moved on screen.
    WindowMoved,
    /// A fixed-rate application tick.
    AppTick,
    /// An application update.
    AppUpdate,
    /// An application render.
    AppRender,
    /// A key went down or auto-repeated.
    KeyPressed,
    /// A key went up.
    KeyReleased,
    /// A character was typed.
    KeyTyped,
    /// A mouse button went down.
    MouseButtonPressed,
    /// A mouse button went up.
    MouseButtonReleased,
    /// The cursor moved.
    MouseMoved,
    /// The mouse wheel scrolled.
    MouseScrolled,
}

impl EventKind {
    /// The categories every event of this kind belongs to.
    pub const fn categories(self) -> EventCategory {
        use EventKind::*;
        match self {
            WindowClose | WindowResize | WindowFocus | WindowLostFocus | WindowMoved | AppTick
            | AppUpdate | AppRender => EventCategory::APPLICATION,
            KeyPressed | KeyReleased | KeyTyped => EventCategory::from_bits_retain(
                EventCategory::INPUT.bits() | EventCategory::KEYBOARD.bits(),
            ),
            MouseMoved | MouseScrolled => EventCategory::from_bits_retain(
                EventCategory::INPUT.bits() | EventCategory::MOUSE.bits(),
            ),
            MouseButtonPressed | MouseButtonReleased => EventCategory::from_bits_retain(
                EventCategory::INPUT.bits()
                    | EventCategory::MOUSE.bits()
                    | EventCategory::MOUSE_BUTTON.bits(),
            ),
        }
    }

    /// A static, human readable name for the kind.
    pub const fn name(self) -> &'static str {
        use EventKind::*;
        match self {
            WindowClose => "WindowClose",
            WindowResize => "WindowResize",
            WindowFocus => "WindowFocus",
            WindowLostFocus => "WindowLostFocus",
            WindowMoved => "WindowMoved",
            AppTick => "AppTick",
            AppUpdate => "AppUpdate",
            AppRender => "AppRender",
            KeyPressed => "KeyPressed",
            KeyReleased => "KeyReleased",
            KeyTyped => "KeyTyped",
            MouseButtonPressed => "MouseButtonPressed",
            MouseButtonReleased => "MouseButtonReleased",
            MouseMoved => "MouseMoved",
            MouseScrolled => "MouseScrolled",
        }
    }
}

/// A single window or input occurrence.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// See [`WindowCloseEvent`].
    WindowClose(WindowCloseEvent),
    /// See [`WindowResizeEvent`].
    WindowResize(WindowResizeEvent),
    /// See [`WindowFocusEvent`].
    WindowFocus(WindowFocusEvent),
    /// See [`WindowLostFocusEvent`].
    WindowLostFocus(WindowLostFocusEvent),
    /// See [`WindowMovedEvent`].
    WindowMoved(WindowMovedEvent),
    /// See [`AppTickEvent`].
    AppTick(AppTickEvent),
    /// See [`AppUpdateEvent`].
    AppUpdate(AppUpdateEvent),
    /// See [`AppRenderEvent`].
    AppRender(AppRenderEvent),
    /// See [`KeyPressedEvent`].
    KeyPressed(KeyPressedEvent),
    /// See [`KeyReleasedEvent`].
    KeyReleased(KeyReleasedEvent),
    /// See [`KeyTypedEvent`].
    KeyTyped(KeyTypedEvent),
    /// See [`MouseButtonPressedEvent`].
    MouseButtonPressed(MouseButtonPressedEvent),
    /// See [`MouseButtonReleasedEvent`].
    MouseButtonReleased(MouseButtonReleasedEvent),
    /// See [`MouseMovedEvent`].
    MouseMoved(MouseMovedEvent),
    /// See [`MouseScrolledEvent`].
    MouseScrolled(MouseScrolledEvent),
}

impl Event {
    /// The kind tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::WindowClose(_) => EventKind::WindowClose,
            Event::WindowResize(_) => EventKind::WindowResize,
            Event::WindowFocus(_) => EventKind::WindowFocus,
            Event::WindowLostFocus(_) => EventKind::WindowLostFocus,
            Event::WindowMoved(_) => EventKind::WindowMoved,
            Event::AppTick(_) => EventKind::AppTick,
            Event::AppUpdate(_) => EventKind::AppUpdate,
            Event::AppRender(_) => EventKind::AppRender,
            Event::KeyPressed(_) => EventKind::KeyPressed,
            Event::KeyReleased(_) => EventKind::KeyReleased,
            Event::KeyTyped(_) => EventKind::KeyTyped,
            Event::MouseButtonPressed(_) => EventKind::MouseButtonPressed,
            Event::MouseButtonReleased(_) => EventKind::MouseButtonReleased,
            Event::MouseMoved(_) => EventKind::MouseMoved,
            Event::MouseScrolled(_) => EventKind::MouseScrolled,
        }
    }

    /// The category bitmask of this event.
    pub fn categories(&self) -> EventCategory {
        self.kind().categories()
    }

    /// Returns `true` if the event belongs to any of the given categories.
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.categories().intersects(category)
    }

    /// The name of the event kind.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::WindowResize(e) => write!(f, "{e}"),
            Event::WindowMoved(e) => write!(f, "{e}"),
            Event::KeyPressed(e) => write!(f, "{e}"),
            Event::KeyReleased(e) => write!(f, "{e}"),
            Event::KeyTyped(e) => write!(f, "{e}"),
            Event::MouseButtonPressed(e) => write!(f, "{e}"),
            Event::MouseButtonReleased(e) => write!(f, "{e}"),
            Event::MouseMoved(e) => write!(f, "{e}"),
            Event::MouseScrolled(e) => write!(f, "{e}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Implemented by every event payload so it can be dispatched by type.
pub trait EventType: Sized {
    /// The kind tag of this payload type.
    const KIND: EventKind;

    /// Borrows the payload out of `event` if the kinds match.
    fn from_event(event: &Event) -> Option<&Self>;
}

/// Wires a payload struct to its [`Event`] variant: `EventType` plus `From`.
macro_rules! impl_event_type {
    ($($payload:ident => $variant:ident),+ $(,)?) => {
        $(
            impl $crate::event::EventType for $payload {
                const KIND: $crate::event::EventKind = $crate::event::EventKind::$variant;

                fn from_event(event: &$crate::event::Event) -> Option<&Self> {
                    match event {
                        $crate::event::Event::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for $crate::event::Event {
                fn from(payload: $payload) -> Self {
                    $crate::event::Event::$variant(payload)
                }
            }
        )+
    };
}
pub(crate) use impl_event_type;
