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

//! Typed event dispatch.

use super::{Event, EventType};
use std::ops::{BitOr, BitOrAssign};

/// Whether a handler stage consumed an event.
///
/// Returned by layers and accumulated by [`EventDispatcher`]. The application
/// stops routing an event at the first stage reporting [`Propagation::Handled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Keep routing the event to lower stages.
    #[default]
    Unhandled,
    /// Stop routing the event.
    Handled,
}

impl Propagation {
    /// Returns `true` for [`Propagation::Handled`].
    #[inline]
    pub const fn is_handled(self) -> bool {
        matches!(self, Propagation::Handled)
    }
}

impl From<bool> for Propagation {
    #[inline]
    fn from(handled: bool) -> Self {
        if handled {
            Propagation::Handled
        } else {
            Propagation::Unhandled
        }
    }
}

impl BitOr for Propagation {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        (self.is_handled() || rhs.is_handled()).into()
    }
}

impl BitOrAssign for Propagation {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Routes one event to handlers written against its concrete payload type.
///
/// ```
/// use lumen_core::event::*;
///
/// let event: Event = WindowCloseEvent.into();
/// let mut dispatcher = EventDispatcher::new(&event);
/// assert!(!dispatcher.dispatch::<KeyPressedEvent>(|_| true));
/// assert!(dispatcher.dispatch::<WindowCloseEvent>(|_| true));
/// assert!(dispatcher.is_handled());
/// ```
#[derive(Debug)]
pub struct EventDispatcher<'a> {
    event: &'a Event,
    handled: Propagation,
}

impl<'a> EventDispatcher<'a> {
    /// Binds a dispatcher to `event`, starting unhandled.
    pub fn new(event: &'a Event) -> Self {
        Self {
            event,
            handled: Propagation::Unhandled,
        }
    }

    /// Invokes `handler` if the event is an `E`.
    ///
    /// Returns `true` when the kinds matched, whatever the handler returned.
    /// The handler's result is OR-ed into the accumulated state. The accumulated
    /// state is never consulted here: a second matching dispatch still runs.
    pub fn dispatch<E: EventType>(&mut self, handler: impl FnOnce(&E) -> bool) -> bool {
        match E::from_event(self.event) {
            Some(payload) => {
                self.handled |= Propagation::from(handler(payload));
                true
            }
            None => false,
        }
    }

    /// The event being dispatched.
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// Returns `true` once any matched handler returned `true`.
    pub fn is_handled(&self) -> bool {
        self.handled.is_handled()
    }

    /// The OR of every matched handler's result.
    pub fn propagation(&self) -> Propagation {
        self.handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyCode, KeyPressedEvent, KeyReleasedEvent, WindowResizeEvent};
    use std::cell::Cell;

    #[test]
    fn mismatched_kind_skips_handler() {
        let event: Event = KeyPressedEvent::new(KeyCode::A, 0).into();
        let mut dispatcher = EventDispatcher::new(&event);
        let called = Cell::new(false);
        let matched = dispatcher.dispatch::<KeyReleasedEvent>(|_| {
            called.set(true);
            true
        });
        assert!(!matched);
        assert!(!called.get());
        assert_eq!(dispatcher.propagation(), Propagation::Unhandled);
    }

    #[test]
    fn both_matching_handlers_run_and_state_is_or() {
        let event: Event = KeyPressedEvent::new(KeyCode::A, 0).into();
        let mut dispatcher = EventDispatcher::new(&event);
        let calls = Cell::new(0);

        assert!(dispatcher.dispatch::<KeyPressedEvent>(|e| {
            assert_eq!(e.key, KeyCode::A);
            calls.set(calls.get() + 1);
            true
        }));
        assert!(dispatcher.is_handled());

        assert!(dispatcher.dispatch::<KeyPressedEvent>(|_| {
            calls.set(calls.get() + 1);
            false
        }));
        assert_eq!(calls.get(), 2);
        assert!(dispatcher.is_handled());
    }

    #[test]
    fn matched_but_declined_stays_unhandled() {
        let event: Event = WindowResizeEvent::new(10, 10, 0, 0).into();
        let mut dispatcher = EventDispatcher::new(&event);
        assert!(dispatcher.dispatch::<WindowResizeEvent>(|_| false));
        assert!(!dispatcher.is_handled());
    }

    #[test]
    fn propagation_or() {
        use Propagation::*;
        assert_eq!(Unhandled | Unhandled, Unhandled);
        assert_eq!(Unhandled | Handled, Handled);
        assert_eq!(Handled | Unhandled, Handled);
        let mut p = Unhandled;
        p |= Handled;
        assert!(p.is_handled());
    }
}
