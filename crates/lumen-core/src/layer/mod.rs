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
//! Composable units of per-frame work.
//!
//! A [`Layer`] receives attach/detach notifications, an update and a UI pass
//! every frame, and the events the window produced. Layers are owned by a
//! [`LayerStack`], which decides the order in which they see all of those.

mod stack;

pub use self::stack::LayerStack;

use std::fmt;

use crate::event::{Event, Propagation};
use crate::platform::{Input, Window};
use crate::renderer::Renderer;
use crate::utils::timer::Timestep;

/// A unique handle for a layer, issued by the [`LayerStack`] when it is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer#{}", self.0)
    }
}

/// Requests a layer can make of the run loop.
///
/// The loop reads these after each frame; a layer never stops the loop
/// directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopControl {
    close: bool,
    restart: bool,
}

impl LoopControl {
    /// Creates a control block with no pending request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the loop to shut down after the current frame.
    pub fn request_close(&mut self) {
        self.close = true;
    }

    /// Asks the loop to shut down and build a fresh application.
    pub fn request_restart(&mut self) {
        self.close = true;
        self.restart = true;
    }

    /// Whether a shutdown was requested.
    pub fn close_requested(&self) -> bool {
        self.close
    }

    /// Whether a restart was requested.
    pub fn restart_requested(&self) -> bool {
        self.restart
    }
}

/// Everything a layer may touch during a hook.
///
/// Built by the run loop for the duration of one call; layers must not
/// keep it.
pub struct LayerContext<'a> {
    /// The scene renderer. Its backend is the factory for GPU resources.
    pub renderer: &'a mut Renderer,
    /// The application window.
    pub window: &'a mut dyn Window,
    /// Keyboard and mouse state as of the last processed event.
    pub input: &'a Input,
    /// Requests for the run loop.
    pub control: &'a mut LoopControl,
}

impl fmt::Debug for LayerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("renderer", &self.renderer)
            .field("window", &self.window.title())
            .field("input", &self.input)
            .field("control", &self.control)
            .finish()
    }
}

/// Brackets the UI sub-pass of a frame.
///
/// The run loop calls [`begin`](UiPass::begin) once, then `on_ui_render` on
/// every layer, then [`end`](UiPass::end).
pub trait UiPass {
    /// Opens the UI frame.
    fn begin(&mut self, ctx: &mut LayerContext<'_>);
    /// Closes the UI frame and submits it.
    fn end(&mut self, ctx: &mut LayerContext<'_>);
}

/// A unit of per-frame work owned by a [`LayerStack`].
///
/// Every hook has a no-op default, so a layer implements only what it needs.
pub trait Layer {
    /// A name for logs.
    fn name(&self) -> &str {
        "Layer"
    }

    /// Called once when the layer enters a running application.
    ///
    /// # Errors
    ///
    /// A failure here aborts the push; the layer is not added.
    fn on_attach(&mut self, _ctx: &mut LayerContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once when the layer leaves the application.
    fn on_detach(&mut self) {}

    /// Called every non-minimized frame, in stack order.
    fn on_update(&mut self, _ctx: &mut LayerContext<'_>, _ts: Timestep) {}

    /// Called every non-minimized frame inside the UI pass.
    fn on_ui_render(&mut self, _ctx: &mut LayerContext<'_>, _ts: Timestep) {}

    /// Called for events in reverse stack order until one returns
    /// [`Propagation::Handled`].
    fn on_event(&mut self, _event: &Event) -> Propagation {
        Propagation::Unhandled
    }

    /// The UI pass this layer provides, if any.
    fn ui_pass(&mut self) -> Option<&mut dyn UiPass> {
        None
    }
}
