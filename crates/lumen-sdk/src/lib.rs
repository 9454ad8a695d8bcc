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

//! # Lumen SDK
//!
//! The public face of the engine. Build an [`ApplicationSpecification`], push
//! your layers in the setup closure, and hand both to [`run`]:
//!
//! ```no_run
//! use lumen_sdk::prelude::*;
//!
//! struct Hello;
//!
//! impl Layer for Hello {
//!     fn on_update(&mut self, ctx: &mut LayerContext<'_>, _ts: Timestep) {
//!         ctx.renderer.set_clear_color(LinearRgba::new(0.1, 0.1, 0.1, 1.0));
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     lumen_sdk::run(ApplicationSpecification::default(), |app| {
//!         app.push_layer(Hello)?;
//!         Ok(())
//!     })
//! }
//! ```

#![warn(missing_docs)]

mod application;
mod debug_overlay;
mod error;
mod specification;

pub use application::{AppState, Application};
pub use debug_overlay::{DebugOverlay, FrameStats};
pub use error::ApplicationError;
pub use specification::ApplicationSpecification;

use anyhow::Context;

/// Creates the application, runs it, and rebuilds it for as long as it asks
/// to restart.
///
/// `setup` is called on every fresh application, before its loop starts, to
/// push the client's layers.
///
/// # Errors
///
/// Startup failures of the application and any error returned by `setup`.
pub fn run<F>(spec: ApplicationSpecification, mut setup: F) -> anyhow::Result<()>
where
    F: FnMut(&mut Application) -> anyhow::Result<()>,
{
    log::info!("Lumen SDK: Starting...");
    let mut app = Application::new(spec).context("failed to start the application")?;
    loop {
        setup(&mut app).context("application setup failed")?;
        app.run();
        if !app.should_restart() {
            break;
        }
        app = app.restart().context("failed to restart the application")?;
    }
    log::info!("Lumen SDK: Shut down cleanly.");
    Ok(())
}

/// A "prelude" for users of the Lumen SDK.
///
/// Re-exports the types needed to write layers and start an application.
pub mod prelude {
    pub use crate::{AppState, Application, ApplicationSpecification, DebugOverlay};
    pub use lumen_core::event::{
        Event, EventDispatcher, KeyCode, KeyPressedEvent, MouseButton, MouseScrolledEvent,
        Propagation, WindowResizeEvent,
    };
    pub use lumen_core::layer::{Layer, LayerContext, LayerId, LoopControl};
    pub use lumen_core::math::{Extent2D, LinearRgba, Mat4, Vec2, Vec3, Vec4};
    pub use lumen_core::platform::{Input, Window};
    pub use lumen_core::renderer::{
        OrthographicCamera, OrthographicCameraController, Renderer, Renderer2D, Texture2D,
    };
    pub use lumen_core::utils::timer::Timestep;
}
