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
//! Graphics backends and the capability table used for backend selection.

mod backends;
pub mod opengl;

pub use self::backends::PlatformBackends;

use lumen_core::renderer::{RenderError, RendererApi, RenderingApi};

use crate::platform::window::WinitWindow;

/// Builds the renderer backend for `api` on top of `window`.
///
/// The window must have been created with a GL context; every other API is
/// declared but not implemented.
///
/// # Errors
///
/// [`RenderError::ContextCreation`] if the window has no GL context, and
/// [`RenderError::NoSupportedBackend`] for APIs without an implementation.
#[cfg_attr(not(feature = "opengl"), allow(unused_variables))]
pub fn create_renderer_api(
    window: &WinitWindow,
    api: RenderingApi,
) -> Result<Box<dyn RendererApi>, RenderError> {
    match api {
        #[cfg(feature = "opengl")]
        RenderingApi::OpenGlDesktop => {
            let gl = window.gl_context().ok_or_else(|| {
                RenderError::ContextCreation("window has no OpenGL context".to_owned())
            })?;
            Ok(Box::new(opengl::GlRendererApi::new(gl)))
        }
        other => {
            log::error!("Rendering API {other} has no backend implementation.");
            Err(RenderError::NoSupportedBackend)
        }
    }
}
