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

//! Thin owner of the single [`RendererApi`] instance.

use crate::math::{Extent2D, LinearRgba};
use crate::renderer::api::{RenderingApi, VertexArray};
use crate::renderer::error::RenderError;
use crate::renderer::traits::RendererApi;
use std::fmt;

/// Forwards drawing primitives to the backend chosen at startup.
pub struct RenderCommand {
    api: Box<dyn RendererApi>,
}

impl RenderCommand {
    /// Takes ownership of the backend.
    pub fn new(api: Box<dyn RendererApi>) -> Self {
        Self { api }
    }

    /// One-time backend setup.
    pub fn init(&mut self) -> Result<(), RenderError> {
        self.api.init()
    }

    /// Sets the viewport rectangle.
    pub fn set_viewport(&mut self, x: u32, y: u32, extent: Extent2D) {
        self.api.set_viewport(x, y, extent);
    }

    /// Sets the clear color.
    pub fn set_clear_color(&mut self, color: LinearRgba) {
        self.api.set_clear_color(color);
    }

    /// Clears the framebuffer.
    pub fn clear(&mut self) {
        self.api.clear();
    }

    /// Issues an indexed draw; `0` draws the whole index buffer.
    pub fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) {
        self.api.draw_indexed(vertex_array, index_count);
    }

    /// Draw calls since the last reset.
    pub fn draw_calls(&self) -> u32 {
        self.api.draw_calls()
    }

    /// Resets the draw call counter.
    pub fn reset_draw_calls(&mut self) {
        self.api.reset_draw_calls();
    }

    /// The backend, for resource factories.
    pub fn api(&self) -> &dyn RendererApi {
        self.api.as_ref()
    }

    /// The backend, mutably.
    pub fn api_mut(&mut self) -> &mut dyn RendererApi {
        self.api.as_mut()
    }

    /// Shorthand for `api().rendering_api()`.
    pub fn rendering_api(&self) -> RenderingApi {
        self.api.rendering_api()
    }
}

impl fmt::Debug for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCommand")
            .field("rendering_api", &self.api.rendering_api())
            .field("draw_calls", &self.api.draw_calls())
            .finish()
    }
}
