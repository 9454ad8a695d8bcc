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

use super::GraphicsDevice;
use crate::math::{Extent2D, LinearRgba};
use crate::renderer::api::{RenderingApi, VertexArray, WindowingApi};
use crate::renderer::error::RenderError;

/// Per-frame drawing primitives of the active graphics backend.
///
/// Exactly one instance exists per application, owned by its
/// [`RenderCommand`](crate::renderer::RenderCommand).
pub trait RendererApi: GraphicsDevice {
    /// One-time driver state setup (blending, depth test).
    fn init(&mut self) -> Result<(), RenderError>;

    /// Sets the viewport rectangle.
    fn set_viewport(&mut self, x: u32, y: u32, extent: Extent2D);

    /// Sets the color used by [`clear`](Self::clear).
    fn set_clear_color(&mut self, color: LinearRgba);

    /// Clears the color and depth buffers.
    fn clear(&mut self);

    /// Draws `index_count` indices of the array's index buffer.
    /// `0` draws the whole index buffer.
    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32);

    /// The rendering API this backend implements.
    fn rendering_api(&self) -> RenderingApi;

    /// The windowing API, derived from [`rendering_api`](Self::rendering_api).
    fn windowing_api(&self) -> WindowingApi {
        self.rendering_api().windowing_api()
    }

    /// Draw calls issued since the last reset.
    fn draw_calls(&self) -> u32;

    /// Resets the draw call counter.
    fn reset_draw_calls(&mut self);
}

/// Resolves the index count for an indexed draw: `0` means the whole bound index buffer.
pub fn resolve_index_count(vertex_array: &dyn VertexArray, index_count: u32) -> u32 {
    if index_count != 0 {
        return index_count;
    }
    vertex_array
        .index_buffer()
        .map(|buffer| buffer.count())
        .unwrap_or(0)
}
