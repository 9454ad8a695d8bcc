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
//! The OpenGL implementation of [`RendererApi`].

use std::path::Path;
use std::rc::Rc;

use glow::HasContext;
use lumen_core::math::{Extent2D, LinearRgba};
use lumen_core::renderer::traits::resolve_index_count;
use lumen_core::renderer::{
    GraphicsDevice, IndexBuffer, RenderError, RendererApi, RenderingApi, ResourceError, Shader,
    ShaderError, ShaderSources, Texture2D, VertexArray, VertexBuffer,
};

use super::{gl_size, GlIndexBuffer, GlShader, GlTexture2D, GlVertexArray, GlVertexBuffer};

/// Draws through a shared `glow` context and counts draw calls.
pub struct GlRendererApi {
    gl: Rc<glow::Context>,
    draw_calls: u32,
}

impl GlRendererApi {
    /// Wraps a context that is current on this thread.
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl, draw_calls: 0 }
    }

    /// The shared GL function table.
    pub fn context(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}

impl std::fmt::Debug for GlRendererApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlRendererApi")
            .field("draw_calls", &self.draw_calls)
            .finish()
    }
}

impl GraphicsDevice for GlRendererApi {
    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn VertexBuffer>, ResourceError> {
        Ok(Box::new(GlVertexBuffer::new(Rc::clone(&self.gl), data)?))
    }

    fn create_dynamic_vertex_buffer(
        &self,
        size: usize,
    ) -> Result<Box<dyn VertexBuffer>, ResourceError> {
        Ok(Box::new(GlVertexBuffer::with_size(Rc::clone(&self.gl), size)?))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn IndexBuffer>, ResourceError> {
        Ok(Box::new(GlIndexBuffer::new(Rc::clone(&self.gl), indices)?))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>, ResourceError> {
        Ok(Box::new(GlVertexArray::new(Rc::clone(&self.gl))?))
    }

    fn create_shader(
        &self,
        name: &str,
        sources: &ShaderSources,
    ) -> Result<Rc<dyn Shader>, ShaderError> {
        Ok(Rc::new(GlShader::new(Rc::clone(&self.gl), name, sources)?))
    }

    fn create_texture(&self, width: u32, height: u32) -> Result<Rc<dyn Texture2D>, ResourceError> {
        Ok(Rc::new(GlTexture2D::new(Rc::clone(&self.gl), width, height)?))
    }

    fn create_texture_from_file(&self, path: &Path) -> Result<Rc<dyn Texture2D>, ResourceError> {
        Ok(Rc::new(GlTexture2D::from_file(Rc::clone(&self.gl), path)?))
    }
}

fn viewport_rect(x: u32, y: u32, extent: Extent2D) -> Result<(i32, i32, i32, i32), ResourceError> {
    Ok((
        gl_size(x)?,
        gl_size(y)?,
        gl_size(extent.width)?,
        gl_size(extent.height)?,
    ))
}

impl RendererApi for GlRendererApi {
    fn init(&mut self) -> Result<(), RenderError> {
        unsafe {
            log::info!("OpenGL vendor: {}", self.gl.get_parameter_string(glow::VENDOR));
            log::info!("OpenGL renderer: {}", self.gl.get_parameter_string(glow::RENDERER));
            log::info!("OpenGL version: {}", self.gl.get_parameter_string(glow::VERSION));

            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            self.gl.enable(glow::DEPTH_TEST);
        }
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, extent: Extent2D) {
        let rect = viewport_rect(x, y, extent);
        match rect {
            Ok((x, y, width, height)) => unsafe { self.gl.viewport(x, y, width, height) },
            Err(e) => log::error!("Invalid viewport: {e}"),
        }
    }

    fn set_clear_color(&mut self, color: LinearRgba) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) };
    }

    fn clear(&mut self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) };
    }

    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) {
        let count = match gl_size(resolve_index_count(vertex_array, index_count)) {
            Ok(count) => count,
            Err(e) => {
                log::error!("Skipping draw: {e}");
                return;
            }
        };
        vertex_array.bind();
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0);
        }
        self.draw_calls += 1;
    }

    fn rendering_api(&self) -> RenderingApi {
        RenderingApi::OpenGlDesktop
    }

    fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    fn reset_draw_calls(&mut self) {
        self.draw_calls = 0;
    }
}
