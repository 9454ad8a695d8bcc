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
//! Vertex and index buffers.

use std::rc::Rc;

use glow::HasContext;
use lumen_core::renderer::{BufferLayout, IndexBuffer, ResourceError, VertexBuffer};

use super::{backend_error, gl_size};

/// An `ARRAY_BUFFER` with its vertex layout.
pub struct GlVertexBuffer {
    gl: Rc<glow::Context>,
    id: glow::Buffer,
    capacity: usize,
    layout: BufferLayout,
}

impl GlVertexBuffer {
    /// Uploads `data` into a new static buffer.
    pub fn new(gl: Rc<glow::Context>, data: &[u8]) -> Result<Self, ResourceError> {
        let id = unsafe { gl.create_buffer() }.map_err(backend_error("vertex buffer"))?;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
        }
        Ok(Self {
            gl,
            id,
            capacity: data.len(),
            layout: BufferLayout::default(),
        })
    }

    /// Allocates an uninitialized dynamic buffer of `size` bytes.
    pub fn with_size(gl: Rc<glow::Context>, size: usize) -> Result<Self, ResourceError> {
        let gl_capacity = gl_size(size)?;
        let id = unsafe { gl.create_buffer() }.map_err(backend_error("vertex buffer"))?;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(id));
            gl.buffer_data_size(glow::ARRAY_BUFFER, gl_capacity, glow::DYNAMIC_DRAW);
        }
        Ok(Self {
            gl,
            id,
            capacity: size,
            layout: BufferLayout::default(),
        })
    }
}

impl std::fmt::Debug for GlVertexBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlVertexBuffer")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("layout", &self.layout)
            .finish()
    }
}

impl VertexBuffer for GlVertexBuffer {
    fn bind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id)) };
    }

    fn unbind(&self) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, None) };
    }

    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError> {
        if data.len() > self.capacity {
            return Err(ResourceError::OutOfBounds {
                len: data.len(),
                capacity: self.capacity,
            });
        }
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id));
            self.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, data);
        }
        Ok(())
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_layout(&mut self, layout: BufferLayout) {
        self.layout = layout;
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.id) };
    }
}

/// An `ELEMENT_ARRAY_BUFFER` of `u32` indices.
pub struct GlIndexBuffer {
    gl: Rc<glow::Context>,
    id: glow::Buffer,
    count: u32,
}

impl GlIndexBuffer {
    /// Uploads `indices` into a new static buffer.
    pub fn new(gl: Rc<glow::Context>, indices: &[u32]) -> Result<Self, ResourceError> {
        let count = u32::try_from(indices.len())
            .map_err(|_| ResourceError::Backend("too many indices".to_owned()))?;
        let id = unsafe { gl.create_buffer() }.map_err(backend_error("index buffer"))?;
        unsafe {
            // Binding an element buffer attaches it to the bound vertex array.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
        }
        Ok(Self { gl, id, count })
    }
}

impl std::fmt::Debug for GlIndexBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlIndexBuffer")
            .field("id", &self.id)
            .field("count", &self.count)
            .finish()
    }
}

impl IndexBuffer for GlIndexBuffer {
    fn bind(&self) {
        unsafe { self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.id)) };
    }

    fn unbind(&self) {
        unsafe { self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None) };
    }

    fn count(&self) -> u32 {
        self.count
    }
}

impl Drop for GlIndexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.id) };
    }
}
