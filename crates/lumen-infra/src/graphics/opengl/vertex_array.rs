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
//! Vertex array objects.

use std::rc::Rc;

use glow::HasContext;
use lumen_core::renderer::{
    AttributeAllocator, AttributeBinding, IndexBuffer, ResourceError, ScalarKind, VertexArray,
    VertexBuffer,
};

use super::{backend_error, gl_size};

/// A VAO recording the attribute bindings of its vertex buffers.
pub struct GlVertexArray {
    gl: Rc<glow::Context>,
    id: glow::VertexArray,
    allocator: AttributeAllocator,
    vertex_buffers: Vec<Rc<dyn VertexBuffer>>,
    index_buffer: Option<Rc<dyn IndexBuffer>>,
}

impl GlVertexArray {
    /// Creates an empty vertex array.
    pub fn new(gl: Rc<glow::Context>) -> Result<Self, ResourceError> {
        let id = unsafe { gl.create_vertex_array() }.map_err(backend_error("vertex array"))?;
        Ok(Self {
            gl,
            id,
            allocator: AttributeAllocator::new(),
            vertex_buffers: Vec::new(),
            index_buffer: None,
        })
    }

    fn enable_attribute(&self, binding: &AttributeBinding) -> Result<(), ResourceError> {
        let components = gl_size(binding.components)?;
        let stride = gl_size(binding.stride)?;
        let offset = gl_size(binding.offset)?;
        unsafe {
            self.gl.enable_vertex_attrib_array(binding.index);
            match binding.kind {
                ScalarKind::Float => self.gl.vertex_attrib_pointer_f32(
                    binding.index,
                    components,
                    attribute_gl_type(binding.kind),
                    binding.normalized,
                    stride,
                    offset,
                ),
                ScalarKind::Int | ScalarKind::Bool => self.gl.vertex_attrib_pointer_i32(
                    binding.index,
                    components,
                    attribute_gl_type(binding.kind),
                    stride,
                    offset,
                ),
            }
        }
        Ok(())
    }
}

/// GL component type for an attribute. Booleans are uploaded as single bytes.
fn attribute_gl_type(kind: ScalarKind) -> u32 {
    match kind {
        ScalarKind::Float => glow::FLOAT,
        ScalarKind::Int => glow::INT,
        ScalarKind::Bool => glow::UNSIGNED_BYTE,
    }
}

impl std::fmt::Debug for GlVertexArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlVertexArray")
            .field("id", &self.id)
            .field("vertex_buffers", &self.vertex_buffers.len())
            .field("index_buffer", &self.index_buffer)
            .finish()
    }
}

impl VertexArray for GlVertexArray {
    fn bind(&self) {
        unsafe { self.gl.bind_vertex_array(Some(self.id)) };
    }

    fn unbind(&self) {
        unsafe { self.gl.bind_vertex_array(None) };
    }

    fn add_vertex_buffer(&mut self, buffer: Rc<dyn VertexBuffer>) -> Result<(), ResourceError> {
        let bindings = self.allocator.allocate(buffer.layout())?;
        self.bind();
        buffer.bind();
        for binding in &bindings {
            self.enable_attribute(binding)?;
        }
        self.vertex_buffers.push(buffer);
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: Rc<dyn IndexBuffer>) {
        self.bind();
        buffer.bind();
        self.index_buffer = Some(buffer);
    }

    fn vertex_buffers(&self) -> &[Rc<dyn VertexBuffer>] {
        &self.vertex_buffers
    }

    fn index_buffer(&self) -> Option<&Rc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { self.gl.delete_vertex_array(self.id) };
    }
}
