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

//! Vertex arrays: the binding of vertex buffers to shader attribute slots.

use super::buffer::{unsupported_backend, BufferLayout, IndexBuffer, ScalarKind, VertexBuffer};
use super::RenderingApi;
use crate::renderer::error::ResourceError;
use crate::renderer::traits::RendererApi;
use std::fmt::Debug;
use std::rc::Rc;

/// One `glVertexAttribPointer`-style binding produced by [`AttributeAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    /// Attribute slot.
    pub index: u32,
    /// Components read for this slot (1 to 4).
    pub components: u32,
    /// Scalar family of the components.
    pub kind: ScalarKind,
    /// Whether integer data is normalized.
    pub normalized: bool,
    /// Bytes between consecutive vertices.
    pub stride: u32,
    /// Byte offset of this slot inside a vertex.
    pub offset: u32,
}

/// Hands out attribute slots for the buffers of one vertex array.
///
/// Indices increase monotonically from 0 across every buffer added to the same
/// array, so two buffers never share a slot. Matrix elements take one slot per
/// column.
#[derive(Debug, Default, Clone)]
pub struct AttributeAllocator {
    next_index: u32,
}

impl AttributeAllocator {
    /// Creates an allocator starting at slot 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot the next element will receive.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Allocates slots for every element of `layout`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::EmptyLayout`] if the layout has no elements; no slot is
    /// consumed in that case.
    pub fn allocate(&mut self, layout: &BufferLayout) -> Result<Vec<AttributeBinding>, ResourceError> {
        debug_assert!(!layout.is_empty(), "vertex buffer has no layout");
        if layout.is_empty() {
            return Err(ResourceError::EmptyLayout);
        }

        let mut bindings = Vec::with_capacity(layout.elements().len());
        for element in layout {
            let columns = element.data_type.column_count();
            let components = element.data_type.component_count() / columns;
            let column_size = element.size / columns;
            for column in 0..columns {
                bindings.push(AttributeBinding {
                    index: self.next_index,
                    components,
                    kind: element.data_type.scalar_kind(),
                    normalized: element.normalized,
                    stride: layout.stride(),
                    offset: element.offset + column * column_size,
                });
                self.next_index += 1;
            }
        }
        Ok(bindings)
    }
}

/// A set of vertex buffers plus an index buffer, ready to draw.
pub trait VertexArray: Debug {
    /// Binds the array.
    fn bind(&self);
    /// Unbinds the array.
    fn unbind(&self);
    /// Attaches a vertex buffer, binding its layout to the next free attribute slots.
    ///
    /// # Errors
    ///
    /// [`ResourceError::EmptyLayout`] if `set_layout` was never called on the buffer.
    fn add_vertex_buffer(&mut self, buffer: Rc<dyn VertexBuffer>) -> Result<(), ResourceError>;
    /// Sets the index buffer used by indexed draws.
    fn set_index_buffer(&mut self, buffer: Rc<dyn IndexBuffer>);
    /// The attached vertex buffers, in the order they were added.
    fn vertex_buffers(&self) -> &[Rc<dyn VertexBuffer>];
    /// The index buffer, if one was set.
    fn index_buffer(&self) -> Option<&Rc<dyn IndexBuffer>>;
}

/// Creates an empty vertex array.
pub fn create_vertex_array(api: &dyn RendererApi) -> Result<Box<dyn VertexArray>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_vertex_array(),
        other => Err(unsupported_backend("vertex array", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::buffer::{BufferElement, ShaderDataType};

    #[test]
    fn indices_continue_across_buffers() {
        let mut allocator = AttributeAllocator::new();
        let first = BufferLayout::new([
            BufferElement::new(ShaderDataType::Float3, "a_Position"),
            BufferElement::new(ShaderDataType::Float4, "a_Color"),
        ]);
        let second = BufferLayout::new([BufferElement::new(ShaderDataType::Float2, "a_TexCoord")]);

        let a = allocator.allocate(&first).unwrap();
        let b = allocator.allocate(&second).unwrap();
        let indices: Vec<u32> = a.iter().chain(b.iter()).map(|binding| binding.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(a[1].offset, 12);
        assert_eq!(a[1].stride, 28);
        assert_eq!(b[0].stride, 8);
    }

    #[test]
    fn matrix_takes_one_slot_per_column() {
        let mut allocator = AttributeAllocator::new();
        let layout = BufferLayout::new([
            BufferElement::new(ShaderDataType::Float, "a_Index"),
            BufferElement::new(ShaderDataType::Mat4, "a_Model"),
        ]);
        let bindings = allocator.allocate(&layout).unwrap();
        assert_eq!(bindings.len(), 5);
        let columns: Vec<(u32, u32, u32)> = bindings[1..]
            .iter()
            .map(|b| (b.index, b.components, b.offset))
            .collect();
        assert_eq!(columns, vec![(1, 4, 4), (2, 4, 20), (3, 4, 36), (4, 4, 52)]);
        assert_eq!(allocator.next_index(), 5);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn empty_layout_is_rejected() {
        let mut allocator = AttributeAllocator::new();
        assert!(matches!(
            allocator.allocate(&BufferLayout::default()),
            Err(ResourceError::EmptyLayout)
        ));
        assert_eq!(allocator.next_index(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "vertex buffer has no layout")]
    fn empty_layout_asserts_in_debug() {
        let _ = AttributeAllocator::new().allocate(&BufferLayout::default());
    }
}
