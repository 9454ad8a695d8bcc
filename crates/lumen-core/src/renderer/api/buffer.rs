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

//! Vertex and index buffers, and the layout describing vertex memory.

use super::RenderingApi;
use crate::renderer::error::ResourceError;
use crate::renderer::traits::RendererApi;
use std::fmt::Debug;

/// The scalar family of a [`ShaderDataType`], as the backend sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit float.
    Float,
    /// 32-bit signed integer.
    Int,
    /// 8-bit boolean.
    Bool,
}

/// The type of one vertex attribute as declared in a shader.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderDataType {
    Float,
    Float2,
    Float3,
    Float4,
    Mat3,
    Mat4,
    Int,
    Int2,
    Int3,
    Int4,
    Bool,
}

impl ShaderDataType {
    /// Size in bytes.
    pub const fn size(self) -> u32 {
        use ShaderDataType::*;
        match self {
            Float | Int => 4,
            Float2 | Int2 => 4 * 2,
            Float3 | Int3 => 4 * 3,
            Float4 | Int4 => 4 * 4,
            Mat3 => 4 * 3 * 3,
            Mat4 => 4 * 4 * 4,
            Bool => 1,
        }
    }

    /// Total number of scalar components.
    pub const fn component_count(self) -> u32 {
        use ShaderDataType::*;
        match self {
            Float | Int | Bool => 1,
            Float2 | Int2 => 2,
            Float3 | Int3 => 3,
            Float4 | Int4 => 4,
            Mat3 => 3 * 3,
            Mat4 => 4 * 4,
        }
    }

    /// Number of attribute slots the type occupies: one per matrix column, else one.
    pub const fn column_count(self) -> u32 {
        match self {
            ShaderDataType::Mat3 => 3,
            ShaderDataType::Mat4 => 4,
            _ => 1,
        }
    }

    /// The scalar family.
    pub const fn scalar_kind(self) -> ScalarKind {
        use ShaderDataType::*;
        match self {
            Float | Float2 | Float3 | Float4 | Mat3 | Mat4 => ScalarKind::Float,
            Int | Int2 | Int3 | Int4 => ScalarKind::Int,
            Bool => ScalarKind::Bool,
        }
    }
}

/// One named attribute inside a [`BufferLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    /// Attribute name, for diagnostics.
    pub name: String,
    /// Attribute type.
    pub data_type: ShaderDataType,
    /// Size in bytes, derived from `data_type`.
    pub size: u32,
    /// Byte offset from the start of a vertex. Filled in by the layout.
    pub offset: u32,
    /// Whether integer data is normalized to `[0, 1]` when read as float.
    pub normalized: bool,
}

impl BufferElement {
    /// Creates a non-normalized element.
    pub fn new(data_type: ShaderDataType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.size(),
            offset: 0,
            normalized: false,
        }
    }

    /// Marks the element as normalized.
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }
}

/// The interleaved memory layout of one vertex buffer.
///
/// Offsets and stride are computed in one left-to-right pass whenever the element
/// list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    /// Builds a layout and computes offsets and stride.
    pub fn new(elements: impl IntoIterator<Item = BufferElement>) -> Self {
        let mut layout = Self {
            elements: elements.into_iter().collect(),
            stride: 0,
        };
        layout.calculate_offsets_and_stride();
        layout
    }

    /// Appends an element and recomputes the whole layout.
    pub fn push(&mut self, element: BufferElement) {
        self.elements.push(element);
        self.calculate_offsets_and_stride();
    }

    fn calculate_offsets_and_stride(&mut self) {
        let mut offset = 0;
        for element in &mut self.elements {
            element.size = element.data_type.size();
            element.offset = offset;
            offset += element.size;
        }
        self.stride = offset;
    }

    /// The elements in declaration order.
    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Returns `true` if the layout has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, BufferElement> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a BufferLayout {
    type Item = &'a BufferElement;
    type IntoIter = std::slice::Iter<'a, BufferElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A GPU buffer of vertex data.
pub trait VertexBuffer: Debug {
    /// Binds the buffer as the current vertex buffer.
    fn bind(&self);
    /// Unbinds the buffer.
    fn unbind(&self);
    /// Overwrites the start of the buffer with `data`.
    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError>;
    /// The layout of one vertex.
    fn layout(&self) -> &BufferLayout;
    /// Replaces the layout. Must happen before the buffer is added to a vertex array.
    fn set_layout(&mut self, layout: BufferLayout);
}

/// A GPU buffer of `u32` indices.
pub trait IndexBuffer: Debug {
    /// Binds the buffer as the current element buffer.
    fn bind(&self);
    /// Unbinds the buffer.
    fn unbind(&self);
    /// Number of indices.
    fn count(&self) -> u32;
}

pub(crate) fn unsupported_backend(kind: &str, api: RenderingApi) -> ResourceError {
    log::error!("Cannot create {kind}: rendering API {api} is not implemented.");
    ResourceError::UnsupportedBackend(api)
}

/// Creates a static vertex buffer filled with `vertices`.
pub fn create_vertex_buffer(
    api: &dyn RendererApi,
    vertices: &[f32],
) -> Result<Box<dyn VertexBuffer>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_vertex_buffer(bytemuck::cast_slice(vertices)),
        other => Err(unsupported_backend("vertex buffer", other)),
    }
}

/// Creates a dynamic vertex buffer of `size` bytes, to be filled with `set_data`.
pub fn create_vertex_buffer_with_size(
    api: &dyn RendererApi,
    size: usize,
) -> Result<Box<dyn VertexBuffer>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_dynamic_vertex_buffer(size),
        other => Err(unsupported_backend("vertex buffer", other)),
    }
}

/// Creates an index buffer.
pub fn create_index_buffer(
    api: &dyn RendererApi,
    indices: &[u32],
) -> Result<Box<dyn IndexBuffer>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_index_buffer(indices),
        other => Err(unsupported_backend("index buffer", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_and_stride_single_pass() {
        let layout = BufferLayout::new([
            BufferElement::new(ShaderDataType::Float3, "a_Position"),
            BufferElement::new(ShaderDataType::Float2, "a_TexCoord"),
        ]);
        let offsets: Vec<u32> = layout.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 12]);
        assert_eq!(layout.stride(), 20);
    }

    #[test]
    fn push_recomputes_everything() {
        let mut layout = BufferLayout::new([BufferElement::new(ShaderDataType::Float4, "a_Color")]);
        assert_eq!(layout.stride(), 16);
        layout.push(BufferElement::new(ShaderDataType::Mat4, "a_Model"));
        layout.push(BufferElement::new(ShaderDataType::Bool, "a_Flag"));
        assert_eq!(layout.elements()[1].offset, 16);
        assert_eq!(layout.elements()[2].offset, 80);
        assert_eq!(layout.stride(), 81);
    }

    #[test]
    fn data_type_sizes() {
        assert_eq!(ShaderDataType::Mat3.size(), 36);
        assert_eq!(ShaderDataType::Mat3.component_count(), 9);
        assert_eq!(ShaderDataType::Mat4.column_count(), 4);
        assert_eq!(ShaderDataType::Int3.scalar_kind(), ScalarKind::Int);
        assert_eq!(ShaderDataType::Bool.size(), 1);
    }

    #[test]
    fn empty_layout() {
        assert!(BufferLayout::default().is_empty());
        assert_eq!(BufferLayout::new(Vec::<BufferElement>::new()).stride(), 0);
    }
}
