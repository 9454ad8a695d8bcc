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

//! Backend-agnostic GPU resource types and their factories.
//!
//! Every factory reads the active [`RenderingApi`] from the renderer it is given,
//! builds the OpenGL implementation through the [`GraphicsDevice`] seam, and
//! reports [`ResourceError::UnsupportedBackend`] for any other API.
//!
//! [`GraphicsDevice`]: crate::renderer::traits::GraphicsDevice
//! [`ResourceError::UnsupportedBackend`]: crate::renderer::error::ResourceError::UnsupportedBackend

pub mod buffer;
pub mod rendering_api;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use self::buffer::{
    create_index_buffer, create_vertex_buffer, create_vertex_buffer_with_size, BufferElement,
    BufferLayout, IndexBuffer, ScalarKind, ShaderDataType, VertexBuffer,
};
pub use self::rendering_api::{
    select_rendering_api, BackendSelection, RenderingApi, RenderingApiFlags, WindowingApi,
};
pub use self::shader::{
    create_shader, create_shader_from_file, Shader, ShaderLibrary, ShaderSources,
};
pub use self::texture::{create_texture, create_texture_from_file, Texture2D, TextureFormat};
pub use self::vertex_array::{
    create_vertex_array, AttributeAllocator, AttributeBinding, VertexArray,
};
