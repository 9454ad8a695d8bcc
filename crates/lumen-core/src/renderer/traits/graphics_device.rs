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

use crate::renderer::api::{
    IndexBuffer, Shader, ShaderSources, Texture2D, VertexArray, VertexBuffer,
};
use crate::renderer::error::{ResourceError, ShaderError};
use std::path::Path;
use std::rc::Rc;

/// Resource construction for one graphics backend.
///
/// Code outside the backend should go through the factory functions in
/// [`crate::renderer::api`], which check the active API before calling these.
pub trait GraphicsDevice {
    /// Creates a static vertex buffer from raw bytes.
    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn VertexBuffer>, ResourceError>;

    /// Creates a dynamic vertex buffer of `size` bytes.
    fn create_dynamic_vertex_buffer(
        &self,
        size: usize,
    ) -> Result<Box<dyn VertexBuffer>, ResourceError>;

    /// Creates an index buffer.
    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn IndexBuffer>, ResourceError>;

    /// Creates an empty vertex array.
    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>, ResourceError>;

    /// Compiles and links a program.
    fn create_shader(
        &self,
        name: &str,
        sources: &ShaderSources,
    ) -> Result<Rc<dyn Shader>, ShaderError>;

    /// Creates an empty RGBA texture.
    fn create_texture(&self, width: u32, height: u32) -> Result<Rc<dyn Texture2D>, ResourceError>;

    /// Decodes an image file and uploads it.
    fn create_texture_from_file(&self, path: &Path) -> Result<Rc<dyn Texture2D>, ResourceError>;
}
