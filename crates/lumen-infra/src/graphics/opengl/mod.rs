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
//! The OpenGL backend, built on `glow`.
//!
//! Every resource holds an `Rc` to the shared `glow::Context`, so resources
//! are tied to the thread owning the window's GL context.

mod buffer;
mod renderer_api;
mod shader;
mod texture;
mod vertex_array;

pub use self::buffer::{GlIndexBuffer, GlVertexBuffer};
pub use self::renderer_api::GlRendererApi;
pub use self::shader::GlShader;
pub use self::texture::GlTexture2D;
pub use self::vertex_array::GlVertexArray;

use lumen_core::renderer::ResourceError;

/// Converts a size to the `i32` GL expects.
fn gl_size<T>(value: T) -> Result<i32, ResourceError>
where
    T: TryInto<i32> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| ResourceError::Backend(format!("{value} exceeds the GL size range")))
}

/// Maps a `glow` object creation failure.
fn backend_error(what: &str) -> impl FnOnce(String) -> ResourceError + '_ {
    move |reason| ResourceError::Backend(format!("failed to create {what}: {reason}"))
}
