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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::renderer::api::RenderingApi;
use thiserror::Error;

/// A startup-level rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Neither the preferred rendering API nor any fallback is available.
    #[error("no supported rendering API is available on this platform")]
    NoSupportedBackend,
    /// The graphics context could not be created or made current.
    #[error("failed to create the graphics context: {0}")]
    ContextCreation(String),
    /// A resource needed by the renderer itself could not be created.
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// A shader needed by the renderer itself could not be built.
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// An error related to the creation or use of a GPU resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The active rendering API has no implementation for this resource.
    #[error("rendering API {0} is not supported for resource creation")]
    UnsupportedBackend(RenderingApi),
    /// A vertex buffer without a layout was added to a vertex array.
    #[error("vertex buffer has no layout")]
    EmptyLayout,
    /// Uploaded pixel data does not cover the texture exactly.
    #[error("texture data is {actual} bytes, expected {expected}")]
    DataSizeMismatch {
        /// `width * height * bytes_per_pixel`.
        expected: usize,
        /// The length of the slice that was passed.
        actual: usize,
    },
    /// A vertex buffer upload would overrun the buffer.
    #[error("write of {len} bytes exceeds buffer capacity of {capacity} bytes")]
    OutOfBounds {
        /// The number of bytes written.
        len: usize,
        /// The allocated size of the buffer.
        capacity: usize,
    },
    /// Image file could not be read or decoded.
    #[error("failed to load image '{path}': {reason}")]
    ImageLoad {
        /// The file path.
        path: String,
        /// The decoder or I/O error.
        reason: String,
    },
    /// The image uses a channel layout the backend cannot upload.
    #[error("unsupported texture format with {channels} channels")]
    UnsupportedFormat {
        /// The number of color channels.
        channels: u8,
    },
    /// The backend refused to allocate the object.
    #[error("backend error: {0}")]
    Backend(String),
}

/// An error related to loading, compiling or looking up a shader.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The shader file could not be read.
    #[error("failed to read shader '{path}': {source}")]
    Io {
        /// The file path.
        path: String,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A `#type` directive named an unknown stage or stages are missing.
    #[error("malformed shader source '{name}': {reason}")]
    Parse {
        /// The shader name.
        name: String,
        /// What went wrong.
        reason: String,
    },
    /// A stage failed to compile.
    #[error("{stage} stage of shader '{name}' failed to compile: {log}")]
    CompilationFailed {
        /// The shader name.
        name: String,
        /// `vertex` or `fragment`.
        stage: &'static str,
        /// The driver's info log.
        log: String,
    },
    /// The program failed to link.
    #[error("shader '{name}' failed to link: {log}")]
    LinkFailed {
        /// The shader name.
        name: String,
        /// The driver's info log.
        log: String,
    },
    /// A shader with the same name is already in the library.
    #[error("shader '{0}' already exists in the library")]
    DuplicateName(String),
    /// No shader with this name is in the library.
    #[error("shader '{0}' not found in the library")]
    NotFound(String),
    /// Creating the shader failed at the resource level.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}
