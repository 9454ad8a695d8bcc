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

//! The seams a graphics backend implements.
//!
//! - [`GraphicsDevice`]: constructs buffers, arrays, shaders and textures.
//! - [`RendererApi`]: per-frame clear/viewport/draw primitives on top of it.
//! - [`BackendSupport`]: which rendering APIs can be selected at startup.

mod backend_support;
mod graphics_device;
mod renderer_api;

pub use self::backend_support::BackendSupport;
pub use self::graphics_device::GraphicsDevice;
pub use self::renderer_api::{resolve_index_count, RendererApi};
