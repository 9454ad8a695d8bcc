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
//! Which rendering APIs this build can run on this platform.

use lumen_core::renderer::{BackendSupport, RenderingApi};

/// Capability table for the current build.
///
/// Only backends with a renderer implementation are reported, so a stored
/// request for any other API falls back to one that can actually be created.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformBackends;

impl PlatformBackends {
    /// Creates the table for the current build.
    pub fn new() -> Self {
        Self
    }
}

impl BackendSupport for PlatformBackends {
    fn is_backend_supported(&self, api: RenderingApi) -> bool {
        match api {
            RenderingApi::OpenGlDesktop => cfg!(feature = "opengl"),
            RenderingApi::VulkanDesktop
            | RenderingApi::DirectX11Desktop
            | RenderingApi::DirectX12Desktop
            | RenderingApi::MetalDesktop => false,
        }
    }
}
