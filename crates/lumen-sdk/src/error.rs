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

use lumen_core::renderer::RenderError;
use lumen_core::settings::SettingsError;
use lumen_infra::WindowError;
use thiserror::Error;

/// Errors that stop an application from starting or from taking a layer.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Another application is alive on this thread.
    #[error("an application is already running on this thread")]
    AlreadyInitialized,
    /// The platform window or its GL context could not be created.
    #[error(transparent)]
    Window(#[from] WindowError),
    /// No usable rendering backend, or the backend failed to initialize.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The settings file could not be read or written.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// A layer's `on_attach` hook failed; the layer was not added.
    #[error("layer '{name}' failed to attach")]
    LayerAttach {
        /// The layer's name.
        name: String,
        /// What the layer reported.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
