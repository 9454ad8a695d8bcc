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

//! Provides the public, backend-agnostic rendering contracts for the Lumen Engine.
//!
//! This module defines the 'what' of rendering: resource traits and factories,
//! the backend seams ([`GraphicsDevice`], [`RendererApi`], [`BackendSupport`]),
//! rendering API selection, and the scene-level façades built on top of them
//! ([`Renderer`], [`Renderer2D`]). The 'how' lives in a concrete backend in the
//! `lumen-infra` crate.

pub mod api;
pub mod camera;
pub mod camera_controller;
pub mod error;
pub mod render_command;
pub mod renderer2d;
pub mod scene;
pub mod traits;

pub use self::api::*;
pub use self::camera::OrthographicCamera;
pub use self::camera_controller::OrthographicCameraController;
pub use self::error::{RenderError, ResourceError, ShaderError};
pub use self::render_command::RenderCommand;
pub use self::renderer2d::{Renderer2D, Scene2D};
pub use self::scene::{Renderer, SceneData};
pub use self::traits::{BackendSupport, GraphicsDevice, RendererApi};
