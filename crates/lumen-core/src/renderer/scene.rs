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

//! The scene-level renderer façade.

use super::camera::OrthographicCamera;
use super::render_command::RenderCommand;
use crate::math::{Extent2D, LinearRgba, Mat4};
use crate::renderer::api::{RenderingApi, Shader, VertexArray};
use crate::renderer::error::RenderError;
use crate::renderer::traits::RendererApi;

/// Uniform name of the camera matrix uploaded by [`Renderer::submit`].
pub const VIEW_PROJECTION_UNIFORM: &str = "u_ViewProjection";
/// Uniform name of the model matrix uploaded by [`Renderer::submit`].
pub const TRANSFORM_UNIFORM: &str = "u_Transform";

/// State shared by every submission between `begin_scene` and `end_scene`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneData {
    /// Projection times view of the scene camera.
    pub view_projection: Mat4,
}

/// Translates scene-level calls into [`RenderCommand`] calls.
#[derive(Debug)]
pub struct Renderer {
    command: RenderCommand,
    scene: SceneData,
}

impl Renderer {
    /// Wraps the backend chosen at startup.
    pub fn new(api: Box<dyn RendererApi>) -> Self {
        Self {
            command: RenderCommand::new(api),
            scene: SceneData::default(),
        }
    }

    /// One-time backend setup.
    pub fn init(&mut self) -> Result<(), RenderError> {
        self.command.init()?;
        log::info!("Renderer initialized with {}.", self.command.rendering_api());
        Ok(())
    }

    /// Resizes the viewport to cover the new framebuffer.
    pub fn on_window_resize(&mut self, extent: Extent2D) {
        self.command.set_viewport(0, 0, extent);
    }

    /// Starts a scene viewed through `camera`.
    pub fn begin_scene(&mut self, camera: &OrthographicCamera) {
        self.scene.view_projection = *camera.view_projection_matrix();
    }

    /// Ends the current scene. Submissions are drawn immediately, so this only
    /// marks the boundary.
    pub fn end_scene(&mut self) {}

    /// Draws `vertex_array` with `shader` at `transform`.
    pub fn submit(&mut self, shader: &dyn Shader, vertex_array: &dyn VertexArray, transform: &Mat4) {
        shader.bind();
        shader.set_mat4(VIEW_PROJECTION_UNIFORM, &self.scene.view_projection);
        shader.set_mat4(TRANSFORM_UNIFORM, transform);

        vertex_array.bind();
        self.command.draw_indexed(vertex_array, 0);
    }

    /// Sets the clear color.
    pub fn set_clear_color(&mut self, color: LinearRgba) {
        self.command.set_clear_color(color);
    }

    /// Clears the framebuffer.
    pub fn clear(&mut self) {
        self.command.clear();
    }

    /// The active scene data.
    pub fn scene_data(&self) -> &SceneData {
        &self.scene
    }

    /// The render command.
    pub fn command(&self) -> &RenderCommand {
        &self.command
    }

    /// The render command, mutably. Needed by [`Renderer2D`](super::Renderer2D).
    pub fn command_mut(&mut self) -> &mut RenderCommand {
        &mut self.command
    }

    /// The backend, for resource factories.
    pub fn api(&self) -> &dyn RendererApi {
        self.command.api()
    }

    /// The rendering API chosen at startup.
    pub fn rendering_api(&self) -> RenderingApi {
        self.command.rendering_api()
    }
}
