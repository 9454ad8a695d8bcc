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

//! Immediate-mode quad renderer.
//!
//! Each quad is one indexed draw call; there is no batching. A quad is drawn
//! with a single shader that multiplies a texture sample by a tint, and flat
//! colored quads sample a 1x1 white texture.

use super::camera::OrthographicCamera;
use super::render_command::RenderCommand;
use super::scene::{TRANSFORM_UNIFORM, VIEW_PROJECTION_UNIFORM};
use crate::math::{degrees_to_radians, LinearRgba, Mat4, Vec2, Vec3};
use crate::renderer::api::{
    create_index_buffer, create_shader, create_texture, create_vertex_array, create_vertex_buffer,
    BufferElement, BufferLayout, ShaderDataType, ShaderSources, Shader, Texture2D, VertexArray,
};
use crate::renderer::error::RenderError;
use crate::renderer::traits::RendererApi;
use std::rc::Rc;

const TEXTURE_SHADER_SOURCE: &str = include_str!("shaders/texture.glsl");
const TEXTURE_SHADER_NAME: &str = "Texture";

#[rustfmt::skip]
const QUAD_VERTICES: [f32; 4 * 5] = [
    -0.5, -0.5, 0.0, 0.0, 0.0,
     0.5, -0.5, 0.0, 1.0, 0.0,
     0.5,  0.5, 0.0, 1.0, 1.0,
    -0.5,  0.5, 0.0, 0.0, 1.0,
];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];
const WHITE_PIXEL: [u8; 4] = [0xff; 4];

/// GPU resources shared by every quad.
#[derive(Debug)]
pub struct Renderer2D {
    quad: Box<dyn VertexArray>,
    shader: Rc<dyn Shader>,
    white_texture: Rc<dyn Texture2D>,
}

impl Renderer2D {
    /// Builds the unit quad, the quad shader and the white texture.
    ///
    /// # Errors
    ///
    /// Any resource or shader failure; callers treat it as fatal.
    pub fn new(api: &dyn RendererApi) -> Result<Self, RenderError> {
        let mut quad = create_vertex_array(api)?;

        let mut vertices = create_vertex_buffer(api, &QUAD_VERTICES)?;
        vertices.set_layout(BufferLayout::new([
            BufferElement::new(ShaderDataType::Float3, "a_Position"),
            BufferElement::new(ShaderDataType::Float2, "a_TexCoord"),
        ]));
        quad.add_vertex_buffer(Rc::from(vertices))?;
        quad.set_index_buffer(Rc::from(create_index_buffer(api, &QUAD_INDICES)?));

        let white_texture = create_texture(api, 1, 1)?;
        white_texture.set_data(&WHITE_PIXEL)?;

        let sources = ShaderSources::parse(TEXTURE_SHADER_NAME, TEXTURE_SHADER_SOURCE)?;
        let shader = create_shader(api, TEXTURE_SHADER_NAME, &sources.vertex, &sources.fragment)?;
        shader.bind();
        shader.set_int("u_Texture", 0);

        log::debug!("Renderer2D resources created.");
        Ok(Self {
            quad,
            shader,
            white_texture,
        })
    }

    /// Starts a 2D scene viewed through `camera`.
    ///
    /// The returned [`Scene2D`] borrows the render command until it is ended.
    pub fn begin_scene<'a>(
        &'a self,
        command: &'a mut RenderCommand,
        camera: &OrthographicCamera,
    ) -> Scene2D<'a> {
        self.shader.bind();
        self.shader
            .set_mat4(VIEW_PROJECTION_UNIFORM, camera.view_projection_matrix());
        Scene2D {
            renderer: self,
            command,
        }
    }
}

/// A 2D scene in progress.
#[derive(Debug)]
pub struct Scene2D<'a> {
    renderer: &'a Renderer2D,
    command: &'a mut RenderCommand,
}

impl Scene2D<'_> {
    /// Draws a flat-colored axis-aligned quad centered on `position`.
    pub fn draw_quad(&mut self, position: Vec3, size: Vec2, color: LinearRgba) {
        let transform = Mat4::from_translation(position) * Mat4::from_scale(size.extend(1.0));
        let renderer = self.renderer;
        let white = renderer.white_texture.as_ref();
        self.draw(&transform, white, 1.0, color);
    }

    /// Draws a flat-colored quad rotated counter-clockwise by `rotation` degrees.
    pub fn draw_rotated_quad(&mut self, position: Vec3, size: Vec2, rotation: f32, color: LinearRgba) {
        let transform = Mat4::from_translation(position)
            * Mat4::from_rotation_z(degrees_to_radians(rotation))
            * Mat4::from_scale(size.extend(1.0));
        let renderer = self.renderer;
        let white = renderer.white_texture.as_ref();
        self.draw(&transform, white, 1.0, color);
    }

    /// Draws a textured quad. `tiling` repeats the texture; `tint` multiplies it.
    pub fn draw_textured_quad(
        &mut self,
        position: Vec3,
        size: Vec2,
        texture: &dyn Texture2D,
        tiling: f32,
        tint: LinearRgba,
    ) {
        let transform = Mat4::from_translation(position) * Mat4::from_scale(size.extend(1.0));
        self.draw(&transform, texture, tiling, tint);
    }

    fn draw(&mut self, transform: &Mat4, texture: &dyn Texture2D, tiling: f32, tint: LinearRgba) {
        let shader = &self.renderer.shader;
        shader.set_float4("u_Color", tint.to_vec4());
        shader.set_float("u_TilingFactor", tiling);
        shader.set_mat4(TRANSFORM_UNIFORM, transform);
        texture.bind(0);

        let quad = self.renderer.quad.as_ref();
        quad.bind();
        self.command.draw_indexed(quad, 0);
    }

    /// Ends the scene and releases the render command.
    pub fn end_scene(self) {}
}
