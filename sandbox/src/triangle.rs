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

//! The raw renderer path: a vertex array and a shader submitted by hand.

use std::rc::Rc;

use anyhow::Context;
use lumen_core::renderer::{
    create_index_buffer, create_vertex_array, create_vertex_buffer, BufferElement, BufferLayout,
    ShaderDataType, ShaderLibrary, VertexArray,
};
use lumen_sdk::prelude::*;

const SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/shaders/vertex_color.glsl");

#[rustfmt::skip]
const TRIANGLE_VERTICES: [f32; 3 * 7] = [
    -0.5, -0.5, 0.0, 0.8, 0.2, 0.8, 1.0,
     0.5, -0.5, 0.0, 0.2, 0.3, 0.8, 1.0,
     0.0,  0.5, 0.0, 0.8, 0.8, 0.2, 1.0,
];

struct Resources {
    triangle: Box<dyn VertexArray>,
    shaders: ShaderLibrary,
}

/// Draws a vertex-colored triangle through `Renderer::submit`.
pub struct TriangleLayer {
    camera: OrthographicCamera,
    position: Vec3,
    resources: Option<Resources>,
}

impl TriangleLayer {
    pub fn new(position: Vec3) -> Self {
        Self {
            camera: OrthographicCamera::new(-1.6, 1.6, -0.9, 0.9),
            position,
            resources: None,
        }
    }
}

impl Layer for TriangleLayer {
    fn name(&self) -> &str {
        "Triangle"
    }

    fn on_attach(&mut self, ctx: &mut LayerContext<'_>) -> anyhow::Result<()> {
        let api = ctx.renderer.api();

        let mut vertices = create_vertex_buffer(api, &TRIANGLE_VERTICES)?;
        vertices.set_layout(BufferLayout::new([
            BufferElement::new(ShaderDataType::Float3, "a_Position"),
            BufferElement::new(ShaderDataType::Float4, "a_Color"),
        ]));
        let mut triangle = create_vertex_array(api)?;
        triangle.add_vertex_buffer(Rc::from(vertices))?;
        triangle.set_index_buffer(Rc::from(create_index_buffer(api, &[0, 1, 2])?));

        let mut shaders = ShaderLibrary::new();
        shaders
            .load(api, SHADER_PATH)
            .with_context(|| format!("loading {SHADER_PATH}"))?;

        self.resources = Some(Resources { triangle, shaders });
        Ok(())
    }

    fn on_detach(&mut self) {
        self.resources = None;
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, _ts: Timestep) {
        let Some(resources) = &self.resources else {
            return;
        };
        let Ok(shader) = resources.shaders.get("vertex_color") else {
            return;
        };
        let transform = Mat4::from_translation(self.position);

        ctx.renderer.begin_scene(&self.camera);
        ctx.renderer
            .submit(shader.as_ref(), resources.triangle.as_ref(), &transform);
        ctx.renderer.end_scene();
    }

    fn on_event(&mut self, event: &Event) -> Propagation {
        if let Event::WindowResize(e) = event {
            if let Some(aspect) = e.extent().aspect_ratio() {
                self.camera.set_projection(-aspect * 0.9, aspect * 0.9, -0.9, 0.9);
            }
        }
        Propagation::Unhandled
    }
}
