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

//! A 2D scene: flat quads, a spinning quad and a tiled checkerboard.

use std::rc::Rc;

use lumen_core::renderer::create_texture;
use lumen_sdk::prelude::*;

const CHECKER_SIZE: u32 = 8;

/// RGBA pixels of a two-tone checkerboard, one texel per square.
fn checkerboard(size: u32) -> Vec<u8> {
    let light = [0xd0, 0xd0, 0xd0, 0xff];
    let dark = [0x40, 0x40, 0x48, 0xff];
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size, i / size);
            if (x + y) % 2 == 0 {
                light
            } else {
                dark
            }
        })
        .collect()
}

struct Resources {
    renderer2d: Renderer2D,
    checkerboard: Rc<dyn Texture2D>,
}

pub struct Sandbox2D {
    controller: OrthographicCameraController,
    square_color: LinearRgba,
    rotation: f32,
    resources: Option<Resources>,
}

impl Sandbox2D {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            controller: OrthographicCameraController::new(aspect_ratio, true),
            square_color: LinearRgba::new(0.2, 0.3, 0.8, 1.0),
            rotation: 0.0,
            resources: None,
        }
    }
}

impl Layer for Sandbox2D {
    fn name(&self) -> &str {
        "Sandbox2D"
    }

    fn on_attach(&mut self, ctx: &mut LayerContext<'_>) -> anyhow::Result<()> {
        ctx.renderer
            .set_clear_color(LinearRgba::new(0.1, 0.1, 0.1, 1.0));

        let api = ctx.renderer.api();
        let renderer2d = Renderer2D::new(api)?;
        let checker_texture = create_texture(api, CHECKER_SIZE, CHECKER_SIZE)?;
        checker_texture.set_data(&checkerboard(CHECKER_SIZE))?;

        log::info!("Sandbox2D attached. WASD moves, Q/E rotates, scroll zooms.");
        self.resources = Some(Resources {
            renderer2d,
            checkerboard: checker_texture,
        });
        Ok(())
    }

    fn on_detach(&mut self) {
        self.resources = None;
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, ts: Timestep) {
        self.controller.on_update(ts, ctx.input);
        self.rotation = (self.rotation + 50.0 * ts.seconds()) % 360.0;

        let Some(resources) = &self.resources else {
            return;
        };
        let mut scene = resources
            .renderer2d
            .begin_scene(ctx.renderer.command_mut(), self.controller.camera());
        scene.draw_textured_quad(
            Vec3::new(0.0, 0.0, -0.1),
            Vec2::new(10.0, 10.0),
            resources.checkerboard.as_ref(),
            10.0,
            LinearRgba::new(1.0, 0.9, 0.9, 1.0),
        );
        scene.draw_quad(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec2::new(0.8, 0.8),
            LinearRgba::new(0.8, 0.2, 0.3, 1.0),
        );
        scene.draw_quad(Vec3::new(0.5, -0.5, 0.0), Vec2::new(0.5, 0.75), self.square_color);
        scene.draw_rotated_quad(
            Vec3::new(1.2, 0.6, 0.0),
            Vec2::new(0.6, 0.6),
            self.rotation,
            LinearRgba::new(0.9, 0.7, 0.1, 1.0),
        );
        scene.end_scene();
    }

    fn on_event(&mut self, event: &Event) -> Propagation {
        self.controller.on_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let pixels = checkerboard(2);
        assert_eq!(pixels.len(), 2 * 2 * 4);
        assert_eq!(pixels[0..4], pixels[12..16]);
        assert_ne!(pixels[0..4], pixels[4..8]);
    }
}
