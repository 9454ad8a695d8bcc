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

//! Keyboard and mouse control for an [`OrthographicCamera`].

use super::camera::OrthographicCamera;
use crate::event::{
    Event, EventDispatcher, KeyCode, MouseScrolledEvent, Propagation, WindowResizeEvent,
};
use crate::math::{degrees_to_radians, Vec3};
use crate::platform::Input;
use crate::utils::timer::Timestep;

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f32 = 0.25;
const ZOOM_STEP: f32 = 0.25;

/// Pans with WASD, optionally rotates with Q/E, zooms with the mouse wheel,
/// and follows the window aspect ratio.
#[derive(Debug, Clone)]
pub struct OrthographicCameraController {
    aspect_ratio: f32,
    zoom_level: f32,
    camera: OrthographicCamera,
    rotation_enabled: bool,
    position: Vec3,
    rotation: f32,
    translation_speed: f32,
    rotation_speed: f32,
}

impl OrthographicCameraController {
    /// Creates a controller with zoom 1 for a viewport of the given aspect ratio.
    pub fn new(aspect_ratio: f32, rotation_enabled: bool) -> Self {
        let zoom_level = 1.0;
        Self {
            aspect_ratio,
            zoom_level,
            camera: OrthographicCamera::new(
                -aspect_ratio * zoom_level,
                aspect_ratio * zoom_level,
                -zoom_level,
                zoom_level,
            ),
            rotation_enabled,
            position: Vec3::ZERO,
            rotation: 0.0,
            translation_speed: zoom_level,
            rotation_speed: 180.0,
        }
    }

    /// Moves and rotates the camera from the held keys.
    pub fn on_update(&mut self, ts: Timestep, input: &Input) {
        let dt = ts.seconds();
        let (sin, cos) = degrees_to_radians(self.rotation).sin_cos();
        let step = self.translation_speed * dt;

        // Movement is relative to the camera's own axes.
        if input.is_key_pressed(KeyCode::A) {
            self.position.x -= cos * step;
            self.position.y -= sin * step;
        } else if input.is_key_pressed(KeyCode::D) {
            self.position.x += cos * step;
            self.position.y += sin * step;
        }
        if input.is_key_pressed(KeyCode::W) {
            self.position.x += -sin * step;
            self.position.y += cos * step;
        } else if input.is_key_pressed(KeyCode::S) {
            self.position.x -= -sin * step;
            self.position.y -= cos * step;
        }

        if self.rotation_enabled {
            if input.is_key_pressed(KeyCode::Q) {
                self.rotation += self.rotation_speed * dt;
            }
            if input.is_key_pressed(KeyCode::E) {
                self.rotation -= self.rotation_speed * dt;
            }
            if self.rotation > 180.0 {
                self.rotation -= 360.0;
            } else if self.rotation <= -180.0 {
                self.rotation += 360.0;
            }
            self.camera.set_rotation(self.rotation);
        }

        self.camera.set_position(self.position);
        self.translation_speed = self.zoom_level;
    }

    /// Reacts to scroll and resize. Never consumes the event.
    pub fn on_event(&mut self, event: &Event) -> Propagation {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<MouseScrolledEvent>(|e| {
            self.zoom_level = (self.zoom_level - e.y_offset * ZOOM_STEP).max(MIN_ZOOM);
            self.update_projection();
            false
        });
        dispatcher.dispatch::<WindowResizeEvent>(|e| {
            if let Some(aspect_ratio) = e.extent().aspect_ratio() {
                self.aspect_ratio = aspect_ratio;
                self.update_projection();
            }
            false
        });
        dispatcher.propagation()
    }

    fn update_projection(&mut self) {
        let zoom = self.zoom_level;
        self.camera.set_projection(
            -self.aspect_ratio * zoom,
            self.aspect_ratio * zoom,
            -zoom,
            zoom,
        );
    }

    /// The controlled camera.
    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    /// The current zoom level; larger shows more of the world.
    pub fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    /// Sets the zoom level, clamped to [`MIN_ZOOM`].
    pub fn set_zoom_level(&mut self, zoom_level: f32) {
        self.zoom_level = zoom_level.max(MIN_ZOOM);
        self.update_projection();
    }

    /// The current aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyPressedEvent, MouseScrolledEvent};
    use approx::assert_relative_eq;

    fn scroll(y_offset: f32) -> Event {
        MouseScrolledEvent {
            x_offset: 0.0,
            y_offset,
        }
        .into()
    }

    #[test]
    fn scroll_zooms_and_clamps() {
        let mut controller = OrthographicCameraController::new(16.0 / 9.0, false);
        assert_eq!(controller.on_event(&scroll(1.0)), Propagation::Unhandled);
        assert_relative_eq!(controller.zoom_level(), 0.75);

        for _ in 0..10 {
            controller.on_event(&scroll(1.0));
        }
        assert_relative_eq!(controller.zoom_level(), MIN_ZOOM);

        controller.on_event(&scroll(-2.0));
        assert_relative_eq!(controller.zoom_level(), 0.75);
        let (_, right, _, top) = controller.camera().bounds();
        assert_relative_eq!(top, 0.75);
        assert_relative_eq!(right, 16.0 / 9.0 * 0.75);
    }

    #[test]
    fn resize_updates_aspect_but_ignores_minimize() {
        let mut controller = OrthographicCameraController::new(1.0, false);
        let resize: Event = WindowResizeEvent::new(200, 100, 100, 100).into();
        assert_eq!(controller.on_event(&resize), Propagation::Unhandled);
        assert_relative_eq!(controller.aspect_ratio(), 2.0);

        let minimize: Event = WindowResizeEvent::new(0, 0, 200, 100).into();
        controller.on_event(&minimize);
        assert_relative_eq!(controller.aspect_ratio(), 2.0);
    }

    #[test]
    fn held_keys_pan_and_rotate() {
        let mut controller = OrthographicCameraController::new(1.0, true);
        let mut input = Input::new();
        input.on_event(&KeyPressedEvent::new(KeyCode::D, 0).into());
        input.on_event(&KeyPressedEvent::new(KeyCode::W, 0).into());
        controller.on_update(Timestep::from_seconds(0.5), &input);
        let position = controller.camera().position();
        assert_relative_eq!(position.x, 0.5);
        assert_relative_eq!(position.y, 0.5);

        input.on_event(&KeyPressedEvent::new(KeyCode::Q, 0).into());
        controller.on_update(Timestep::from_seconds(0.25), &input);
        assert_relative_eq!(controller.camera().rotation(), 45.0);
    }
}
