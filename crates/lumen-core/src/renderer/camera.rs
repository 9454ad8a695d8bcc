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

//! A 2D orthographic camera.

use crate::math::{degrees_to_radians, Mat4, Vec3};

/// An orthographic camera with a position and a rotation around Z.
///
/// The three matrices are always consistent: moving or rotating recomputes
/// view and view-projection together, and changing the bounds recomputes
/// projection and view-projection together.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera {
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    position: Vec3,
    rotation: f32,
    projection: Mat4,
    view: Mat4,
    view_projection: Mat4,
}

impl OrthographicCamera {
    /// Default near plane.
    pub const NEAR: f32 = -1.0;
    /// Default far plane.
    pub const FAR: f32 = 1.0;

    /// Creates a camera at the origin with the given bounds and the default depth range.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self::with_depth(left, right, bottom, top, Self::NEAR, Self::FAR)
    }

    /// Creates a camera at the origin with explicit near and far planes.
    pub fn with_depth(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let projection = Mat4::orthographic_rh_gl(left, right, bottom, top, near, far);
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
            position: Vec3::ZERO,
            rotation: 0.0,
            projection,
            view: Mat4::IDENTITY,
            view_projection: projection,
        }
    }

    /// Replaces the bounds, keeping the depth range.
    pub fn set_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        self.projection = Mat4::orthographic_rh_gl(left, right, bottom, top, self.near, self.far);
        self.view_projection = self.projection * self.view;
    }

    /// Moves the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate_view();
    }

    /// Rotates the camera, in degrees counter-clockwise.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.recalculate_view();
    }

    fn recalculate_view(&mut self) {
        let transform = Mat4::from_translation(self.position)
            * Mat4::from_rotation_z(degrees_to_radians(self.rotation));
        // A translation-rotation is always invertible.
        self.view = transform.inverse().unwrap_or(Mat4::IDENTITY);
        self.view_projection = self.projection * self.view;
    }

    /// The camera position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// `(left, right, bottom, top)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.left, self.right, self.bottom, self.top)
    }

    /// The projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// The view matrix (inverse of the camera transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Projection times view.
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    fn project(camera: &OrthographicCamera, x: f32, y: f32) -> Vec4 {
        *camera.view_projection_matrix() * Vec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn moving_the_camera_updates_view_projection() {
        let mut camera = OrthographicCamera::new(-2.0, 2.0, -1.0, 1.0);
        let before = *camera.view_projection_matrix();
        camera.set_position(Vec3::new(1.0, 0.5, 0.0));
        assert_ne!(*camera.view_projection_matrix(), before);
        assert_eq!(
            *camera.view_projection_matrix(),
            *camera.projection_matrix() * *camera.view_matrix()
        );

        // The camera position maps to the center of clip space.
        let center = project(&camera, 1.0, 0.5);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_turns_the_world_the_other_way() {
        let mut camera = OrthographicCamera::new(-1.0, 1.0, -1.0, 1.0);
        camera.set_rotation(90.0);
        let p = project(&camera, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn set_projection_keeps_view() {
        let mut camera = OrthographicCamera::new(-1.0, 1.0, -1.0, 1.0);
        camera.set_position(Vec3::new(3.0, 0.0, 0.0));
        let view = *camera.view_matrix();
        camera.set_projection(-4.0, 4.0, -2.0, 2.0);
        assert_eq!(*camera.view_matrix(), view);
        assert_eq!(camera.bounds(), (-4.0, 4.0, -2.0, 2.0));
        assert_eq!(
            *camera.view_projection_matrix(),
            *camera.projection_matrix() * view
        );
        let edge = project(&camera, 7.0, 2.0);
        assert_relative_eq!(edge.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(edge.y, 1.0, epsilon = 1e-6);
    }
}
