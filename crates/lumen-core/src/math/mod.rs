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

//! Small linear-algebra toolkit used by the camera and the 2D renderer.
//!
//! Matrices are column-major and follow the OpenGL clip-space convention
//! (`[-1, 1]` depth). Angles are in radians unless a function name says otherwise.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::PI;

/// The factor to convert degrees to radians.
pub const DEG_TO_RAD: f32 = PI / 180.0;

pub mod color;
pub mod dimension;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::dimension::Extent2D;
pub use self::matrix::{Mat3, Mat4};
pub use self::vector::{Vec2, Vec3, Vec4};

/// Converts an angle from degrees to radians.
///
/// ```
/// use lumen_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Returns `true` when `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
