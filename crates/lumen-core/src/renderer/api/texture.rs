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

//! 2D textures.

use super::buffer::unsupported_backend;
use super::RenderingApi;
use crate::renderer::error::ResourceError;
use crate::renderer::traits::RendererApi;
use std::fmt::Debug;
use std::path::Path;
use std::rc::Rc;

/// Pixel format of a texture's CPU-side data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    Rgba8,
}

impl TextureFormat {
    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Checks that `data` covers a `width` x `height` image exactly.
    pub fn validate_data(self, width: u32, height: u32, data: &[u8]) -> Result<(), ResourceError> {
        let expected = width as usize * height as usize * self.bytes_per_pixel();
        if data.len() != expected {
            return Err(ResourceError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(())
    }
}

/// A sampled 2D image.
pub trait Texture2D: Debug {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// The CPU-side format `set_data` expects.
    fn format(&self) -> TextureFormat;
    /// Replaces the whole image.
    ///
    /// # Errors
    ///
    /// [`ResourceError::DataSizeMismatch`] unless `data.len()` equals
    /// `width * height * bytes_per_pixel`.
    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError>;
    /// Binds the texture to a sampler slot.
    fn bind(&self, slot: u32);
}

/// Creates an empty RGBA texture, to be filled with `set_data`.
pub fn create_texture(
    api: &dyn RendererApi,
    width: u32,
    height: u32,
) -> Result<Rc<dyn Texture2D>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_texture(width, height),
        other => Err(unsupported_backend("texture", other)),
    }
}

/// Loads and uploads an image file.
pub fn create_texture_from_file(
    api: &dyn RendererApi,
    path: impl AsRef<Path>,
) -> Result<Rc<dyn Texture2D>, ResourceError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_texture_from_file(path.as_ref()),
        other => Err(unsupported_backend("texture", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_must_cover_image_exactly() {
        assert!(TextureFormat::Rgba8.validate_data(2, 2, &[0; 16]).is_ok());
        assert!(TextureFormat::Rgb8.validate_data(2, 2, &[0; 12]).is_ok());
        let err = TextureFormat::Rgba8.validate_data(2, 2, &[0; 12]).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::DataSizeMismatch {
                expected: 16,
                actual: 12
            }
        ));
    }
}
