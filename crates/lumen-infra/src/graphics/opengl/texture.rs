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

use std::path::Path;
use std::rc::Rc;

use glow::{HasContext, PixelUnpackData};
use lumen_core::renderer::{ResourceError, Texture2D, TextureFormat};

use super::{backend_error, gl_size};

/// Internal and upload formats for a CPU-side pixel format.
fn gl_formats(format: TextureFormat) -> (i32, u32) {
    match format {
        TextureFormat::Rgb8 => (glow::RGB8 as i32, glow::RGB),
        TextureFormat::Rgba8 => (glow::RGBA8 as i32, glow::RGBA),
    }
}

/// An immutable-size 2D texture.
pub struct GlTexture2D {
    gl: Rc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    format: TextureFormat,
}

impl GlTexture2D {
    /// Allocates an empty RGBA texture, to be filled with `set_data`.
    pub fn new(gl: Rc<glow::Context>, width: u32, height: u32) -> Result<Self, ResourceError> {
        Self::upload(gl, width, height, TextureFormat::Rgba8, None)
    }

    /// Decodes an image file and uploads it with the bottom row first, as GL
    /// samples it.
    ///
    /// # Errors
    ///
    /// [`ResourceError::ImageLoad`] if the file cannot be decoded and
    /// [`ResourceError::UnsupportedFormat`] for images that are neither RGB
    /// nor RGBA.
    pub fn from_file(gl: Rc<glow::Context>, path: &Path) -> Result<Self, ResourceError> {
        let image = image::open(path).map_err(|e| ResourceError::ImageLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let image = image.flipv();
        let (width, height) = (image.width(), image.height());

        let texture = match image.color().channel_count() {
            3 => Self::upload(
                gl,
                width,
                height,
                TextureFormat::Rgb8,
                Some(image.to_rgb8().as_raw().as_slice()),
            )?,
            4 => Self::upload(
                gl,
                width,
                height,
                TextureFormat::Rgba8,
                Some(image.to_rgba8().as_raw().as_slice()),
            )?,
            channels => return Err(ResourceError::UnsupportedFormat { channels }),
        };
        log::debug!("Loaded texture '{}' ({width}x{height}).", path.display());
        Ok(texture)
    }

    fn upload(
        gl: Rc<glow::Context>,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: Option<&[u8]>,
    ) -> Result<Self, ResourceError> {
        let (internal_format, data_format) = gl_formats(format);
        let (gl_width, gl_height) = (gl_size(width)?, gl_size(height)?);
        let id = unsafe { gl.create_texture() }.map_err(backend_error("texture"))?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(id));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                gl_width,
                gl_height,
                0,
                data_format,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(pixels),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
        }
        Ok(Self {
            gl,
            id,
            width,
            height,
            format,
        })
    }
}

impl std::fmt::Debug for GlTexture2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlTexture2D")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

impl Texture2D for GlTexture2D {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError> {
        self.format.validate_data(self.width, self.height, data)?;
        let (_, data_format) = gl_formats(self.format);
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                gl_size(self.width)?,
                gl_size(self.height)?,
                data_format,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(data)),
            );
        }
        Ok(())
    }

    fn bind(&self, slot: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + slot);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for GlTexture2D {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.id) };
    }
}
