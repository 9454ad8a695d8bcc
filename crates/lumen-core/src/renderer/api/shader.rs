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

//! Shader programs, the single-file shader format, and the shader library.
//!
//! A shader file holds every stage, each introduced by a `#type` line:
//!
//! ```glsl
//! #type vertex
//! #version 330 core
//! void main() { /* ... */ }
//!
//! #type fragment
//! #version 330 core
//! void main() { /* ... */ }
//! ```

use super::buffer::unsupported_backend;
use super::RenderingApi;
use crate::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::renderer::error::ShaderError;
use crate::renderer::traits::RendererApi;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;
use std::rc::Rc;

const TYPE_TOKEN: &str = "#type";

/// A linked GPU program.
///
/// Uniform setters look the location up by name on every call and silently
/// do nothing if the program has no uniform with that name.
pub trait Shader: Debug {
    /// Makes this program current.
    fn bind(&self);
    /// Clears the current program.
    fn unbind(&self);
    /// The library name of the shader.
    fn name(&self) -> &str;

    /// Uploads an `int` (also used for sampler slots).
    fn set_int(&self, name: &str, value: i32);
    /// Uploads an `int[]`.
    fn set_int_array(&self, name: &str, values: &[i32]);
    /// Uploads a `float`.
    fn set_float(&self, name: &str, value: f32);
    /// Uploads a `vec2`.
    fn set_float2(&self, name: &str, value: Vec2);
    /// Uploads a `vec3`.
    fn set_float3(&self, name: &str, value: Vec3);
    /// Uploads a `vec4`.
    fn set_float4(&self, name: &str, value: Vec4);
    /// Uploads a `mat3`.
    fn set_mat3(&self, name: &str, value: &Mat3);
    /// Uploads a `mat4`.
    fn set_mat4(&self, name: &str, value: &Mat4);
}

/// The per-stage sources of one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    /// Vertex stage GLSL.
    pub vertex: String,
    /// Fragment stage GLSL.
    pub fragment: String,
}

impl ShaderSources {
    /// Splits a single-file shader on its `#type` lines.
    ///
    /// `pixel` is accepted as an alias for `fragment`. Text before the first
    /// `#type` line is ignored.
    pub fn parse(name: &str, source: &str) -> Result<Self, ShaderError> {
        let parse_error = |reason: String| ShaderError::Parse {
            name: name.to_owned(),
            reason,
        };

        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;
        let mut current: Option<&mut Option<String>> = None;

        for line in source.lines() {
            if let Some(stage) = line.trim_start().strip_prefix(TYPE_TOKEN) {
                current = match stage.trim() {
                    "vertex" => Some(&mut vertex),
                    "fragment" | "pixel" => Some(&mut fragment),
                    other => return Err(parse_error(format!("unknown shader type '{other}'"))),
                };
                if let Some(slot) = current.as_deref_mut() {
                    if slot.is_some() {
                        return Err(parse_error(format!("stage '{}' declared twice", stage.trim())));
                    }
                    *slot = Some(String::new());
                }
                continue;
            }
            if let Some(Some(text)) = current.as_deref_mut() {
                text.push_str(line);
                text.push('\n');
            }
        }

        match (vertex, fragment) {
            (Some(vertex), Some(fragment)) => Ok(Self { vertex, fragment }),
            (None, _) => Err(parse_error("missing vertex stage".to_owned())),
            (_, None) => Err(parse_error("missing fragment stage".to_owned())),
        }
    }
}

/// Compiles a program from in-memory sources.
///
/// # Errors
///
/// Compile and link failures are reported as [`ShaderError::CompilationFailed`]
/// and [`ShaderError::LinkFailed`].
pub fn create_shader(
    api: &dyn RendererApi,
    name: &str,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<Rc<dyn Shader>, ShaderError> {
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_shader(
            name,
            &ShaderSources {
                vertex: vertex_src.to_owned(),
                fragment: fragment_src.to_owned(),
            },
        ),
        other => Err(unsupported_backend("shader", other).into()),
    }
}

/// Reads, splits and compiles a single-file shader. The name is the file stem.
pub fn create_shader_from_file(
    api: &dyn RendererApi,
    path: impl AsRef<Path>,
) -> Result<Rc<dyn Shader>, ShaderError> {
    let path = path.as_ref();
    create_named_shader_from_file(api, &name_from_path(path), path)
}

fn create_named_shader_from_file(
    api: &dyn RendererApi,
    name: &str,
    path: &Path,
) -> Result<Rc<dyn Shader>, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let sources = ShaderSources::parse(name, &source)?;
    match api.rendering_api() {
        RenderingApi::OpenGlDesktop => api.create_shader(name, &sources),
        other => Err(unsupported_backend("shader", other).into()),
    }
}

fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Shaders by name.
#[derive(Debug, Default)]
pub struct ShaderLibrary {
    shaders: HashMap<String, Rc<dyn Shader>>,
}

impl ShaderLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shader under its own name.
    pub fn add(&mut self, shader: Rc<dyn Shader>) -> Result<(), ShaderError> {
        let name = shader.name().to_owned();
        self.add_named(name, shader)
    }

    /// Adds a shader under `name`.
    ///
    /// # Errors
    ///
    /// [`ShaderError::DuplicateName`] if the name is taken. Debug builds assert.
    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        shader: Rc<dyn Shader>,
    ) -> Result<(), ShaderError> {
        let name = name.into();
        debug_assert!(!self.exists(&name), "shader '{name}' already exists");
        if self.exists(&name) {
            return Err(ShaderError::DuplicateName(name));
        }
        self.shaders.insert(name, shader);
        Ok(())
    }

    /// Loads a shader file and adds it under its file stem.
    pub fn load(
        &mut self,
        api: &dyn RendererApi,
        path: impl AsRef<Path>,
    ) -> Result<Rc<dyn Shader>, ShaderError> {
        let path = path.as_ref();
        self.load_named(api, name_from_path(path), path)
    }

    /// Loads a shader file and adds it under `name`.
    pub fn load_named(
        &mut self,
        api: &dyn RendererApi,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Rc<dyn Shader>, ShaderError> {
        let name = name.into();
        let shader = create_named_shader_from_file(api, &name, path.as_ref())?;
        self.add_named(name, Rc::clone(&shader))?;
        Ok(shader)
    }

    /// Looks a shader up.
    ///
    /// # Errors
    ///
    /// [`ShaderError::NotFound`] if no shader has that name. Debug builds assert.
    pub fn get(&self, name: &str) -> Result<Rc<dyn Shader>, ShaderError> {
        debug_assert!(self.exists(name), "shader '{name}' not found");
        self.shaders
            .get(name)
            .cloned()
            .ok_or_else(|| ShaderError::NotFound(name.to_owned()))
    }

    /// Returns `true` if a shader has that name.
    pub fn exists(&self, name: &str) -> bool {
        self.shaders.contains_key(name)
    }

    /// Number of shaders.
    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    /// Returns `true` if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT: &str = "\
// leading comment is ignored
#type vertex
#version 330 core
void main() {}

#type pixel
#version 330 core
out vec4 color;
void main() { color = vec4(1.0); }
";

    #[test]
    fn splits_stages() {
        let sources = ShaderSources::parse("flat", FLAT).unwrap();
        assert!(sources.vertex.starts_with("#version 330 core\nvoid main() {}"));
        assert!(sources.fragment.contains("out vec4 color;"));
        assert!(!sources.vertex.contains("#type"));
        assert!(!sources.vertex.contains("leading comment"));
    }

    #[test]
    fn rejects_unknown_stage() {
        let err = ShaderSources::parse("bad", "#type geometry\nvoid main() {}").unwrap_err();
        assert!(matches!(err, ShaderError::Parse { ref reason, .. } if reason.contains("geometry")));
    }

    #[test]
    fn rejects_missing_stage() {
        let err = ShaderSources::parse("half", "#type vertex\nvoid main() {}").unwrap_err();
        assert!(matches!(err, ShaderError::Parse { ref reason, .. } if reason.contains("fragment")));
    }

    #[test]
    fn rejects_repeated_stage() {
        let src = "#type vertex\na\n#type vertex\nb\n#type fragment\nc\n";
        assert!(ShaderSources::parse("twice", src).is_err());
    }

    #[test]
    fn name_is_file_stem() {
        assert_eq!(name_from_path(Path::new("assets/shaders/Texture.glsl")), "Texture");
    }
}
