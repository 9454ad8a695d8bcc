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
//! GLSL programs.

use std::rc::Rc;

use glow::HasContext;
use lumen_core::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use lumen_core::renderer::{ResourceError, Shader, ShaderError, ShaderSources};

/// A linked GLSL program.
///
/// Uniform locations are looked up by name on every upload; an unknown name
/// resolves to no location and the upload is a no-op.
pub struct GlShader {
    gl: Rc<glow::Context>,
    program: glow::Program,
    name: String,
}

impl GlShader {
    /// Compiles both stages and links them.
    ///
    /// # Errors
    ///
    /// [`ShaderError::CompilationFailed`] with the driver's log for the stage
    /// that failed, or [`ShaderError::LinkFailed`].
    pub fn new(
        gl: Rc<glow::Context>,
        name: &str,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        let program = unsafe { gl.create_program() }
            .map_err(|e| ResourceError::Backend(format!("failed to create program: {e}")))?;

        let stages = [
            (glow::VERTEX_SHADER, "vertex", sources.vertex.as_str()),
            (glow::FRAGMENT_SHADER, "fragment", sources.fragment.as_str()),
        ];
        let mut compiled = Vec::with_capacity(stages.len());
        for (kind, stage, source) in stages {
            match unsafe { compile_stage(&gl, kind, source) } {
                Ok(shader) => compiled.push(shader),
                Err(log) => {
                    unsafe {
                        for shader in compiled {
                            gl.delete_shader(shader);
                        }
                        gl.delete_program(program);
                    }
                    log::error!("{stage} stage of shader '{name}' failed to compile:\n{log}");
                    return Err(ShaderError::CompilationFailed {
                        name: name.to_owned(),
                        stage,
                        log,
                    });
                }
            }
        }

        unsafe {
            for &shader in &compiled {
                gl.attach_shader(program, shader);
            }
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            let log = if linked {
                String::new()
            } else {
                gl.get_program_info_log(program)
            };
            for shader in compiled {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
            if !linked {
                gl.delete_program(program);
                log::error!("Shader '{name}' failed to link:\n{log}");
                return Err(ShaderError::LinkFailed {
                    name: name.to_owned(),
                    log,
                });
            }
        }

        log::debug!("Shader '{name}' compiled and linked.");
        Ok(Self {
            gl,
            program,
            name: name.to_owned(),
        })
    }

    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.program, name) }
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    kind: u32,
    source: &str,
) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(kind)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(log);
        }
        Ok(shader)
    }
}

impl std::fmt::Debug for GlShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlShader")
            .field("name", &self.name)
            .field("program", &self.program)
            .finish()
    }
}

impl Shader for GlShader {
    fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    fn unbind(&self) {
        unsafe { self.gl.use_program(None) };
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_int(&self, name: &str, value: i32) {
        unsafe { self.gl.uniform_1_i32(self.location(name).as_ref(), value) };
    }

    fn set_int_array(&self, name: &str, values: &[i32]) {
        unsafe { self.gl.uniform_1_i32_slice(self.location(name).as_ref(), values) };
    }

    fn set_float(&self, name: &str, value: f32) {
        unsafe { self.gl.uniform_1_f32(self.location(name).as_ref(), value) };
    }

    fn set_float2(&self, name: &str, value: Vec2) {
        unsafe {
            self.gl
                .uniform_2_f32(self.location(name).as_ref(), value.x, value.y)
        };
    }

    fn set_float3(&self, name: &str, value: Vec3) {
        unsafe {
            self.gl
                .uniform_3_f32(self.location(name).as_ref(), value.x, value.y, value.z)
        };
    }

    fn set_float4(&self, name: &str, value: Vec4) {
        unsafe {
            self.gl.uniform_4_f32(
                self.location(name).as_ref(),
                value.x,
                value.y,
                value.z,
                value.w,
            )
        };
    }

    fn set_mat3(&self, name: &str, value: &Mat3) {
        unsafe {
            self.gl.uniform_matrix_3_f32_slice(
                self.location(name).as_ref(),
                false,
                &value.to_cols_array(),
            )
        };
    }

    fn set_mat4(&self, name: &str, value: &Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                self.location(name).as_ref(),
                false,
                &value.to_cols_array(),
            )
        };
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) };
    }
}
