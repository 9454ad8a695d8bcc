#![allow(dead_code)]

use lumen_core::math::{Extent2D, LinearRgba, Mat3, Mat4, Vec2, Vec3, Vec4};
use lumen_core::renderer::traits::resolve_index_count;
use lumen_core::renderer::{
    AttributeAllocator, BufferLayout, GraphicsDevice, IndexBuffer, RenderError, RendererApi,
    RenderingApi, ResourceError, Shader, ShaderError, ShaderSources, Texture2D, TextureFormat,
    VertexArray, VertexBuffer,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Everything the mock backend was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init,
    Viewport(u32, u32, Extent2D),
    ClearColor(LinearRgba),
    Clear,
    Draw { index_count: u32 },
    BindShader(String),
    SetInt(String, i32),
    SetFloat(String, f32),
    SetFloat4(String, Vec4),
    SetMat4(String, Mat4),
    BindTexture { width: u32, height: u32, slot: u32 },
    SetTextureData(usize),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug)]
pub struct MockRendererApi {
    api: RenderingApi,
    log: CallLog,
    draw_calls: u32,
}

impl MockRendererApi {
    pub fn new(api: RenderingApi) -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                api,
                log: Rc::clone(&log),
                draw_calls: 0,
            },
            log,
        )
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl GraphicsDevice for MockRendererApi {
    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn VertexBuffer>, ResourceError> {
        Ok(Box::new(MockVertexBuffer {
            size: data.len(),
            layout: BufferLayout::default(),
        }))
    }

    fn create_dynamic_vertex_buffer(
        &self,
        size: usize,
    ) -> Result<Box<dyn VertexBuffer>, ResourceError> {
        Ok(Box::new(MockVertexBuffer {
            size,
            layout: BufferLayout::default(),
        }))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn IndexBuffer>, ResourceError> {
        Ok(Box::new(MockIndexBuffer {
            count: indices.len() as u32,
        }))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>, ResourceError> {
        Ok(Box::new(MockVertexArray::default()))
    }

    fn create_shader(
        &self,
        name: &str,
        _sources: &ShaderSources,
    ) -> Result<Rc<dyn Shader>, ShaderError> {
        Ok(Rc::new(MockShader {
            name: name.to_owned(),
            log: Rc::clone(&self.log),
        }))
    }

    fn create_texture(&self, width: u32, height: u32) -> Result<Rc<dyn Texture2D>, ResourceError> {
        Ok(Rc::new(MockTexture {
            width,
            height,
            log: Rc::clone(&self.log),
        }))
    }

    fn create_texture_from_file(&self, path: &Path) -> Result<Rc<dyn Texture2D>, ResourceError> {
        Err(ResourceError::ImageLoad {
            path: path.display().to_string(),
            reason: "the mock backend does not decode images".to_owned(),
        })
    }
}

impl RendererApi for MockRendererApi {
    fn init(&mut self) -> Result<(), RenderError> {
        self.record(Call::Init);
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, extent: Extent2D) {
        self.record(Call::Viewport(x, y, extent));
    }

    fn set_clear_color(&mut self, color: LinearRgba) {
        self.record(Call::ClearColor(color));
    }

    fn clear(&mut self) {
        self.record(Call::Clear);
    }

    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) {
        let index_count = resolve_index_count(vertex_array, index_count);
        self.record(Call::Draw { index_count });
        self.draw_calls += 1;
    }

    fn rendering_api(&self) -> RenderingApi {
        self.api
    }

    fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    fn reset_draw_calls(&mut self) {
        self.draw_calls = 0;
    }
}

#[derive(Debug)]
pub struct MockVertexBuffer {
    size: usize,
    layout: BufferLayout,
}

impl VertexBuffer for MockVertexBuffer {
    fn bind(&self) {}
    fn unbind(&self) {}

    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError> {
        if data.len() > self.size {
            return Err(ResourceError::OutOfBounds {
                len: data.len(),
                capacity: self.size,
            });
        }
        Ok(())
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_layout(&mut self, layout: BufferLayout) {
        self.layout = layout;
    }
}

#[derive(Debug)]
pub struct MockIndexBuffer {
    count: u32,
}

impl IndexBuffer for MockIndexBuffer {
    fn bind(&self) {}
    fn unbind(&self) {}

    fn count(&self) -> u32 {
        self.count
    }
}

#[derive(Debug, Default)]
pub struct MockVertexArray {
    allocator: AttributeAllocator,
    vertex_buffers: Vec<Rc<dyn VertexBuffer>>,
    index_buffer: Option<Rc<dyn IndexBuffer>>,
}

impl VertexArray for MockVertexArray {
    fn bind(&self) {}
    fn unbind(&self) {}

    fn add_vertex_buffer(&mut self, buffer: Rc<dyn VertexBuffer>) -> Result<(), ResourceError> {
        self.allocator.allocate(buffer.layout())?;
        self.vertex_buffers.push(buffer);
        Ok(())
    }

    fn set_index_buffer(&mut self, buffer: Rc<dyn IndexBuffer>) {
        self.index_buffer = Some(buffer);
    }

    fn vertex_buffers(&self) -> &[Rc<dyn VertexBuffer>] {
        &self.vertex_buffers
    }

    fn index_buffer(&self) -> Option<&Rc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }
}

#[derive(Debug)]
pub struct MockShader {
    name: String,
    log: CallLog,
}

impl MockShader {
    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl Shader for MockShader {
    fn bind(&self) {
        self.record(Call::BindShader(self.name.clone()));
    }
    fn unbind(&self) {}

    fn name(&self) -> &str {
        &self.name
    }

    fn set_int(&self, name: &str, value: i32) {
        self.record(Call::SetInt(name.to_owned(), value));
    }
    fn set_int_array(&self, _name: &str, _values: &[i32]) {}
    fn set_float(&self, name: &str, value: f32) {
        self.record(Call::SetFloat(name.to_owned(), value));
    }
    fn set_float2(&self, _name: &str, _value: Vec2) {}
    fn set_float3(&self, _name: &str, _value: Vec3) {}
    fn set_float4(&self, name: &str, value: Vec4) {
        self.record(Call::SetFloat4(name.to_owned(), value));
    }
    fn set_mat3(&self, _name: &str, _value: &Mat3) {}
    fn set_mat4(&self, name: &str, value: &Mat4) {
        self.record(Call::SetMat4(name.to_owned(), *value));
    }
}

#[derive(Debug)]
pub struct MockTexture {
    width: u32,
    height: u32,
    log: CallLog,
}

impl Texture2D for MockTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        TextureFormat::Rgba8
    }

    fn set_data(&self, data: &[u8]) -> Result<(), ResourceError> {
        self.format().validate_data(self.width, self.height, data)?;
        self.log.borrow_mut().push(Call::SetTextureData(data.len()));
        Ok(())
    }

    fn bind(&self, slot: u32) {
        self.log.borrow_mut().push(Call::BindTexture {
            width: self.width,
            height: self.height,
            slot,
        });
    }
}

/// Builds a vertex array holding one quad through the public factories.
pub fn quad(api: &dyn RendererApi) -> Box<dyn VertexArray> {
    use lumen_core::renderer::{
        create_index_buffer, create_vertex_array, create_vertex_buffer, BufferElement,
        ShaderDataType,
    };

    let mut va = create_vertex_array(api).unwrap();
    let mut vb = create_vertex_buffer(api, &[0.0; 12]).unwrap();
    vb.set_layout(BufferLayout::new([BufferElement::new(
        ShaderDataType::Float3,
        "a_Position",
    )]));
    va.add_vertex_buffer(Rc::from(vb)).unwrap();
    va.set_index_buffer(Rc::from(create_index_buffer(api, &[0, 1, 2, 2, 3, 0]).unwrap()));
    va
}
