mod common;

use common::{quad, Call, MockRendererApi};
use lumen_core::math::{Extent2D, LinearRgba, Mat4, Vec2, Vec3};
use lumen_core::renderer::{
    create_index_buffer, create_shader, create_shader_from_file, create_texture,
    create_vertex_array, create_vertex_buffer, OrthographicCamera, RenderCommand, Renderer,
    Renderer2D, RenderingApi, ResourceError, ShaderError, ShaderLibrary, ShaderSources,
};
use std::rc::Rc;

const SOURCE: &str = "#type vertex\nvoid main() {}\n#type fragment\nvoid main() {}\n";

#[test]
fn submit_uploads_camera_and_transform_then_draws() {
    let (api, log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let mut renderer = Renderer::new(Box::new(api));
    renderer.init().unwrap();

    let sources = ShaderSources::parse("Flat", SOURCE).unwrap();
    let shader = create_shader(renderer.api(), "Flat", &sources.vertex, &sources.fragment).unwrap();
    let va = quad(renderer.api());

    let mut camera = OrthographicCamera::new(-1.0, 1.0, -1.0, 1.0);
    camera.set_position(Vec3::new(0.5, 0.0, 0.0));
    let transform = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));

    log.borrow_mut().clear();
    renderer.begin_scene(&camera);
    renderer.submit(shader.as_ref(), va.as_ref(), &transform);
    renderer.end_scene();

    assert_eq!(
        *log.borrow(),
        [
            Call::BindShader("Flat".to_owned()),
            Call::SetMat4("u_ViewProjection".to_owned(), *camera.view_projection_matrix()),
            Call::SetMat4("u_Transform".to_owned(), transform),
            Call::Draw { index_count: 6 },
        ]
    );
    assert_eq!(renderer.command().draw_calls(), 1);
    assert_eq!(renderer.scene_data().view_projection, *camera.view_projection_matrix());
}

#[test]
fn resize_sets_a_full_viewport() {
    let (api, log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let mut renderer = Renderer::new(Box::new(api));
    renderer.on_window_resize(Extent2D::new(800, 600));
    renderer.set_clear_color(LinearRgba::CHARCOAL);
    renderer.clear();
    assert_eq!(
        *log.borrow(),
        [
            Call::Viewport(0, 0, Extent2D::new(800, 600)),
            Call::ClearColor(LinearRgba::CHARCOAL),
            Call::Clear,
        ]
    );
}

#[test]
fn draw_calls_reset_per_frame() {
    let (api, _log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let mut command = RenderCommand::new(Box::new(api));
    let va = quad(command.api());
    command.draw_indexed(va.as_ref(), 0);
    command.draw_indexed(va.as_ref(), 3);
    assert_eq!(command.draw_calls(), 2);
    command.reset_draw_calls();
    assert_eq!(command.draw_calls(), 0);
}

#[test]
fn renderer2d_issues_one_draw_per_quad() {
    let (api, log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let mut command = RenderCommand::new(Box::new(api));
    let renderer2d = Renderer2D::new(command.api()).unwrap();
    let checkerboard = create_texture(command.api(), 2, 2).unwrap();
    let camera = OrthographicCamera::new(-1.6, 1.6, -0.9, 0.9);

    log.borrow_mut().clear();
    let mut scene = renderer2d.begin_scene(&mut command, &camera);
    scene.draw_quad(Vec3::ZERO, Vec2::ONE, LinearRgba::RED);
    scene.draw_rotated_quad(Vec3::new(1.0, 0.0, 0.0), Vec2::ONE, 45.0, LinearRgba::BLUE);
    scene.draw_textured_quad(
        Vec3::new(0.0, 0.0, -0.1),
        Vec2::new(10.0, 10.0),
        checkerboard.as_ref(),
        10.0,
        LinearRgba::WHITE,
    );
    scene.end_scene();

    assert_eq!(command.draw_calls(), 3);
    let log = log.borrow();
    let draws = log.iter().filter(|c| matches!(c, Call::Draw { index_count: 6 })).count();
    assert_eq!(draws, 3);
    assert!(log.contains(&Call::SetFloat("u_TilingFactor".to_owned(), 10.0)));
    assert!(log.contains(&Call::BindTexture {
        width: 2,
        height: 2,
        slot: 0
    }));
    assert!(log.contains(&Call::SetFloat4("u_Color".to_owned(), LinearRgba::RED.to_vec4())));
}

#[test]
fn renderer2d_uploads_a_white_pixel() {
    let (api, log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    Renderer2D::new(&api).unwrap();
    assert!(log.borrow().contains(&Call::SetTextureData(4)));
    assert!(log.borrow().contains(&Call::SetInt("u_Texture".to_owned(), 0)));
}

#[test]
fn factories_reject_unimplemented_backends() {
    let (api, _log) = MockRendererApi::new(RenderingApi::VulkanDesktop);
    assert!(matches!(
        create_vertex_array(&api),
        Err(ResourceError::UnsupportedBackend(RenderingApi::VulkanDesktop))
    ));
    assert!(matches!(
        create_vertex_buffer(&api, &[0.0; 3]),
        Err(ResourceError::UnsupportedBackend(_))
    ));
    assert!(matches!(
        create_index_buffer(&api, &[0, 1, 2]),
        Err(ResourceError::UnsupportedBackend(_))
    ));
    assert!(matches!(
        create_texture(&api, 1, 1),
        Err(ResourceError::UnsupportedBackend(_))
    ));
    assert!(matches!(
        create_shader(&api, "Flat", "", ""),
        Err(ShaderError::Resource(ResourceError::UnsupportedBackend(_)))
    ));
    assert!(Renderer2D::new(&api).is_err());
}

#[test]
fn texture_data_must_match_its_size() {
    let (api, _log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let texture = create_texture(&api, 2, 2).unwrap();
    assert!(matches!(
        texture.set_data(&[0; 4]),
        Err(ResourceError::DataSizeMismatch {
            expected: 16,
            actual: 4
        })
    ));
    assert!(texture.set_data(&[0; 16]).is_ok());
}

#[test]
fn shader_library_loads_by_file_stem() {
    let (api, log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FlatColor.glsl");
    std::fs::write(&path, SOURCE).unwrap();

    let mut library = ShaderLibrary::new();
    let shader = library.load(&api, &path).unwrap();
    assert_eq!(shader.name(), "FlatColor");
    assert!(library.exists("FlatColor"));
    assert_eq!(library.get("FlatColor").unwrap().name(), "FlatColor");

    let renamed = library.load_named(&api, "Other", &path).unwrap();
    assert_eq!(renamed.name(), "Other");
    assert_eq!(library.len(), 2);
    assert!(log.borrow().is_empty());
}

#[test]
fn shader_file_errors_are_reported() {
    let (api, _log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Missing.glsl");
    assert!(matches!(
        create_shader_from_file(&api, &missing),
        Err(ShaderError::Io { .. })
    ));

    let broken = dir.path().join("Broken.glsl");
    std::fs::write(&broken, "#type geometry\nvoid main() {}\n").unwrap();
    assert!(matches!(
        create_shader_from_file(&api, &broken),
        Err(ShaderError::Parse { .. })
    ));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "already exists"))]
fn shader_library_rejects_duplicates() {
    let (api, _log) = MockRendererApi::new(RenderingApi::OpenGlDesktop);
    let mut library = ShaderLibrary::new();
    let shader = create_shader(&api, "Flat", "", "").unwrap();
    library.add(Rc::clone(&shader)).unwrap();
    assert!(matches!(
        library.add(shader),
        Err(ShaderError::DuplicateName(name)) if name == "Flat"
    ));
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "not found"))]
fn shader_library_reports_missing_names() {
    let library = ShaderLibrary::new();
    assert!(matches!(library.get("Missing"), Err(ShaderError::NotFound(_))));
}
