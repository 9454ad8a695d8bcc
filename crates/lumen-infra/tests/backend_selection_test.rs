use lumen_core::renderer::{BackendSupport, RenderingApi};
use lumen_core::settings::{resolve_rendering_api, Settings};
use lumen_infra::PlatformBackends;

/// A request for an API this build cannot run is replaced and persisted.
#[cfg(feature = "opengl")]
#[test]
fn test_unbuilt_backend_falls_back_to_opengl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let (mut settings, _) = Settings::open(&path).unwrap();
    settings.set_rendering_api(RenderingApi::MetalDesktop);

    let platform = PlatformBackends::new();
    let selection = resolve_rendering_api(&mut settings, &platform).unwrap();
    if !platform.is_backend_supported(RenderingApi::MetalDesktop) {
        assert!(selection.fell_back);
        assert_eq!(selection.api, RenderingApi::OpenGlDesktop);
    }

    let (reopened, existed) = Settings::open(&path).unwrap();
    assert!(existed);
    assert_eq!(reopened.requested_rendering_api(), selection.api);
}

/// A stored Vulkan request must not reach renderer creation.
#[cfg(feature = "opengl")]
#[test]
fn test_stored_vulkan_request_resolves_to_opengl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let (mut settings, _) = Settings::open(&path).unwrap();
    settings.set_rendering_api(RenderingApi::VulkanDesktop);

    let selection = resolve_rendering_api(&mut settings, &PlatformBackends::new()).unwrap();
    assert!(selection.fell_back);
    assert_eq!(selection.api, RenderingApi::OpenGlDesktop);
    assert_eq!(
        PlatformBackends::new().supported_backends(),
        vec![RenderingApi::OpenGlDesktop]
    );
}
