use lumen_core::renderer::{select_rendering_api, BackendSupport, RenderError, RenderingApi};
use lumen_core::settings::{resolve_rendering_api, Settings, SettingsError};
use std::fs;
use tempfile::tempdir;

/// A platform that can only run the listed APIs.
struct MockPlatform(Vec<RenderingApi>);

impl BackendSupport for MockPlatform {
    fn is_backend_supported(&self, api: RenderingApi) -> bool {
        self.0.contains(&api)
    }
}

#[test]
fn unsupported_request_falls_back_and_is_written_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        format!(
            r#"{{"RenderingAPI": {{"API": {}, "Info": "stale"}}, "Keep": 1}}"#,
            RenderingApi::DirectX12Desktop.bits()
        ),
    )
    .unwrap();
    let platform = MockPlatform(vec![RenderingApi::OpenGlDesktop]);

    let (mut settings, existed) = Settings::open(&path).unwrap();
    assert!(existed);
    let first = resolve_rendering_api(&mut settings, &platform).unwrap();
    assert_eq!(first.api, RenderingApi::OpenGlDesktop);
    assert!(first.fell_back);

    let (mut reopened, _) = Settings::open(&path).unwrap();
    assert_eq!(
        reopened.data()["RenderingAPI"]["API"],
        RenderingApi::OpenGlDesktop.bits()
    );
    assert_eq!(reopened.data()["RenderingAPI"]["Info"], "OpenGL (Desktop)");
    assert_eq!(reopened.data()["Keep"], 1);

    let second = resolve_rendering_api(&mut reopened, &platform).unwrap();
    assert_eq!(second.api, RenderingApi::OpenGlDesktop);
    assert!(!second.fell_back);
}

#[test]
fn fallback_follows_the_fixed_priority_order() {
    let platform = MockPlatform(vec![RenderingApi::DirectX11Desktop, RenderingApi::VulkanDesktop]);
    let selection = select_rendering_api(RenderingApi::MetalDesktop, &platform).unwrap();
    assert_eq!(selection.api, RenderingApi::VulkanDesktop);
    assert_eq!(
        platform.supported_backends(),
        [RenderingApi::VulkanDesktop, RenderingApi::DirectX11Desktop]
    );
}

#[test]
fn no_backend_is_fatal_and_leaves_the_file_alone() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let (mut settings, _) = Settings::open(&path).unwrap();
    let result = resolve_rendering_api(&mut settings, &MockPlatform(Vec::new()));
    assert!(matches!(
        result,
        Err(SettingsError::Render(RenderError::NoSupportedBackend))
    ));
    assert!(!path.exists());
}
