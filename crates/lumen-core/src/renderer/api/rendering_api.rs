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

//! Rendering API identifiers, their persisted bit encoding, and startup selection.

use crate::renderer::error::RenderError;
use crate::renderer::traits::BackendSupport;
use std::fmt;

crate::lumen_bitflags! {
    /// The persisted encoding of a [`RenderingApi`].
    ///
    /// The low byte holds the graphics API and target class, the second byte the
    /// windowing API it runs on. The integer is written to the settings file so
    /// it must stay stable.
    pub struct RenderingApiFlags: u32 {
        /// OpenGL.
        const OPENGL = 1 << 0;
        /// Vulkan.
        const VULKAN = 1 << 1;
        /// Direct3D 11.
        const DIRECTX11 = 1 << 2;
        /// Direct3D 12.
        const DIRECTX12 = 1 << 3;
        /// Metal.
        const METAL = 1 << 4;
        /// Desktop target.
        const DESKTOP = 1 << 7;
        /// Cross-platform `winit` windowing.
        const WINIT = 1 << 8;
        /// Native Win32 windowing.
        const WIN32 = 1 << 9;
        /// Native Cocoa windowing.
        const COCOA = 1 << 10;
    }
}

impl RenderingApiFlags {
    /// Mask of the graphics API bits.
    pub const GRAPHICS_MASK: u32 = 0x1f;
    /// Mask of the windowing API bits.
    pub const WINDOWING_MASK: u32 = 0xff00;
}

/// The windowing system a rendering API is hosted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowingApi {
    /// Cross-platform `winit` windows.
    Winit,
    /// Native Win32 windows.
    Win32,
    /// Native Cocoa windows.
    Cocoa,
}

impl WindowingApi {
    /// The flag bit identifying this windowing API.
    pub const fn flag(self) -> RenderingApiFlags {
        match self {
            WindowingApi::Winit => RenderingApiFlags::WINIT,
            WindowingApi::Win32 => RenderingApiFlags::WIN32,
            WindowingApi::Cocoa => RenderingApiFlags::COCOA,
        }
    }
}

impl fmt::Display for WindowingApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WindowingApi::Winit => "winit",
            WindowingApi::Win32 => "Win32",
            WindowingApi::Cocoa => "Cocoa",
        })
    }
}

/// A graphics backend the engine knows how to name.
///
/// Only OpenGL has an implementation today; the others are selectable so the
/// fallback policy and the settings format are complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderingApi {
    /// OpenGL on a desktop OS.
    OpenGlDesktop,
    /// Vulkan on a desktop OS.
    VulkanDesktop,
    /// Direct3D 11 on Windows.
    DirectX11Desktop,
    /// Direct3D 12 on Windows.
    DirectX12Desktop,
    /// Metal on macOS.
    MetalDesktop,
}

impl RenderingApi {
    /// Every rendering API, in fallback priority order.
    pub const FALLBACK_ORDER: [RenderingApi; 5] = [
        RenderingApi::OpenGlDesktop,
        RenderingApi::MetalDesktop,
        RenderingApi::VulkanDesktop,
        RenderingApi::DirectX11Desktop,
        RenderingApi::DirectX12Desktop,
    ];

    /// The API requested when nothing is configured.
    pub const DEFAULT: RenderingApi = RenderingApi::OpenGlDesktop;

    /// The windowing API this rendering API runs on.
    pub const fn windowing_api(self) -> WindowingApi {
        match self {
            RenderingApi::OpenGlDesktop | RenderingApi::VulkanDesktop => WindowingApi::Winit,
            RenderingApi::DirectX11Desktop | RenderingApi::DirectX12Desktop => {
                WindowingApi::Win32
            }
            RenderingApi::MetalDesktop => WindowingApi::Cocoa,
        }
    }

    const fn graphics_flag(self) -> RenderingApiFlags {
        match self {
            RenderingApi::OpenGlDesktop => RenderingApiFlags::OPENGL,
            RenderingApi::VulkanDesktop => RenderingApiFlags::VULKAN,
            RenderingApi::DirectX11Desktop => RenderingApiFlags::DIRECTX11,
            RenderingApi::DirectX12Desktop => RenderingApiFlags::DIRECTX12,
            RenderingApi::MetalDesktop => RenderingApiFlags::METAL,
        }
    }

    /// The full persisted encoding: graphics bit, desktop bit and windowing bit.
    pub const fn flags(self) -> RenderingApiFlags {
        RenderingApiFlags::from_bits_retain(
            self.graphics_flag().bits()
                | RenderingApiFlags::DESKTOP.bits()
                | self.windowing_api().flag().bits(),
        )
    }

    /// Decodes a persisted integer. Only the graphics bits are authoritative;
    /// exactly one of them must be set.
    pub fn from_bits(bits: u32) -> Option<Self> {
        let graphics = bits & RenderingApiFlags::GRAPHICS_MASK;
        Self::FALLBACK_ORDER
            .into_iter()
            .find(|api| api.graphics_flag().bits() == graphics)
    }

    /// The persisted integer.
    pub const fn bits(self) -> u32 {
        self.flags().bits()
    }

    /// A human readable name, also written as `Info` in the settings file.
    pub const fn name(self) -> &'static str {
        match self {
            RenderingApi::OpenGlDesktop => "OpenGL (Desktop)",
            RenderingApi::VulkanDesktop => "Vulkan (Desktop)",
            RenderingApi::DirectX11Desktop => "DirectX 11 (Desktop)",
            RenderingApi::DirectX12Desktop => "DirectX 12 (Desktop)",
            RenderingApi::MetalDesktop => "Metal (Desktop)",
        }
    }
}

impl fmt::Display for RenderingApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of [`select_rendering_api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelection {
    /// The API that will be used.
    pub api: RenderingApi,
    /// `true` if the preferred API was unavailable and a substitute was picked.
    pub fell_back: bool,
}

/// Picks the rendering API to use for the lifetime of the process.
///
/// The preferred API wins if `support` accepts it. Otherwise the first supported
/// API in [`RenderingApi::FALLBACK_ORDER`] is used and a warning is logged.
///
/// # Errors
///
/// [`RenderError::NoSupportedBackend`] if nothing is supported. Callers treat this
/// as fatal.
pub fn select_rendering_api(
    preferred: RenderingApi,
    support: &dyn BackendSupport,
) -> Result<BackendSelection, RenderError> {
    let selection = if support.is_backend_supported(preferred) {
        BackendSelection {
            api: preferred,
            fell_back: false,
        }
    } else {
        log::warn!("Rendering API {preferred} is not supported, falling back.");
        let api = RenderingApi::FALLBACK_ORDER
            .into_iter()
            .find(|&api| support.is_backend_supported(api))
            .ok_or_else(|| {
                log::error!("No supported rendering API found.");
                RenderError::NoSupportedBackend
            })?;
        BackendSelection {
            api,
            fell_back: true,
        }
    };

    log::info!(
        "Selected rendering API: {} (windowing: {})",
        selection.api,
        selection.api.windowing_api()
    );
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Only(&'static [RenderingApi]);

    impl BackendSupport for Only {
        fn is_backend_supported(&self, api: RenderingApi) -> bool {
            self.0.contains(&api)
        }
    }

    #[test]
    fn preferred_api_wins_when_supported() {
        let support = Only(&[RenderingApi::OpenGlDesktop, RenderingApi::VulkanDesktop]);
        let selection = select_rendering_api(RenderingApi::VulkanDesktop, &support).unwrap();
        assert_eq!(selection.api, RenderingApi::VulkanDesktop);
        assert!(!selection.fell_back);
    }

    #[test]
    fn fallback_follows_priority_order() {
        // Metal is ahead of Vulkan in the fallback order.
        let support = Only(&[RenderingApi::VulkanDesktop, RenderingApi::MetalDesktop]);
        let selection = select_rendering_api(RenderingApi::DirectX12Desktop, &support).unwrap();
        assert_eq!(selection.api, RenderingApi::MetalDesktop);
        assert!(selection.fell_back);
    }

    #[test]
    fn nothing_supported_is_an_error() {
        let result = select_rendering_api(RenderingApi::OpenGlDesktop, &Only(&[]));
        assert!(matches!(result, Err(RenderError::NoSupportedBackend)));
    }

    #[test]
    fn windowing_table() {
        assert_eq!(
            RenderingApi::OpenGlDesktop.windowing_api(),
            WindowingApi::Winit
        );
        assert_eq!(
            RenderingApi::DirectX11Desktop.windowing_api(),
            WindowingApi::Win32
        );
        assert_eq!(RenderingApi::MetalDesktop.windowing_api(), WindowingApi::Cocoa);
    }

    #[test]
    fn persisted_bits_decode_back() {
        for api in RenderingApi::FALLBACK_ORDER {
            let flags = api.flags();
            assert!(flags.contains(RenderingApiFlags::DESKTOP));
            assert!(flags.contains(api.windowing_api().flag()));
            assert_eq!(RenderingApi::from_bits(api.bits()), Some(api));
        }
        assert_eq!(RenderingApi::OpenGlDesktop.bits(), 0x181);
        assert_eq!(RenderingApi::from_bits(0), None);
        assert_eq!(
            RenderingApi::from_bits(
                RenderingApiFlags::OPENGL.bits() | RenderingApiFlags::VULKAN.bits()
            ),
            None
        );
    }
}
