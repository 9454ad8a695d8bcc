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
//! A `winit` window carrying a `glutin` OpenGL context, implementing the
//! engine's [`Window`] trait.
//!
//! The engine owns its frame loop, so instead of handing control to
//! `EventLoop::run_app` the window pumps the event loop once per frame with
//! `pump_app_events` and buffers the translated events.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use lumen_core::event::{Event, WindowCloseEvent};
use lumen_core::math::Extent2D;
use lumen_core::platform::{Window, WindowProps};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

use crate::platform::input::EventTranslator;

/// How long one startup pump may block while waiting for the window.
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(16);
/// Startup pumps before giving up on the platform ever resuming us.
const STARTUP_PUMPS: usize = 120;

/// Errors raised while creating a window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The `winit` event loop could not be created.
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The OS window or its GL display could not be created.
    #[error("failed to create the window: {0}")]
    Creation(String),
    /// No usable GL context could be created for the window.
    #[error("failed to create the OpenGL context: {0}")]
    Context(String),
    /// The platform never delivered the `resumed` notification.
    #[error("the platform did not resume the application")]
    NotResumed,
    /// The event loop exited during startup.
    #[error("the event loop exited during startup with code {0}")]
    Exited(i32),
}

/// A builder for creating [`WinitWindow`] instances.
///
/// This follows the builder pattern to provide an ergonomic API for window creation.
#[derive(Debug, Clone, Default)]
pub struct WinitWindowBuilder {
    props: WindowProps,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing window properties.
    pub fn from_props(props: WindowProps) -> Self {
        Self { props }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.props.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.props.width = width;
        self.props.height = height;
        self
    }

    /// Sets whether presentation waits for vertical blank.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.props.vsync = vsync;
        self
    }

    /// Creates the event loop, the window, and its current GL context.
    ///
    /// # Errors
    ///
    /// Returns a [`WindowError`] if any platform step fails.
    pub fn build(self) -> Result<WinitWindow, WindowError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.props.title,
            self.props.width,
            self.props.height
        );

        let mut event_loop = EventLoop::new()?;
        let mut handler = WindowHandler::new(self.props);

        // The GL window can only be created once the platform resumes us.
        for _ in 0..STARTUP_PUMPS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);
            if let Some(error) = handler.error.take() {
                return Err(error);
            }
            if handler.gl.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(WindowError::Exited(code));
            }
        }
        if handler.gl.is_none() {
            return Err(WindowError::NotResumed);
        }

        Ok(WinitWindow {
            event_loop,
            handler,
            start: Instant::now(),
        })
    }
}

/// The GL half of the window. Field order is drop order: the surface and the
/// context go before the window they render into.
struct GlWindowState {
    gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: winit::window::Window,
}

impl GlWindowState {
    fn create(event_loop: &ActiveEventLoop, props: &WindowProps) -> Result<Self, WindowError> {
        let attributes = winit::window::Window::default_attributes()
            .with_title(props.title.clone())
            .with_inner_size(LogicalSize::new(props.width, props.height))
            .with_visible(true);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        // WGL can only pick a modern config against an existing window.
        #[cfg(target_os = "windows")]
        let early_window = Some(
            event_loop
                .create_window(attributes.clone())
                .map_err(|e| WindowError::Creation(e.to_string()))?,
        );
        #[cfg(not(target_os = "windows"))]
        let early_window: Option<winit::window::Window> = None;

        let native_window = early_window
            .as_ref()
            .and_then(|window| window.window_handle().ok())
            .map(|handle| handle.as_raw());
        let template = match native_window {
            Some(handle) => template.compatible_with_native_window(handle),
            None => template,
        }
        .build();

        let raw_display = event_loop
            .display_handle()
            .map_err(|e| WindowError::Creation(e.to_string()))?
            .as_raw();
        // SAFETY: the display handle comes from the live event loop.
        let display = unsafe { Display::new(raw_display, display_preference(native_window)) }
            .map_err(|e| WindowError::Context(e.to_string()))?;
        // SAFETY: the template only refers to `early_window`, which is still alive.
        let configs = unsafe { display.find_configs(template) }
            .map_err(|e| WindowError::Context(e.to_string()))?;
        let config = pick_config(configs).ok_or_else(|| {
            WindowError::Context("the display offers no matching GL config".to_owned())
        })?;

        let window = match early_window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, attributes, &config)
                .map_err(|e| WindowError::Creation(e.to_string()))?,
        };
        log::info!("Winit window created successfully (id: {:?}).", window.id());

        let raw_handle = window
            .window_handle()
            .map_err(|e| WindowError::Creation(e.to_string()))?
            .as_raw();

        let core = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 1))))
            .build(Some(raw_handle));
        let gles = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_handle));
        // SAFETY: the raw handle belongs to `window`, which outlives the context.
        let context = unsafe {
            display.create_context(&config, &core).or_else(|e| {
                log::warn!("OpenGL 4.1 context unavailable ({e}), trying GLES.");
                display.create_context(&config, &gles)
            })
        }
        .map_err(|e| WindowError::Context(e.to_string()))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| WindowError::Creation(e.to_string()))?;
        // SAFETY: as above, the surface never outlives `window`.
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(|e| WindowError::Context(e.to_string()))?;
        let context = context
            .make_current(&surface)
            .map_err(|e| WindowError::Context(e.to_string()))?;

        // SAFETY: the context was just made current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol))
        };

        let state = Self {
            gl: Rc::new(gl),
            surface,
            context,
            window,
        };
        state.apply_vsync(props.vsync);
        Ok(state)
    }

    fn apply_vsync(&self, enabled: bool) {
        let interval = if enabled {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = self.surface.set_swap_interval(&self.context, interval) {
            log::warn!("Could not set swap interval: {e}");
        }
    }

    fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
        }
    }
}

/// Prefers the config with the most multisampling. `None` when the display
/// offers nothing matching the template.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Option<Config> {
    most_samples(configs, |config| config.num_samples())
}

/// Keeps the first item with the highest sample count.
fn most_samples<T>(items: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    items.reduce(|best, item| {
        if samples(&item) > samples(&best) {
            item
        } else {
            best
        }
    })
}

#[cfg(target_os = "windows")]
fn display_preference(window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window)
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::GlxThenEgl(Box::new(winit::platform::x11::register_xlib_error_hook))
}

#[cfg(any(target_os = "ios", target_os = "android"))]
fn display_preference(_window: Option<RawWindowHandle>) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

/// Receives `winit` callbacks while the event loop is being pumped.
struct WindowHandler {
    props: WindowProps,
    gl: Option<GlWindowState>,
    translator: EventTranslator,
    pending: Vec<Event>,
    error: Option<WindowError>,
}

impl WindowHandler {
    fn new(props: WindowProps) -> Self {
        let translator = EventTranslator::new(Extent2D::new(props.width, props.height));
        Self {
            props,
            gl: None,
            translator,
            pending: Vec::new(),
            error: None,
        }
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() {
            return;
        }
        match GlWindowState::create(event_loop, &self.props) {
            Ok(state) => {
                let size = state.window.inner_size();
                self.translator = EventTranslator::new(Extent2D::new(size.width, size.height));
                self.gl = Some(state);
            }
            Err(e) => {
                log::error!("Window creation failed: {e}");
                self.error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (WindowEvent::Resized(size), Some(state)) = (&event, &self.gl) {
            state.resize(size.width, size.height);
        }
        let events = self.translator.translate(&event);
        for event in &events {
            log::trace!("{event}");
        }
        self.pending.extend(events);
    }
}

/// A desktop window with a current OpenGL context.
///
/// The window and its GL context live on the thread that built them; the
/// type is neither `Send` nor `Sync`.
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    handler: WindowHandler,
    start: Instant,
}

impl WinitWindow {
    /// The GL function table of this window's context.
    pub fn gl_context(&self) -> Option<Rc<glow::Context>> {
        self.handler.gl.as_ref().map(|state| Rc::clone(&state.gl))
    }

    /// The underlying `winit` window.
    pub fn winit_window(&self) -> Option<&winit::window::Window> {
        self.handler.gl.as_ref().map(|state| &state.window)
    }
}

impl std::fmt::Debug for WinitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitWindow")
            .field("props", &self.handler.props)
            .field("has_context", &self.handler.gl.is_some())
            .finish()
    }
}

impl Window for WinitWindow {
    fn on_update(&mut self) -> Vec<Event> {
        if let Some(state) = &self.handler.gl {
            if let Err(e) = state.surface.swap_buffers(&state.context) {
                log::error!("Failed to present: {e}");
            }
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited with code {code}.");
            let closing = Event::from(WindowCloseEvent);
            if !self.handler.pending.contains(&closing) {
                self.handler.pending.push(closing);
            }
        }
        std::mem::take(&mut self.handler.pending)
    }

    fn platform_time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn dimensions(&self) -> Extent2D {
        self.handler.translator.size()
    }

    fn is_vsync(&self) -> bool {
        self.handler.props.vsync
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.handler.props.vsync = enabled;
        if let Some(state) = &self.handler.gl {
            state.apply_vsync(enabled);
        }
        log::info!("VSync {}.", if enabled { "enabled" } else { "disabled" });
    }

    fn native_window(&self) -> Option<RawWindowHandle> {
        let state = self.handler.gl.as_ref()?;
        state.window.window_handle().ok().map(|handle| handle.as_raw())
    }

    fn title(&self) -> &str {
        &self.handler.props.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_list_yields_nothing() {
        assert_eq!(most_samples(std::iter::empty::<u8>(), |s| *s), None);
    }

    #[test]
    fn highest_sample_count_wins_and_ties_keep_the_first() {
        let configs = [("a", 0), ("b", 4), ("c", 4), ("d", 2)];
        let picked = most_samples(configs.into_iter(), |(_, samples)| *samples);
        assert_eq!(picked, Some(("b", 4)));
    }
}
