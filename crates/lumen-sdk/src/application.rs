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

//! The application run loop.

use std::cell::Cell;
use std::fmt;

use lumen_core::event::{
    Event, EventDispatcher, KeyCode, KeyPressedEvent, WindowCloseEvent, WindowResizeEvent,
};
use lumen_core::layer::{Layer, LayerContext, LayerId, LayerStack, LoopControl};
use lumen_core::platform::{Input, Window};
use lumen_core::renderer::{Renderer, RendererApi};
use lumen_core::settings::{resolve_rendering_api, Settings};
use lumen_core::utils::timer::Timestep;
use lumen_infra::{create_renderer_api, PlatformBackends, WinitWindow, WinitWindowBuilder};

use crate::debug_overlay::DebugOverlay;
use crate::error::ApplicationError;
use crate::specification::ApplicationSpecification;

thread_local! {
    static APPLICATION_ALIVE: Cell<bool> = const { Cell::new(false) };
}

/// Marks the one live application of the current thread.
#[derive(Debug)]
struct InstanceGuard(());

impl InstanceGuard {
    fn acquire() -> Result<Self, ApplicationError> {
        APPLICATION_ALIVE.with(|alive| {
            if alive.replace(true) {
                log::error!("Refusing to create a second application on this thread.");
                Err(ApplicationError::AlreadyInitialized)
            } else {
                Ok(Self(()))
            }
        })
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        APPLICATION_ALIVE.with(|alive| alive.set(false));
    }
}

/// The lifecycle state of an [`Application`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Window and renderer are being set up.
    Constructing,
    /// Frames are updated and rendered.
    Running,
    /// The window has a zero-sized framebuffer; only events are processed.
    Minimized,
    /// The loop exits after the current frame.
    ShuttingDown,
}

// Borrows the disjoint pieces of the application a layer may touch, leaving
// `self.layers` free to iterate.
macro_rules! layer_context {
    ($app:ident) => {
        LayerContext {
            renderer: &mut $app.renderer,
            window: &mut $app.window,
            input: &$app.input,
            control: &mut $app.control,
        }
    };
}

/// Owns the window, the renderer and the layer stack, and drives them frame by
/// frame.
///
/// Only one application may be alive per thread. The window type defaults to
/// the `winit` window; tests drive the loop with a scripted window instead.
pub struct Application<W: Window = WinitWindow> {
    // Field order is drop order: layers release their GPU resources while the
    // renderer and the GL context are still alive.
    layers: LayerStack,
    renderer: Renderer,
    window: W,
    input: Input,
    control: LoopControl,
    spec: ApplicationSpecification,
    state: AppState,
    last_frame_time: f64,
    should_restart: bool,
    instance: InstanceGuard,
}

impl Application<WinitWindow> {
    /// Opens the window, resolves the rendering API from the settings file and
    /// initializes the renderer.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::AlreadyInitialized`] if another application is alive
    /// on this thread; otherwise any window, settings or backend failure.
    pub fn new(spec: ApplicationSpecification) -> Result<Self, ApplicationError> {
        log::info!("Creating application '{}'...", spec.name);
        let instance = InstanceGuard::acquire()?;
        let window = WinitWindowBuilder::from_props(spec.window_props()).build()?;
        Self::attach_backend(spec, window, instance)
    }

    /// Tears down the layers and the renderer and builds a fresh application on
    /// the same window, re-reading the settings file.
    ///
    /// The platform event loop can only be created once per process, so the
    /// window survives a restart.
    pub fn restart(self) -> Result<Self, ApplicationError> {
        let Self {
            layers,
            renderer,
            window,
            spec,
            instance,
            ..
        } = self;
        drop(layers);
        drop(renderer);
        log::info!("Restarting application '{}'...", spec.name);
        Self::attach_backend(spec, window, instance)
    }

    fn attach_backend(
        spec: ApplicationSpecification,
        window: WinitWindow,
        instance: InstanceGuard,
    ) -> Result<Self, ApplicationError> {
        let (mut settings, _existed) = Settings::open(spec.settings_path.clone())?;
        let selection = resolve_rendering_api(&mut settings, &PlatformBackends::new())?;
        let api = create_renderer_api(&window, selection.api)?;
        Self::assemble(spec, window, api, instance)
    }
}

impl<W: Window> Application<W> {
    /// Builds an application around an existing window and renderer backend.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::AlreadyInitialized`] if another application is alive
    /// on this thread, or the backend's initialization error.
    pub fn with_platform(
        spec: ApplicationSpecification,
        window: W,
        api: Box<dyn RendererApi>,
    ) -> Result<Self, ApplicationError> {
        let instance = InstanceGuard::acquire()?;
        Self::assemble(spec, window, api, instance)
    }

    fn assemble(
        spec: ApplicationSpecification,
        window: W,
        api: Box<dyn RendererApi>,
        instance: InstanceGuard,
    ) -> Result<Self, ApplicationError> {
        let mut renderer = Renderer::new(api);
        renderer.init()?;
        renderer.on_window_resize(window.dimensions());

        let mut app = Self {
            layers: LayerStack::new(),
            renderer,
            window,
            input: Input::new(),
            control: LoopControl::new(),
            spec,
            state: AppState::Constructing,
            last_frame_time: 0.0,
            should_restart: false,
            instance,
        };
        app.push_overlay(DebugOverlay::default())?;
        app.state = AppState::Running;
        log::info!(
            "Application '{}' is running on {}.",
            app.spec.name,
            app.renderer.rendering_api()
        );
        Ok(app)
    }

    /// Attaches `layer` and inserts it below every overlay.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::LayerAttach`] if `on_attach` fails; the layer is
    /// dropped without being added.
    pub fn push_layer(&mut self, layer: impl Layer + 'static) -> Result<LayerId, ApplicationError> {
        let layer = self.attach(Box::new(layer))?;
        Ok(self.layers.push_layer(layer))
    }

    /// Attaches `overlay` and places it on top of the stack.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::LayerAttach`] if `on_attach` fails.
    pub fn push_overlay(
        &mut self,
        overlay: impl Layer + 'static,
    ) -> Result<LayerId, ApplicationError> {
        let overlay = self.attach(Box::new(overlay))?;
        Ok(self.layers.push_overlay(overlay))
    }

    fn attach(&mut self, mut layer: Box<dyn Layer>) -> Result<Box<dyn Layer>, ApplicationError> {
        let mut ctx = layer_context!(self);
        match layer.on_attach(&mut ctx) {
            Ok(()) => Ok(layer),
            Err(source) => {
                log::error!("Layer '{}' failed to attach: {source:#}", layer.name());
                Err(ApplicationError::LayerAttach {
                    name: layer.name().to_owned(),
                    source: source.into(),
                })
            }
        }
    }

    /// Removes a layer from the layer region and detaches it.
    ///
    /// Returns `None` if `id` is not a layer of this application.
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let mut layer = self.layers.pop_layer(id)?;
        layer.on_detach();
        Some(layer)
    }

    /// Removes an overlay and detaches it.
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let mut overlay = self.layers.pop_overlay(id)?;
        overlay.on_detach();
        Some(overlay)
    }

    /// The window.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The window, mutably.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The scene renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The scene renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The layer stack.
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Input state as of the last processed event.
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// The specification the application was started with.
    pub fn specification(&self) -> &ApplicationSpecification {
        &self.spec
    }

    /// The lifecycle state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Returns `true` until the application starts shutting down.
    pub fn is_running(&self) -> bool {
        self.state != AppState::ShuttingDown
    }

    /// Whether the application asked to be rebuilt once the loop exits.
    pub fn should_restart(&self) -> bool {
        self.should_restart
    }

    /// Stops the loop after the current frame.
    pub fn close(&mut self) {
        log::info!("Application close requested.");
        self.state = AppState::ShuttingDown;
    }

    /// Stops the loop, or revives it if it was shutting down.
    pub fn set_running(&mut self, running: bool) {
        if !running {
            self.close();
        } else if self.state == AppState::ShuttingDown {
            self.state = AppState::Running;
        }
    }

    /// Runs frames until the application shuts down.
    pub fn run(&mut self) {
        log::info!("Entering the main loop.");
        while self.is_running() {
            self.run_frame();
        }
        if self.should_restart {
            log::info!("Main loop exited for a restart.");
        } else {
            log::info!("Main loop exited.");
        }
    }

    /// Runs one frame: update and UI passes, then present and event dispatch.
    pub fn run_frame(&mut self) {
        let time = self.window.platform_time();
        let ts = Timestep::between(self.last_frame_time, time);
        self.last_frame_time = time;
        self.renderer.command_mut().reset_draw_calls();

        match self.state {
            AppState::Running => {
                self.renderer.clear();
                self.update_layers(ts);
                self.render_ui(ts);
            }
            AppState::Minimized => std::thread::sleep(self.spec.minimized_frame_interval),
            AppState::Constructing | AppState::ShuttingDown => {}
        }

        for event in self.window.on_update() {
            self.on_event(&event);
        }
        self.apply_loop_control();
    }

    fn update_layers(&mut self, ts: Timestep) {
        let mut ctx = layer_context!(self);
        for (_, layer) in self.layers.iter_mut() {
            layer.on_update(&mut ctx, ts);
        }
    }

    fn render_ui(&mut self, ts: Timestep) {
        let mut ctx = layer_context!(self);
        let provider = self
            .layers
            .iter_mut()
            .find_map(|(id, layer)| layer.ui_pass().map(|_| id));

        if let Some(pass) = provider
            .and_then(|id| self.layers.get_mut(id))
            .and_then(|layer| layer.ui_pass())
        {
            pass.begin(&mut ctx);
        }
        for (_, layer) in self.layers.iter_mut() {
            layer.on_ui_render(&mut ctx, ts);
        }
        if let Some(pass) = provider
            .and_then(|id| self.layers.get_mut(id))
            .and_then(|layer| layer.ui_pass())
        {
            pass.end(&mut ctx);
        }
    }

    /// Routes one event: input state first, then the application's own
    /// handlers, then the layers from the top of the stack down until one
    /// handles it.
    pub fn on_event(&mut self, event: &Event) {
        log::trace!("{event}");
        self.input.on_event(event);

        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<WindowCloseEvent>(|_| self.on_window_close());
        dispatcher.dispatch::<WindowResizeEvent>(|e| self.on_window_resize(e));
        dispatcher.dispatch::<KeyPressedEvent>(|e| self.on_key_pressed(e));
        if dispatcher.is_handled() {
            return;
        }

        for (id, layer) in self.layers.iter_mut().rev() {
            if layer.on_event(event).is_handled() {
                log::trace!("{} handled by {id} ({})", event.name(), layer.name());
                break;
            }
        }
    }

    fn on_window_close(&mut self) -> bool {
        log::info!("Window close requested.");
        self.state = AppState::ShuttingDown;
        true
    }

    fn on_window_resize(&mut self, event: &WindowResizeEvent) -> bool {
        let extent = event.extent();
        if extent.is_zero_area() {
            if self.state == AppState::Running {
                log::debug!("Window minimized.");
                self.state = AppState::Minimized;
            }
            return false;
        }
        if self.state == AppState::Minimized {
            log::debug!("Window restored.");
            self.state = AppState::Running;
        }
        self.renderer.on_window_resize(extent);
        false
    }

    fn on_key_pressed(&mut self, event: &KeyPressedEvent) -> bool {
        if event.key != KeyCode::R || event.is_repeat() || !self.input.is_control_pressed() {
            return false;
        }
        log::info!("Restart requested (Ctrl+R).");
        self.should_restart = true;
        self.state = AppState::ShuttingDown;
        true
    }

    fn apply_loop_control(&mut self) {
        if self.control.restart_requested() {
            log::info!("A layer requested a restart.");
            self.should_restart = true;
        }
        if self.control.close_requested() {
            self.state = AppState::ShuttingDown;
        }
        self.control = LoopControl::new();
    }
}

impl<W: Window> fmt::Debug for Application<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.spec.name)
            .field("state", &self.state)
            .field("window", &self.window.title())
            .field("layers", &self.layers)
            .field("should_restart", &self.should_restart)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}
