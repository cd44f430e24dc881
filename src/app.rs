//! Window and frame loop
//!
//! [`GalleryApp`] owns the winit event loop, the window, the render engine
//! and the scene. Each frame samples input, runs the user's update
//! callback, pushes uniforms and records the draw sequence.

use std::{sync::Arc, time::Instant};

use anyhow::Context;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    config::AppConfig,
    gfx::{camera::camera_utils::CameraManager, rendering::RenderEngine, scene::Scene},
};

/// Runs once the GPU is available, e.g. to create textures and shapes.
pub type SetupCallback = Box<dyn FnOnce(&mut Scene, &RenderEngine) -> anyhow::Result<()>>;

/// Runs every frame with the frame delta and the total elapsed time in seconds.
pub type UpdateCallback = Box<dyn FnMut(&mut Scene, f32, f32)>;

pub struct GalleryApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    setup_callback: Option<SetupCallback>,
    update_callback: Option<UpdateCallback>,
    started: Instant,
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl GalleryApp {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let camera_manager = CameraManager::from_config(&config);
        let scene = Scene::new(camera_manager, config.light);
        let now = Instant::now();

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                setup_callback: None,
                update_callback: None,
                started: now,
                last_frame: now,
                error: None,
            },
        })
    }

    /// Set the callback that populates the scene once the GPU is ready
    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut Scene, &RenderEngine) -> anyhow::Result<()> + 'static,
    {
        self.app_state.setup_callback = Some(Box::new(setup));
        self
    }

    /// Set the per-frame update callback
    pub fn with_update<F>(mut self, update: F) -> Self
    where
        F: FnMut(&mut Scene, f32, f32) + 'static,
    {
        self.app_state.update_callback = Some(Box::new(update));
        self
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Run the application until the window closes or Escape is pressed
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_inner_size(PhysicalSize::new(self.config.width, self.config.height)),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);

        let config = &self.config;
        let renderer =
            pollster::block_on(async move { RenderEngine::new(window, width, height, config).await })?;

        if let Some(setup) = self.setup_callback.take() {
            setup(&mut self.scene, &renderer)?;
        }
        self.scene
            .init_gpu_resources(renderer.device(), renderer.model_layout())?;

        let statistics = self.scene.get_statistics();
        info!(
            "Scene ready: {} shapes ({} textured), {} vertices, {} triangles",
            statistics.shape_count,
            statistics.textured_shapes,
            statistics.total_vertices,
            statistics.total_triangles
        );

        self.render_engine = Some(renderer);
        self.started = Instant::now();
        self.last_frame = self.started;
        Ok(())
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        let elapsed = (now - self.started).as_secs_f32();
        self.last_frame = now;

        if let Some(update) = self.update_callback.as_mut() {
            update(&mut self.scene, dt, elapsed);
        }
        self.scene.update(dt);
        render_engine.update(&mut self.scene)?;
        render_engine.render_frame(&self.scene)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.initialize(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.scene.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error);
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        if self.scene.camera_manager.process_event(&event) {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene.cleanup();
    }
}
