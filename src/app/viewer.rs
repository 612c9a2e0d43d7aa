use std::sync::Arc;

use nalgebra_glm as glm;
use tokio::sync::mpsc;
use winit::window::Window;

use crate::asset::{LoadOutcome, spawn_load};
use crate::error::GlbError;
use crate::playback::{FrameClock, RenderLoop, StopHandle};
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraController, CameraState};
use crate::renderer::light::LightsUniform;
use crate::scene::{Scene, SceneUpdate};
use crate::settings::Settings;

/// Fixed camera start position, looking at the origin.
const CAMERA_EYE: [f32; 3] = [0.0, 1.0, 5.0];
const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

/// The viewer controller: owns the renderer, the scene, the camera, the
/// render loop, and the receiving end of the loader channel. Everything the
/// application mutates lives here; there is no module-level state.
pub struct Viewer {
    pub window: Arc<Window>,
    renderer: Renderer,
    scene: Scene,
    camera: CameraController,
    render_loop: RenderLoop,
    outcomes: mpsc::UnboundedReceiver<LoadOutcome>,
    settings: Settings,
}

impl Viewer {
    /// Bootstraps the scene: renderer and surface on the given window,
    /// camera and lights from the fixed constants, and the one asynchronous
    /// model load spawned onto `runtime`.
    pub async fn new(
        window: Arc<Window>,
        runtime: tokio::runtime::Handle,
        settings: Settings,
        model_location: String,
    ) -> Result<Self, GlbError> {
        let renderer = Renderer::new(window.clone()).await?;

        let size = window.inner_size();
        let aspect = if size.height > 0 {
            size.width as f32 / size.height as f32
        } else {
            1.0
        };
        let camera_state = CameraState::from_eye(
            glm::vec3(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2]),
            glm::vec3(CAMERA_TARGET[0], CAMERA_TARGET[1], CAMERA_TARGET[2]),
            settings.camera.fovy_degrees.to_radians(),
            aspect,
            settings.camera.znear,
            settings.camera.zfar,
        );
        let camera = CameraController::new(camera_state, settings.camera.damping_factor);

        let mut scene = Scene::new();
        let outcomes = spawn_load(&runtime, model_location);
        scene.begin_loading();

        Ok(Self {
            window,
            renderer,
            scene,
            camera,
            render_loop: RenderLoop::new(FrameClock::monotonic()),
            outcomes,
            settings,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.render_loop.stop_handle()
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        match event {
            winit::event::WindowEvent::CloseRequested => {
                self.render_loop.stop_handle().stop();
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    self.render_loop.stop_handle().stop();
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                self.camera.set_aspect(size.width, size.height);
                self.settings.window.width = size.width as f64;
                self.settings.window.height = size.height as f64;
            }
            winit::event::WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == winit::event::ElementState::Pressed;
                self.camera.on_mouse_button(*button, pressed);
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                let handled = self.camera.on_mouse_move((position.x, position.y));
                return EventResponse {
                    repaint: handled,
                    exit: false,
                };
            }
            winit::event::WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => *y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.on_mouse_wheel(scroll);
                return EventResponse {
                    repaint: true,
                    exit: false,
                };
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    /// One render-loop iteration: drain loader outcomes, advance the
    /// animation clock, damp the camera, draw. Does nothing once the stop
    /// handle is flipped.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(dt) = self.render_loop.begin_frame() else {
            return Ok(());
        };

        while let Ok(outcome) = self.outcomes.try_recv() {
            if self.scene.apply_outcome(outcome) == SceneUpdate::ModelStaged {
                if let Some(asset) = self.scene.model() {
                    self.renderer.upload_model(asset);
                }
            }
        }

        self.scene.advance(dt);
        self.camera.update();

        let matrices = self.scene.node_matrices();
        let lights = LightsUniform::from(&self.scene.lighting);
        match self.renderer.render(
            self.camera.state(),
            self.scene.clear_color,
            &lights,
            matrices.as_deref(),
        ) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.resize(self.window.inner_size());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
