use std::sync::Arc;

use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::viewer::Viewer;
use crate::settings::Settings;

pub struct AppHandler {
    pub viewer: Option<Viewer>,
    pub model_location: Option<String>,
    pub runtime: Runtime,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }

        let settings = Settings::load();
        let window_attrs = Window::default_attributes()
            .with_title("GLBVis-RS - glTF Character Viewer")
            .with_inner_size(winit::dpi::LogicalSize::new(
                settings.window.width,
                settings.window.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let location = self
            .model_location
            .clone()
            .unwrap_or_else(|| settings.viewer.model_location.clone());

        let handle = self.runtime.handle().clone();
        match pollster::block_on(Viewer::new(window, handle, settings, location)) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(viewer) = &mut self.viewer {
            let response = viewer.handle_event(&event);
            if response.repaint {
                viewer.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &mut self.viewer {
            if let Err(e) = viewer.frame() {
                log::error!("Render error: {e:?}");
            }
            viewer.window.request_redraw();
        }
    }
}
