use winit::event_loop::{ControlFlow, EventLoop};

mod animation;
mod app;
mod asset;
mod error;
mod material;
mod playback;
mod renderer;
mod scene;
mod settings;

pub const CONFY_APP_NAME: &str = "glbvis-rs";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional model path or URL as the first argument; settings otherwise
    let model_location = std::env::args().nth(1);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::AppHandler {
        viewer: None,
        model_location,
        runtime: tokio::runtime::Runtime::new()?,
    };

    event_loop.run_app(&mut handler)?;

    if let Some(viewer) = &handler.viewer {
        viewer.settings().save();
    }

    Ok(())
}
