pub mod camera;
pub mod light;
pub mod part_render_info;
pub mod render;
pub mod renderer;
pub mod vertex;

pub use renderer::Renderer;
