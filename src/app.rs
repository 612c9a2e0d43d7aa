pub mod handler;
pub mod viewer;

pub use handler::AppHandler;
pub use viewer::{EventResponse, Viewer};
