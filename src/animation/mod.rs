// Keyframe animation: clip data extracted from glTF samplers plus a
// single-clip player with a looping clock.

pub mod clip;
pub mod player;

pub use clip::*;
pub use player::*;
