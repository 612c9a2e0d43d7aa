mod material;
mod overrides;
mod uniform;

pub use material::*;
pub use overrides::*;
pub use uniform::*;
