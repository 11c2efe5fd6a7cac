pub mod audio;
pub mod color;
pub mod constants;
pub mod interaction;
pub mod particles;
pub mod shapes;

pub use audio::*;
pub use color::*;
pub use interaction::*;
pub use particles::*;
pub use shapes::*;
