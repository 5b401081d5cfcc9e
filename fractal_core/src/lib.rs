mod complex;
mod error;
mod escape;
mod image;
mod partition;
mod plane;
mod render;

pub use complex::Complex;
pub use error::FractalError;
pub use escape::{escape_time, ESCAPE_RADIUS};
pub use image::ImageBuffer;
pub use partition::Partition;
pub use plane::ImagePlane;
pub use render::render_rows;
