use nalgebra as na;

pub type Point2 = na::Point2<f64>;

/// Below this scale, geometry is treated as degenerate.
pub const EPSILON: f64 = 1e-6;

pub mod utils_2d;
pub use utils_2d::*;
