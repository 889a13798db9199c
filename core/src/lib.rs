pub mod geometry;
pub mod sketch;
pub mod suggest;

pub fn version() -> &'static str {
    "0.1.0"
}
