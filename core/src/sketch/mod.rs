pub mod types;
pub mod extract;

pub use types::*;
