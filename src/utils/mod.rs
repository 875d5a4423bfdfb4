mod constants;
mod errors;
mod math_helpers;

pub use constants::*;
pub use errors::*;
pub use math_helpers::*;

/// Double precision 2D vector used throughout the crate.
pub type Vector2 = glam::DVec2;

#[cfg(test)]
mod math_helpers_tests;
