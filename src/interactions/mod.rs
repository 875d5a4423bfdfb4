mod collisions_2d;
mod leaf_solver;

pub use collisions_2d::*;
pub use leaf_solver::*;
