mod particle;
mod particle_store;
mod static_geometry;

pub use particle::*;
pub use particle_store::*;
pub use static_geometry::*;

#[cfg(test)]
mod particle_store_tests;
#[cfg(test)]
mod static_geometry_tests;
