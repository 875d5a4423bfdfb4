mod config;
mod render;
mod simulation_container;

pub use config::*;
pub use render::*;
pub use simulation_container::*;

#[cfg(test)]
mod config_tests;
