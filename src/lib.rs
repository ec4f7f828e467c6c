pub mod grid;
pub mod priority;
pub mod strategy;
pub mod world;

pub use grid::*;
pub use priority::*;
pub use strategy::*;
pub use world::*;
