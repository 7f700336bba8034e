//! Core of the Game of Life viewer: the grid store, the B3/S23 evolution
//! engine and the simulation state driven by the window shell in `main.rs`.

pub mod config;
pub mod grid;
pub mod patterns;
pub mod rules;
pub mod sim;

pub use config::Config;
pub use grid::Grid;
pub use patterns::Pattern;
pub use sim::{Command, Damage, Simulation};
