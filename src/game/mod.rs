//! Core game logic module for Snake
//!
//! This module contains the grid-world simulation without any I/O or
//! rendering dependencies. It exposes the reset/step contract consumed by the
//! training driver and can run fully headless.

pub mod action;
pub mod config;
pub mod food;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use action::{Direction, ACTIONS, ACTION_COUNT};
pub use config::GameConfig;
pub use food::{FoodMode, FoodSource};
pub use state::{Position, Snake, TerminalCause};
pub use world::{SnakeWorld, StepResult};
