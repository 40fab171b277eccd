//! Snake grid-world with a tabular Q-learning agent
//!
//! This library provides:
//! - Headless game logic with a reset/step contract (game module)
//! - Tabular Q-learning: state encoders, Q-table, policy, replay (rl module)
//! - Training and evaluation drivers (modes module)
//! - Rolling training statistics (metrics module)

pub mod error;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
