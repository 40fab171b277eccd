//! Tabular Q-learning agent for the Snake grid world
//!
//! Provides:
//! - Discrete state encoders (raw coordinates or relative sensors)
//! - Dense Q-table with the TD(0) update rule
//! - Epsilon-greedy action selection
//! - Fixed-capacity replay buffer for batch learning
//! - Flat-array persistence for trained tables

pub mod buffer;
pub mod config;
pub mod encoder;
pub mod persistence;
pub mod policy;
pub mod qtable;

pub use buffer::{ReplayBuffer, Transition};
pub use config::{AgentConfig, LearningMode};
pub use encoder::{EncoderKind, StateEncoder, StateId};
pub use persistence::{load_table, save_table, TableMetadata};
pub use policy::EpsilonGreedy;
pub use qtable::QTable;
