//! Q-learning agent hyperparameter configuration

use serde::{Deserialize, Serialize};

use super::encoder::EncoderKind;

/// Where the transitions fed to the TD update come from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningMode {
    /// Apply the update once per environment step
    Online,
    /// Store transitions and update over freshly sampled batches
    Replay { capacity: usize, batch_size: usize },
}

/// Configuration for the tabular Q-learning agent
///
/// All hyperparameters are fixed scalars for the lifetime of the agent; no
/// decay schedule is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate for the TD update
    ///
    /// Default: 0.1
    pub alpha: f32,

    /// Discount factor for future rewards
    ///
    /// Default: 0.9
    pub gamma: f32,

    /// Exploration probability for the epsilon-greedy policy
    ///
    /// Default: 0.1
    pub epsilon: f32,

    /// State discretization variant
    ///
    /// Default: raw head/food coordinates
    pub encoder: EncoderKind,

    /// Online or replay-based learning
    pub learning: LearningMode,

    /// Seed for exploration and replay sampling; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            encoder: EncoderKind::Raw,
            learning: LearningMode::Online,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// Returns `Ok(())` if all parameters are in range, `Err(String)` with an
    /// error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }

        if let LearningMode::Replay {
            capacity,
            batch_size,
        } = self.learning
        {
            if capacity == 0 {
                return Err("replay capacity must be at least 1".to_string());
            }
            if batch_size == 0 {
                return Err("batch_size must be at least 1".to_string());
            }
            if batch_size > capacity {
                return Err(format!(
                    "batch_size ({batch_size}) cannot exceed replay capacity ({capacity})"
                ));
            }
        }

        Ok(())
    }
}
