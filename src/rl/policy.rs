use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::encoder::StateId;
use super::qtable::QTable;

/// Epsilon-greedy action selection over Q-table rows
///
/// With probability `epsilon` a uniformly random action index is returned;
/// otherwise the greedy action, with ties broken by lowest index so greedy
/// behavior is deterministic and reproducible.
#[derive(Debug)]
pub struct EpsilonGreedy {
    epsilon: f32,
    action_count: usize,
    rng: SmallRng,
}

impl EpsilonGreedy {
    /// Create a policy; pass a seed for reproducible exploration
    pub fn new(epsilon: f32, action_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            epsilon,
            action_count,
            rng,
        }
    }

    /// Purely greedy policy, used for evaluation
    pub fn greedy(action_count: usize) -> Self {
        Self::new(0.0, action_count, Some(0))
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Select an action index for the given state
    pub fn select(&mut self, table: &QTable, state: StateId) -> usize {
        if self.rng.gen::<f32>() < self.epsilon {
            self.rng.gen_range(0..self.action_count)
        } else {
            table.best_action(state)
        }
    }
}
