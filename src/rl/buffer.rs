use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;

use super::encoder::StateId;

/// One stored experience, immutable once recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: StateId,
    pub action: usize,
    pub reward: f32,
    pub next_state: StateId,
}

/// Fixed-capacity ring buffer of transitions for experience replay
///
/// Insertion beyond capacity overwrites the oldest entry. Sampling draws
/// uniformly without replacement from the current contents.
#[derive(Debug)]
pub struct ReplayBuffer {
    buffer: Vec<Transition>,
    capacity: usize,
    position: usize,
    rng: SmallRng,
}

impl ReplayBuffer {
    /// Create a buffer; pass a seed for reproducible sampling
    pub fn new(capacity: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
            position: 0,
            rng,
        }
    }

    /// Add a transition. Overwrites the oldest when full.
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(transition);
        } else {
            self.buffer[self.position] = transition;
        }
        self.position = (self.position + 1) % self.capacity;
    }

    /// Sample `min(batch_size, len)` distinct transitions uniformly at random.
    ///
    /// An empty buffer yields an empty batch; a learning pass over it is
    /// simply a no-op.
    pub fn sample(&mut self, batch_size: usize) -> Vec<Transition> {
        let amount = batch_size.min(self.buffer.len());
        index::sample(&mut self.rng, self.buffer.len(), amount)
            .iter()
            .map(|i| self.buffer[i])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
