use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::state::{Position, Snake, TerminalCause};

/// How food positions are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodMode {
    /// Sample a fresh free interior cell whenever food is consumed
    Reactive,
    /// Replay a fixed, pre-generated sequence of positions every episode
    Scripted,
}

/// Source of food positions for the world
///
/// The mode is fixed at construction; `step` logic never branches on it.
/// Both modes draw from a seeded generator so training runs are reproducible.
#[derive(Debug, Clone)]
pub struct FoodSource {
    grid_size: usize,
    kind: SourceKind,
}

#[derive(Debug, Clone)]
enum SourceKind {
    Reactive {
        rng: SmallRng,
    },
    Scripted {
        queue: VecDeque<Position>,
        backup: Vec<Position>,
    },
}

impl FoodSource {
    /// Create a reactive source with the given seed
    pub fn reactive(grid_size: usize, seed: u64) -> Self {
        Self {
            grid_size,
            kind: SourceKind::Reactive {
                rng: SmallRng::seed_from_u64(seed),
            },
        }
    }

    /// Create a scripted source holding `count` unique pre-generated positions
    pub fn scripted(grid_size: usize, seed: u64, count: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let interior = (grid_size - 2) * (grid_size - 2);
        let count = count.min(interior);

        let mut positions: Vec<Position> = Vec::with_capacity(count);
        while positions.len() < count {
            let pos = sample_interior(&mut rng, grid_size);
            if !positions.contains(&pos) {
                positions.push(pos);
            }
        }

        Self {
            grid_size,
            kind: SourceKind::Scripted {
                queue: positions.iter().copied().collect(),
                backup: positions,
            },
        }
    }

    /// Prepare the source for a new episode.
    ///
    /// Scripted mode restores the full queue from the backup copy so every
    /// episode replays the identical food sequence. Reactive mode keeps its
    /// generator state and simply keeps sampling.
    pub fn reset(&mut self) {
        if let SourceKind::Scripted { queue, backup } = &mut self.kind {
            *queue = backup.iter().copied().collect();
        }
    }

    /// Produce the next food position, never inside the snake.
    ///
    /// Returns `None` when the source cannot produce one: the scripted queue
    /// is exhausted, or no free interior cell remains.
    pub fn next(&mut self, snake: &Snake) -> Option<Position> {
        let interior = (self.grid_size - 2) * (self.grid_size - 2);
        if snake.len() >= interior {
            return None;
        }

        match &mut self.kind {
            SourceKind::Reactive { rng } => loop {
                let pos = sample_interior(rng, self.grid_size);
                if !snake.occupies(pos) {
                    return Some(pos);
                }
            },
            SourceKind::Scripted { queue, .. } => loop {
                // Positions currently under the snake are skipped, not
                // replayed later; the front-to-back order is preserved.
                let pos = queue.pop_front()?;
                if !snake.occupies(pos) {
                    return Some(pos);
                }
            },
        }
    }

    /// Terminal cause reported when this source runs dry
    pub fn depleted_cause(&self) -> TerminalCause {
        match self.kind {
            SourceKind::Reactive { .. } => TerminalCause::BoardFull,
            SourceKind::Scripted { .. } => TerminalCause::FoodDepleted,
        }
    }
}

/// Sample a uniformly random interior cell (wall border excluded)
fn sample_interior(rng: &mut SmallRng, grid_size: usize) -> Position {
    let x = rng.gen_range(1..grid_size as i32 - 1);
    let y = rng.gen_range(1..grid_size as i32 - 1);
    Position::new(x, y)
}
