use serde::{Deserialize, Serialize};

use crate::game::{SnakeWorld, ACTIONS};

/// Which state discretization an agent uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Absolute head and food coordinates
    Raw,
    /// Relative food direction, wall distances and adjacent obstacles
    Sensor,
}

/// Dense index of a discretized state, usable directly against the Q-table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub usize);

/// Maps raw world state to a dense table index
///
/// Both variants produce a tuple of bounded non-negative features which is
/// flattened row-major over `dims()`. The variant is chosen once per agent;
/// the resulting table shape is fixed for the agent's lifetime.
#[derive(Debug, Clone)]
pub struct StateEncoder {
    kind: EncoderKind,
    grid_size: usize,
    dims: Vec<usize>,
}

impl StateEncoder {
    pub fn new(kind: EncoderKind, grid_size: usize) -> Self {
        let g = grid_size;
        let dims = match kind {
            // Head coordinates plus food coordinates; the food axes carry one
            // extra bucket at index 0 for the "no food" sentinel.
            EncoderKind::Raw => vec![g, g, g + 1, g + 1],
            // Food direction signs, distance to each wall, four obstacle bits.
            EncoderKind::Sensor => vec![3, 3, g - 1, g - 1, g - 1, g - 1, 2, 2, 2, 2],
        };
        Self {
            kind,
            grid_size,
            dims,
        }
    }

    pub fn kind(&self) -> EncoderKind {
        self.kind
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Sizes of the feature axes, in encoding order
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of discrete states
    pub fn state_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Encode the current world state as a dense table index
    pub fn encode(&self, world: &SnakeWorld) -> StateId {
        let features = match self.kind {
            EncoderKind::Raw => self.raw_features(world),
            EncoderKind::Sensor => self.sensor_features(world),
        };
        self.flatten(&features)
    }

    fn raw_features(&self, world: &SnakeWorld) -> Vec<usize> {
        let head = world.snake().head();
        // Food coordinates are shifted by one so that 0 means "no food".
        let (food_x, food_y) = match world.food_position() {
            Some(food) => (food.x as usize + 1, food.y as usize + 1),
            None => (0, 0),
        };
        vec![head.x as usize, head.y as usize, food_x, food_y]
    }

    fn sensor_features(&self, world: &SnakeWorld) -> Vec<usize> {
        let head = world.snake().head();
        let edge = self.grid_size as i32 - 1;

        // Sign of the food offset on each axis, shifted into 0..3.
        // Without food there is no offset to report.
        let (dir_x, dir_y) = match world.food_position() {
            Some(food) => (
                ((food.x - head.x).signum() + 1) as usize,
                ((food.y - head.y).signum() + 1) as usize,
            ),
            None => (1, 1),
        };

        // Interior distance to each wall row/column; 0 means adjacent.
        let dist_top = (head.y - 1) as usize;
        let dist_bottom = (edge - 1 - head.y) as usize;
        let dist_left = (head.x - 1) as usize;
        let dist_right = (edge - 1 - head.x) as usize;

        let mut features = vec![dir_x, dir_y, dist_top, dist_bottom, dist_left, dist_right];
        for direction in ACTIONS {
            let blocked = world.is_blocked(head.moved_in_direction(direction));
            features.push(blocked as usize);
        }
        features
    }

    /// Row-major flattening of a feature tuple over `dims`
    fn flatten(&self, features: &[usize]) -> StateId {
        debug_assert_eq!(features.len(), self.dims.len());
        let mut index = 0;
        for (&feature, &dim) in features.iter().zip(&self.dims) {
            debug_assert!(feature < dim, "feature {feature} out of range 0..{dim}");
            index = index * dim + feature;
        }
        StateId(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, SnakeWorld};

    fn world() -> SnakeWorld {
        SnakeWorld::new(GameConfig::default())
    }

    #[test]
    fn test_raw_dims() {
        let encoder = StateEncoder::new(EncoderKind::Raw, 10);
        assert_eq!(encoder.dims(), &[10, 10, 11, 11]);
        assert_eq!(encoder.state_count(), 10 * 10 * 11 * 11);
    }

    #[test]
    fn test_sensor_dims() {
        let encoder = StateEncoder::new(EncoderKind::Sensor, 10);
        assert_eq!(encoder.dims(), &[3, 3, 9, 9, 9, 9, 2, 2, 2, 2]);
    }

    #[test]
    fn test_encoded_states_in_range() {
        let w = world();
        for kind in [EncoderKind::Raw, EncoderKind::Sensor] {
            let encoder = StateEncoder::new(kind, 10);
            let StateId(id) = encoder.encode(&w);
            assert!(id < encoder.state_count());
        }
    }

    #[test]
    fn test_raw_features_reflect_world() {
        let w = world();
        let encoder = StateEncoder::new(EncoderKind::Raw, 10);

        let food = w.food_position().unwrap();
        let features = encoder.raw_features(&w);
        assert_eq!(
            features,
            vec![5, 5, food.x as usize + 1, food.y as usize + 1]
        );
    }

    #[test]
    fn test_encoding_changes_after_step() {
        let mut w = world();
        let encoder = StateEncoder::new(EncoderKind::Raw, 10);

        let before = encoder.encode(&w);
        w.step(Direction::Right);
        let after = encoder.encode(&w);
        assert_ne!(before, after);
    }

    #[test]
    fn test_sensor_obstacle_bits() {
        let w = world();
        let encoder = StateEncoder::new(EncoderKind::Sensor, 10);

        let features = encoder.sensor_features(&w);
        // Head at (5,5), body trailing left: only the Left neighbor is blocked.
        assert_eq!(&features[6..], &[0, 0, 1, 0]);
        // Interior distances from the center cell.
        assert_eq!(&features[2..6], &[4, 3, 4, 3]);
    }

    #[test]
    fn test_flatten_is_injective_over_corners() {
        let encoder = StateEncoder::new(EncoderKind::Raw, 10);
        let a = encoder.flatten(&[0, 0, 0, 0]);
        let b = encoder.flatten(&[9, 9, 10, 10]);
        let c = encoder.flatten(&[0, 0, 0, 1]);
        assert_eq!(b.0, encoder.state_count() - 1);
        assert_ne!(a, c);
        assert_eq!(c.0, 1);
    }
}
