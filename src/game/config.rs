use serde::{Deserialize, Serialize};

use super::food::FoodMode;

/// Configuration for the game
///
/// The grid is square and includes a one-cell wall border on every side, so
/// the playable interior spans coordinates `1..grid_size - 1` on both axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the grid, wall border included
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Reward for surviving a step
    pub step_reward: f32,
    /// Penalty for dying
    pub death_penalty: f32,

    /// How food positions are produced
    pub food_mode: FoodMode,
    /// Seed for the food position source
    pub food_seed: u64,
    /// Number of positions pre-generated in scripted mode
    pub scripted_food_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            initial_snake_length: 3,
            food_reward: 50.0,
            step_reward: 1.0,
            death_penalty: -50.0,
            food_mode: FoodMode::Reactive,
            food_seed: 967,
            scripted_food_count: 51,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(35)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        // Interior must fit the initial snake plus at least one food cell.
        if self.grid_size < 5 {
            return Err(format!(
                "grid_size must be at least 5, got {}",
                self.grid_size
            ));
        }

        if self.initial_snake_length < 3 {
            return Err(format!(
                "initial_snake_length must be at least 3, got {}",
                self.initial_snake_length
            ));
        }

        let interior = self.grid_size - 2;
        if self.initial_snake_length > interior {
            return Err(format!(
                "initial_snake_length ({}) does not fit in the {} interior columns",
                self.initial_snake_length, interior
            ));
        }

        if self.food_mode == FoodMode::Scripted && self.scripted_food_count == 0 {
            return Err("scripted_food_count must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15);
        assert_eq!(config.grid_size, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_tiny_grid() {
        let config = GameConfig::new(4);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_snake() {
        let mut config = GameConfig::new(6);
        config.initial_snake_length = 5;
        assert!(config.validate().is_err());
    }
}
