//! Evaluation mode
//!
//! Loads a persisted Q-table and runs greedy (epsilon = 0) episodes
//! headlessly, reporting the score of each. This is the consumer side of the
//! persistence contract: the metadata sidecar tells it which encoder and grid
//! size the table was trained for.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::game::{Direction, GameConfig, SnakeWorld, ACTION_COUNT};
use crate::rl::{load_table, EpsilonGreedy, QTable, StateEncoder};

/// Configuration for evaluation mode
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Number of greedy episodes to run
    pub episodes: usize,

    /// Hard cap on steps per episode
    pub max_steps_per_episode: usize,

    /// Path of the persisted Q-table
    pub table_path: PathBuf,

    /// Game configuration; the grid size must match the trained table
    pub game: GameConfig,
}

impl EvalConfig {
    pub fn new(episodes: usize, table_path: PathBuf) -> Self {
        Self {
            episodes,
            max_steps_per_episode: 1000,
            table_path,
            game: GameConfig::default(),
        }
    }
}

/// Evaluation mode: greedy rollouts of a trained table
pub struct EvalMode {
    world: SnakeWorld,
    encoder: StateEncoder,
    table: QTable,
    policy: EpsilonGreedy,
    config: EvalConfig,
}

impl EvalMode {
    /// Load the table and check it against the requested game configuration
    pub fn new(config: EvalConfig) -> Result<Self> {
        config.game.validate().map_err(anyhow::Error::msg)?;

        let (table, meta) = load_table(&config.table_path)
            .with_context(|| format!("failed to load Q-table from {:?}", config.table_path))?;

        if meta.grid_size != config.game.grid_size {
            bail!(
                "table was trained on a {0}x{0} grid but evaluation requested {1}x{1}",
                meta.grid_size,
                config.game.grid_size
            );
        }
        if meta.action_count != ACTION_COUNT {
            bail!(
                "table has {} actions per state, expected {}",
                meta.action_count,
                ACTION_COUNT
            );
        }

        let encoder = StateEncoder::new(meta.encoder, config.game.grid_size);
        if encoder.dims() != meta.dims.as_slice() {
            bail!(
                "table shape {:?} does not match encoder shape {:?}",
                meta.dims,
                encoder.dims()
            );
        }

        Ok(Self {
            world: SnakeWorld::new(config.game.clone()),
            encoder,
            table,
            policy: EpsilonGreedy::greedy(ACTION_COUNT),
            config,
        })
    }

    /// Run all evaluation episodes, printing a per-episode score line
    pub fn run(&mut self) -> Result<()> {
        println!(
            "Evaluating {:?} for {} episodes",
            self.config.table_path, self.config.episodes
        );

        let mut scores = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let (score, steps) = self.run_episode()?;
            println!(
                "Episode {}: score {} in {} steps",
                episode + 1,
                score,
                steps
            );
            scores.push(score);
        }

        let best = scores.iter().copied().max().unwrap_or(0);
        let mean = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<u32>() as f32 / scores.len() as f32
        };
        println!("\nMean score: {mean:.2} | Best score: {best}");

        Ok(())
    }

    fn run_episode(&mut self) -> Result<(u32, usize)> {
        self.world.reset();
        let mut steps = 0;
        let mut score = 0;

        loop {
            let state = self.encoder.encode(&self.world);
            let action = self.policy.select(&self.table, state);
            let direction = Direction::try_from(action)?;

            let result = self.world.step(direction);
            steps += 1;
            score = result.score;

            if result.terminated || steps >= self.config.max_steps_per_episode {
                break;
            }
        }

        Ok((score, steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{save_table, EncoderKind, TableMetadata};
    use tempfile::TempDir;

    fn saved_table(dir: &TempDir, grid_size: usize) -> PathBuf {
        let path = dir.path().join("qtable.json");
        let encoder = StateEncoder::new(EncoderKind::Raw, grid_size);
        let table = QTable::new(encoder.dims().to_vec(), ACTION_COUNT);
        let meta = TableMetadata::new(&table, EncoderKind::Raw, grid_size, 10);
        save_table(&table, &meta, &path).unwrap();
        path
    }

    #[test]
    fn test_eval_runs_with_matching_table() {
        let dir = TempDir::new().unwrap();
        let path = saved_table(&dir, 10);

        let mut config = EvalConfig::new(2, path);
        config.max_steps_per_episode = 50;

        let mut mode = EvalMode::new(config).unwrap();
        let (score, steps) = mode.run_episode().unwrap();
        assert!(steps > 0 && steps <= 50);
        // A zero table walks greedily into a wall before scoring much.
        assert!(score <= 1);
    }

    #[test]
    fn test_eval_rejects_grid_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = saved_table(&dir, 12);

        let mut config = EvalConfig::new(1, path);
        config.game.grid_size = 10;

        assert!(EvalMode::new(config).is_err());
    }

    #[test]
    fn test_eval_rejects_missing_table() {
        let dir = TempDir::new().unwrap();
        let config = EvalConfig::new(1, dir.path().join("absent.json"));
        assert!(EvalMode::new(config).is_err());
    }
}
