//! Training mode for the tabular Q-learning agent
//!
//! Runs the episode/step loop: encode the world state, select an action,
//! step the world, encode the next state, apply the TD update (directly or
//! through the replay buffer), until the configured number of episodes is
//! done. The trained table is persisted at the end.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::game::{Direction, GameConfig, SnakeWorld, ACTION_COUNT};
use crate::metrics::TrainingStats;
use crate::rl::{
    save_table, AgentConfig, EpsilonGreedy, LearningMode, QTable, ReplayBuffer, StateEncoder,
    TableMetadata, Transition,
};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub episodes: usize,

    /// Hard cap on steps per episode, so a policy that orbits forever
    /// still ends its episode
    pub max_steps_per_episode: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Path to save the trained Q-table
    pub save_path: PathBuf,

    /// Game configuration (grid size, rewards, food source)
    pub game: GameConfig,

    /// Agent hyperparameters
    pub agent: AgentConfig,
}

impl TrainConfig {
    /// Create a training configuration with defaults
    pub fn new(episodes: usize, save_path: PathBuf) -> Self {
        Self {
            episodes,
            max_steps_per_episode: 1000,
            log_frequency: 100,
            save_path,
            game: GameConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

/// Training mode: owns the world, the table and the policy for one run
pub struct TrainMode {
    world: SnakeWorld,
    encoder: StateEncoder,
    table: QTable,
    policy: EpsilonGreedy,
    buffer: Option<ReplayBuffer>,
    stats: TrainingStats,
    config: TrainConfig,
}

impl TrainMode {
    /// Create a new training mode, validating both configurations
    pub fn new(config: TrainConfig) -> Result<Self> {
        config.game.validate().map_err(|e| anyhow!(e))?;
        config.agent.validate().map_err(|e| anyhow!(e))?;

        let world = SnakeWorld::new(config.game.clone());
        let encoder = StateEncoder::new(config.agent.encoder, config.game.grid_size);
        let table = QTable::new(encoder.dims().to_vec(), ACTION_COUNT);
        let policy = EpsilonGreedy::new(config.agent.epsilon, ACTION_COUNT, config.agent.seed);

        let buffer = match config.agent.learning {
            LearningMode::Online => None,
            LearningMode::Replay { capacity, .. } => {
                Some(ReplayBuffer::new(capacity, config.agent.seed))
            }
        };

        Ok(Self {
            world,
            encoder,
            table,
            policy,
            buffer,
            stats: TrainingStats::new(100),
            config,
        })
    }

    /// Run the training loop and save the final table
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.episodes {
            let (reward, steps, score) = self.run_episode()?;
            self.stats.record_episode(reward, steps, score);

            if (episode + 1) % self.config.log_frequency == 0 {
                println!(
                    "[Episode {}/{}] {}",
                    episode + 1,
                    self.config.episodes,
                    self.stats.format_summary()
                );
            }
        }

        self.save()?;

        println!("\nTraining complete!");
        println!("Q-table saved to: {:?}", self.config.save_path);
        println!("Final statistics: {}", self.stats.format_summary());

        Ok(())
    }

    /// Run a single episode; returns (cumulative reward, steps, score)
    fn run_episode(&mut self) -> Result<(f32, usize, u32)> {
        // A previous episode may have stopped at the step limit mid-game.
        self.world.reset();

        let mut state = self.encoder.encode(&self.world);
        let mut episode_reward = 0.0;
        let mut steps = 0;
        let mut score = 0;

        loop {
            let action = self.policy.select(&self.table, state);
            let direction = Direction::try_from(action)?;

            let result = self.world.step(direction);
            let next_state = self.encoder.encode(&self.world);

            self.learn(Transition {
                state,
                action,
                reward: result.reward,
                next_state,
            });

            episode_reward += result.reward;
            steps += 1;
            score = result.score;

            if result.terminated || steps >= self.config.max_steps_per_episode {
                break;
            }
            state = next_state;
        }

        Ok((episode_reward, steps, score))
    }

    /// Feed one transition to the update rule, directly or via the buffer
    fn learn(&mut self, transition: Transition) {
        let alpha = self.config.agent.alpha;
        let gamma = self.config.agent.gamma;

        match (&mut self.buffer, self.config.agent.learning) {
            (Some(buffer), LearningMode::Replay { batch_size, .. }) => {
                buffer.push(transition);
                for t in buffer.sample(batch_size) {
                    let td = self
                        .table
                        .update(t.state, t.action, t.reward, t.next_state, alpha, gamma);
                    self.stats.record_update(td);
                }
            }
            _ => {
                let td = self.table.update(
                    transition.state,
                    transition.action,
                    transition.reward,
                    transition.next_state,
                    alpha,
                    gamma,
                );
                self.stats.record_update(td);
            }
        }
    }

    /// Persist the trained table and its metadata
    fn save(&self) -> Result<()> {
        let meta = TableMetadata::new(
            &self.table,
            self.encoder.kind(),
            self.config.game.grid_size,
            self.stats.total_episodes(),
        );
        save_table(&self.table, &meta, &self.config.save_path)
            .with_context(|| format!("failed to save Q-table to {:?}", self.config.save_path))
    }

    /// Access the trained table (for tests and embedding)
    pub fn table(&self) -> &QTable {
        &self.table
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Tabular Q-learning - Snake");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.episodes);
        println!(
            "Grid: {0}x{0} ({1:?} food, seed {2})",
            self.config.game.grid_size, self.config.game.food_mode, self.config.game.food_seed
        );
        println!("Encoder: {:?} ({} states)", self.config.agent.encoder, self.encoder.state_count());
        println!(
            "Alpha: {} | Gamma: {} | Epsilon: {}",
            self.config.agent.alpha, self.config.agent.gamma, self.config.agent.epsilon
        );
        match self.config.agent.learning {
            LearningMode::Online => println!("Learning: online"),
            LearningMode::Replay {
                capacity,
                batch_size,
            } => println!("Learning: replay (capacity {capacity}, batch {batch_size})"),
        }
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }
}
