use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use q_snake::game::{FoodMode, GameConfig};
use q_snake::modes::{EvalConfig, EvalMode, TrainConfig, TrainMode};
use q_snake::rl::{EncoderKind, LearningMode};

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake grid-world with a tabular Q-learning agent")]
struct Cli {
    /// What to do with the Q-table
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Grid side length, wall border included
    #[arg(long, default_value = "10")]
    grid_size: usize,

    /// Number of episodes to run
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Learning rate
    #[arg(long, default_value = "0.1")]
    alpha: f32,

    /// Discount factor
    #[arg(long, default_value = "0.9")]
    gamma: f32,

    /// Exploration probability
    #[arg(long, default_value = "0.1")]
    epsilon: f32,

    /// State discretization variant
    #[arg(long, default_value = "raw")]
    encoder: EncoderArg,

    /// Transition source for the TD update
    #[arg(long, default_value = "online")]
    learning: LearningArg,

    /// Replay buffer capacity (replay learning only)
    #[arg(long, default_value = "10000")]
    capacity: usize,

    /// Replay batch size (replay learning only)
    #[arg(long, default_value = "32")]
    batch_size: usize,

    /// Food generation mode
    #[arg(long, default_value = "reactive")]
    food_mode: FoodModeArg,

    /// Seed for the food source
    #[arg(long, default_value = "967")]
    food_seed: u64,

    /// Seed for exploration and replay sampling (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Step cap per episode
    #[arg(long, default_value = "1000")]
    max_steps: usize,

    /// Log progress every N episodes (train mode)
    #[arg(long, default_value = "100")]
    log_frequency: usize,

    /// Q-table file to write (train) or read (eval)
    #[arg(long, default_value = "models/qtable.json")]
    table: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Train an agent and save its Q-table
    Train,
    /// Run greedy episodes from a saved Q-table
    Eval,
}

#[derive(Clone, Copy, ValueEnum)]
enum EncoderArg {
    /// Absolute head and food coordinates
    Raw,
    /// Relative food direction, wall distances and adjacent obstacles
    Sensor,
}

#[derive(Clone, Copy, ValueEnum)]
enum LearningArg {
    /// One TD update per environment step
    Online,
    /// Batch updates drawn from a replay buffer
    Replay,
}

#[derive(Clone, Copy, ValueEnum)]
enum FoodModeArg {
    /// Sample a fresh free cell whenever food is consumed
    Reactive,
    /// Replay a fixed seeded food sequence every episode
    Scripted,
}

fn game_config(cli: &Cli) -> GameConfig {
    let mut config = GameConfig::new(cli.grid_size);
    config.food_mode = match cli.food_mode {
        FoodModeArg::Reactive => FoodMode::Reactive,
        FoodModeArg::Scripted => FoodMode::Scripted,
    };
    config.food_seed = cli.food_seed;
    config
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.mode {
        Mode::Train => {
            let mut config = TrainConfig::new(cli.episodes, cli.table.clone());
            config.max_steps_per_episode = cli.max_steps;
            config.log_frequency = cli.log_frequency;
            config.game = game_config(&cli);
            config.agent.alpha = cli.alpha;
            config.agent.gamma = cli.gamma;
            config.agent.epsilon = cli.epsilon;
            config.agent.seed = cli.seed;
            config.agent.encoder = match cli.encoder {
                EncoderArg::Raw => EncoderKind::Raw,
                EncoderArg::Sensor => EncoderKind::Sensor,
            };
            config.agent.learning = match cli.learning {
                LearningArg::Online => LearningMode::Online,
                LearningArg::Replay => LearningMode::Replay {
                    capacity: cli.capacity,
                    batch_size: cli.batch_size,
                },
            };

            TrainMode::new(config)?.run()
        }
        Mode::Eval => {
            let mut config = EvalConfig::new(cli.episodes, cli.table.clone());
            config.max_steps_per_episode = cli.max_steps;
            config.game = game_config(&cli);

            EvalMode::new(config)?.run()
        }
    }
}
