//! Training statistics tracking
//!
//! Tracks episode-level metrics (rewards, lengths, scores) and the magnitude
//! of TD errors over rolling windows for smoothed progress reporting.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(15.5, 150, 5);
/// stats.record_update(0.8);
///
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores, food eaten (rolling window)
    episode_scores: VecDeque<u32>,

    /// Absolute TD errors from value updates (rolling window)
    td_errors: VecDeque<f32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker keeping the last `window_size` values of each metric
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            td_errors: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32) {
        Self::push_window(&mut self.episode_rewards, reward, self.window_size);
        Self::push_window(&mut self.episode_lengths, length, self.window_size);
        Self::push_window(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
    }

    /// Record one value update; the sign of the TD error is discarded
    pub fn record_update(&mut self, td_error: f32) {
        Self::push_window(&mut self.td_errors, td_error.abs(), self.window_size);
    }

    /// Mean episode reward over the rolling window
    pub fn mean_episode_reward(&self) -> f32 {
        Self::mean_f32(&self.episode_rewards)
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        if self.episode_lengths.is_empty() {
            return 0.0;
        }
        self.episode_lengths.iter().sum::<usize>() as f32 / self.episode_lengths.len() as f32
    }

    /// Mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        if self.episode_scores.is_empty() {
            return 0.0;
        }
        self.episode_scores.iter().sum::<u32>() as f32 / self.episode_scores.len() as f32
    }

    /// Best score seen inside the rolling window
    pub fn best_score(&self) -> u32 {
        self.episode_scores.iter().copied().max().unwrap_or(0)
    }

    /// Mean absolute TD error over the rolling window
    pub fn mean_td_error(&self) -> f32 {
        Self::mean_f32(&self.td_errors)
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// One-line summary for progress logging
    pub fn format_summary(&self) -> String {
        format!(
            "reward: {:.1} | length: {:.1} | score: {:.2} (best {}) | |td|: {:.3}",
            self.mean_episode_reward(),
            self.mean_episode_length(),
            self.mean_episode_score(),
            self.best_score(),
            self.mean_td_error(),
        )
    }

    fn push_window<T>(window: &mut VecDeque<T>, value: T, size: usize) {
        if window.len() == size {
            window.pop_front();
        }
        window.push_back(value);
    }

    fn mean_f32(window: &VecDeque<f32>) -> f32 {
        if window.is_empty() {
            return 0.0;
        }
        window.iter().sum::<f32>() / window.len() as f32
    }
}
