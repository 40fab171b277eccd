use super::action::Direction;
use super::config::GameConfig;
use super::food::{FoodMode, FoodSource};
use super::state::{Position, Snake, TerminalCause};

/// Result of a world step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Why the episode ended, if it did
    pub cause: Option<TerminalCause>,
    /// Score at the end of this step; on a terminal step this is the score
    /// the episode finished with, even though the world has already reset
    pub score: u32,
}

/// The snake grid world
///
/// Owns the grid geometry, the snake, the food source and the score, and
/// exposes the reset/step contract consumed by the training driver. It has no
/// rendering or I/O dependency; a drawing collaborator only needs the
/// read-only accessors.
///
/// A terminal step resets the world internally before returning, so the state
/// observed after any `step` call is always a live episode.
#[derive(Debug, Clone)]
pub struct SnakeWorld {
    config: GameConfig,
    snake: Snake,
    food: FoodSource,
    food_position: Option<Position>,
    score: u32,
}

impl SnakeWorld {
    /// Create a new world; the first episode starts immediately
    pub fn new(config: GameConfig) -> Self {
        let food = match config.food_mode {
            FoodMode::Reactive => FoodSource::reactive(config.grid_size, config.food_seed),
            FoodMode::Scripted => {
                FoodSource::scripted(config.grid_size, config.food_seed, config.scripted_food_count)
            }
        };

        let mut world = Self {
            snake: Snake::new(Position::new(0, 0), Direction::Right, 1),
            food,
            food_position: None,
            score: 0,
            config,
        };
        world.reset();
        world
    }

    /// Reset to the fixed starting state: snake centered, facing right,
    /// scripted food restored from its backup, score zero
    pub fn reset(&mut self) {
        let center = (self.config.grid_size / 2) as i32;
        self.snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );
        self.food.reset();
        self.food_position = self.food.next(&self.snake);
        self.score = 0;
    }

    /// Advance the world by one move of the snake's head.
    ///
    /// Check order: self-collision, wall collision, food, plain move. There
    /// is no explicit 180-degree-turn restriction; reversing into the neck is
    /// caught by the self-collision check.
    pub fn step(&mut self, direction: Direction) -> StepResult {
        let new_head = self.snake.head().moved_in_direction(direction);

        if self.snake.collides_with_body(new_head) {
            return self.finish(TerminalCause::SelfCollision, self.config.death_penalty);
        }

        if self.is_wall(new_head) {
            return self.finish(TerminalCause::Wall, self.config.death_penalty);
        }

        if Some(new_head) == self.food_position {
            self.snake.advance(new_head, true);
            self.score += 1;

            return match self.food.next(&self.snake) {
                Some(pos) => {
                    self.food_position = Some(pos);
                    StepResult {
                        reward: self.config.food_reward,
                        terminated: false,
                        cause: None,
                        score: self.score,
                    }
                }
                // The food just eaten still pays out; the episode ends
                // because the source has nothing left to offer.
                None => self.finish(self.food.depleted_cause(), self.config.food_reward),
            };
        }

        self.snake.advance(new_head, false);
        StepResult {
            reward: self.config.step_reward,
            terminated: false,
            cause: None,
            score: self.score,
        }
    }

    /// End the episode: report the final score, then reset in place
    fn finish(&mut self, cause: TerminalCause, reward: f32) -> StepResult {
        let final_score = self.score;
        self.reset();
        StepResult {
            reward,
            terminated: true,
            cause: Some(cause),
            score: final_score,
        }
    }

    /// Whether the position lies on or beyond the wall border
    fn is_wall(&self, pos: Position) -> bool {
        let edge = self.config.grid_size as i32 - 1;
        pos.x <= 0 || pos.x >= edge || pos.y <= 0 || pos.y >= edge
    }

    /// Whether the adjacent cell is impassable (wall or snake body)
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.is_wall(pos) || self.snake.occupies(pos)
    }

    /// Side length of the grid, wall border included
    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    /// The snake body, head first (read-only projection for drawing)
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food position, if the source has produced one
    pub fn food_position(&self) -> Option<Position> {
        self.food_position
    }

    /// Food eaten in the current episode
    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> SnakeWorld {
        SnakeWorld::new(GameConfig::default())
    }

    fn body(world: &SnakeWorld) -> Vec<Position> {
        world.snake().segments().collect()
    }

    #[test]
    fn test_reset_state() {
        let w = world();
        assert_eq!(w.score(), 0);
        assert_eq!(
            body(&w),
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5)
            ]
        );
        let food = w.food_position().unwrap();
        assert!(!w.snake().occupies(food));
    }

    #[test]
    fn test_plain_move_right() {
        let mut w = world();
        // Keep the scenario independent of where food landed.
        w.food_position = Some(Position::new(8, 8));

        let result = w.step(Direction::Right);

        assert_eq!(result.reward, 1.0);
        assert!(!result.terminated);
        assert_eq!(result.cause, None);
        assert_eq!(
            body(&w),
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5)
            ]
        );
    }

    #[test]
    fn test_unit_delta_for_all_directions() {
        for direction in crate::game::action::ACTIONS {
            let mut w = world();
            w.food_position = Some(Position::new(8, 8));
            let head = w.snake().head();
            let len = w.snake().len();

            let result = w.step(direction);

            if direction == Direction::Left {
                // Reversing lands on the neck segment.
                assert!(result.terminated);
                continue;
            }
            assert!(!result.terminated);
            assert_eq!(w.snake().head(), head.moved_in_direction(direction));
            assert_eq!(w.snake().len(), len);
        }
    }

    #[test]
    fn test_self_collision_resets_world() {
        let mut w = world();
        w.food_position = Some(Position::new(8, 8));

        // Moving left from (5,5) lands on the body segment (4,5).
        let result = w.step(Direction::Left);

        assert!(result.terminated);
        assert_eq!(result.cause, Some(TerminalCause::SelfCollision));
        assert_eq!(result.reward, -50.0);
        assert_eq!(result.score, 0);
        // World already reset to the starting snake.
        assert_eq!(w.score(), 0);
        assert_eq!(w.snake().head(), Position::new(5, 5));
        assert_eq!(w.snake().len(), 3);
    }

    #[test]
    fn test_wall_collision() {
        let mut w = world();
        w.food_position = Some(Position::new(8, 8));

        // Head starts at x=5; the wall column is x=9.
        for _ in 0..3 {
            let result = w.step(Direction::Right);
            assert!(!result.terminated);
        }
        let result = w.step(Direction::Right);

        assert!(result.terminated);
        assert_eq!(result.cause, Some(TerminalCause::Wall));
        assert_eq!(result.reward, -50.0);
    }

    #[test]
    fn test_food_consumption() {
        let mut w = world();
        w.food_position = Some(Position::new(6, 5));

        let result = w.step(Direction::Right);

        assert!(!result.terminated);
        assert_eq!(result.reward, 50.0);
        assert_eq!(result.score, 1);
        assert_eq!(w.score(), 1);
        assert_eq!(w.snake().len(), 4);

        // New food is disjoint from the now-longer body.
        let food = w.food_position().unwrap();
        assert!(!w.snake().occupies(food));
    }

    #[test]
    fn test_scripted_runs_replay_identical_food() {
        let mut config = GameConfig::default();
        config.food_mode = FoodMode::Scripted;

        let mut a = SnakeWorld::new(config.clone());
        let mut b = SnakeWorld::new(config);

        for _ in 0..3 {
            assert_eq!(a.food_position(), b.food_position());
            // Walk a fixed loop so both worlds follow the same trajectory.
            for direction in [Direction::Right, Direction::Down, Direction::Left] {
                assert_eq!(a.step(direction), b.step(direction));
            }
        }
    }

    #[test]
    fn test_scripted_exhaustion_terminates() {
        let mut config = GameConfig::default();
        config.food_mode = FoodMode::Scripted;
        config.scripted_food_count = 1;

        let mut w = SnakeWorld::new(config);

        // The queue held exactly one position, already consumed by reset.
        // Move the remaining food in front of the head and eat it.
        w.food_position = Some(Position::new(6, 5));
        let result = w.step(Direction::Right);
        assert!(result.terminated);
        assert_eq!(result.cause, Some(TerminalCause::FoodDepleted));
        assert_eq!(result.reward, 50.0);
        assert_eq!(result.score, 1);
    }
}
