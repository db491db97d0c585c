use super::{
    action::Direction,
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument};

/// Rejection-sampling attempts per board cell before falling back to a scan
const FOOD_ATTEMPTS_PER_CELL: usize = 4;

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the snake now covers the whole board
    pub board_filled: bool,
}

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// False when the tick was skipped because the game is paused or over
    pub advanced: bool,
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the tick
    pub info: TickInfo,
}

impl TickResult {
    fn skipped(state: &GameState) -> Self {
        Self {
            advanced: false,
            terminated: state.game_over,
            info: TickInfo::default(),
        }
    }
}

/// Drives a [`GameState`]; owns the configuration and the food RNG.
///
/// The engine never schedules itself. The host calls [`GameEngine::tick`] from
/// whatever timer it owns.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: snake along the top row heading right, new food, score 0
    pub fn reset(&mut self) -> GameState {
        let length = self.config.initial_snake_length;
        let snake = Snake::new(Position::new(length as i32 - 1, 0), Direction::Right, length);

        // Only reachable with an unvalidated config that leaves no free cell
        let food = self
            .place_food(&snake, self.config.grid_size)
            .unwrap_or_else(|| snake.head());

        debug!(?food, grid_size = self.config.grid_size, "game reset");
        GameState::new(snake, food, self.config.grid_size)
    }

    /// Advance the game by one step.
    ///
    /// No-op while paused or after the game ended. A fatal move sets
    /// `game_over` and leaves the snake, score and food untouched.
    #[instrument(level = "trace", skip_all)]
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        if !state.is_running() {
            return TickResult::skipped(state);
        }

        // Commit the queued direction
        state.snake.direction = state.next_direction;

        // Calculate new head position
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Check for collisions
        if let Some(collision_type) = Self::check_collision(state, new_head) {
            state.game_over = true;
            debug!(?collision_type, ?new_head, score = state.score, "collision");

            return TickResult {
                advanced: true,
                terminated: true,
                info: TickInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        // Move snake (grow if ate food)
        let ate_food = new_head == state.food;
        state.snake.move_snake(ate_food);
        state.steps += 1;

        let mut info = TickInfo {
            ate_food,
            ..Default::default()
        };

        // Update score and spawn new food if needed
        if ate_food {
            state.score += self.config.food_reward;
            debug!(score = state.score, length = state.snake.len(), "food eaten");

            match self.place_food(&state.snake, state.grid_size) {
                Some(food) => state.food = food,
                None => {
                    state.won = true;
                    state.game_over = true;
                    info.board_filled = true;
                    debug!(score = state.score, "board filled");
                }
            }
        }

        TickResult {
            advanced: true,
            terminated: state.game_over,
            info,
        }
    }

    /// Wall first, then body. The tail still counts as body here.
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random free cell of a `size` x `size` grid, or `None`
    /// if the snake covers it.
    ///
    /// Rejection sampling is capped; once the cap is hit the free cells are
    /// enumerated and one is drawn from them directly.
    fn place_food(&mut self, snake: &Snake, size: usize) -> Option<Position> {
        let cell_count = size * size;
        if snake.len() >= cell_count {
            return None;
        }

        for _ in 0..cell_count * FOOD_ATTEMPTS_PER_CELL {
            let pos = Position::new(
                self.rng.gen_range(0..size) as i32,
                self.rng.gen_range(0..size) as i32,
            );

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Sampling kept hitting the snake; draw from what is left
        let free: Vec<Position> = (0..size as i32)
            .flat_map(|y| (0..size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}
