use super::action::{Action, Direction};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake trailing behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position hits the snake anywhere but the head.
    ///
    /// The tail counts, even on a step where it is about to move away.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Whole-game state machine, derived from the flags on [`GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
    /// The snake filled every cell, so no food can be placed
    Won,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction committed on the next tick
    pub next_direction: Direction,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    /// Ticks that moved the snake since the last reset
    pub steps: u32,
    pub game_over: bool,
    pub paused: bool,
    pub won: bool,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            next_direction: snake.direction,
            snake,
            food,
            grid_size,
            score: 0,
            steps: 0,
            game_over: false,
            paused: false,
            won: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.won {
            Phase::Won
        } else if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    /// Whether `tick` would advance the simulation
    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Queue a direction for the next tick.
    ///
    /// Reversals relative to the committed direction are dropped. Returns
    /// whether the request was taken.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.next_direction = direction;
        true
    }

    /// Flip the paused flag.
    ///
    /// Also flips after the game has ended; `phase` still reports the end
    /// state and `tick` stays a no-op until reset.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Steer(direction) => {
                self.queue_direction(direction);
            }
            Action::TogglePause => self.toggle_pause(),
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    pub fn snake_cells(&self) -> &[Position] {
        &self.snake.body
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }
}
