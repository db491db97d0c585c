use grid_snake::game::{
    Action, Direction, GameConfig, GameEngine, GameState, Phase, Position, Snake,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn cells(body: &[(i32, i32)]) -> Vec<Position> {
    body.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

fn assert_invariants(state: &GameState) {
    for cell in state.snake_cells() {
        assert!(state.is_in_bounds(*cell), "segment {cell:?} left the grid");
    }

    let mut seen = state.snake_cells().to_vec();
    seen.sort_by_key(|p| (p.x, p.y));
    seen.dedup();
    if !state.game_over {
        assert_eq!(seen.len(), state.snake.len(), "snake overlaps itself");
    }

    if !state.won {
        assert!(
            !state.is_occupied_by_snake(state.food),
            "food {:?} placed on the snake",
            state.food
        );
        assert!(state.is_in_bounds(state.food));
    }
}

/// Random steering on a small board, restarting after every game over
#[test]
fn random_play_keeps_invariants() {
    let mut engine = GameEngine::new(GameConfig::new(6).with_seed(2024));
    let mut driver = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut state = engine.reset();
        let mut eaten = 0u32;
        assert_invariants(&state);

        for _ in 0..500 {
            if driver.gen_bool(0.3) {
                let direction = DIRECTIONS[driver.gen_range(0..DIRECTIONS.len())];
                state.apply(Action::Steer(direction));
            }

            let length_before = state.snake.len();
            let result = engine.tick(&mut state);
            assert_invariants(&state);

            if result.info.ate_food {
                eaten += 1;
                assert_eq!(state.snake.len(), length_before + 1);
            } else {
                assert_eq!(state.snake.len(), length_before);
            }
            assert_eq!(state.score, 10 * eaten);

            if result.terminated {
                break;
            }
        }
    }
}

#[test]
fn reversal_does_not_change_next_move() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(1));

    for (direction, reverse) in [
        (Direction::Right, Direction::Left),
        (Direction::Down, Direction::Up),
    ] {
        let head = Position::new(10, 10);
        let snake = Snake::new(head, direction, 3);
        let mut with_reverse = GameState::new(snake.clone(), Position::new(0, 19), 20);
        let mut without = GameState::new(snake, Position::new(0, 19), 20);

        with_reverse.queue_direction(reverse);
        engine.tick(&mut with_reverse);
        engine.tick(&mut without);

        assert_eq!(with_reverse.snake, without.snake);
    }
}

#[test]
fn scenario_plain_move() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(11));
    let mut state = engine.reset();
    state.food = Position::new(15, 15);

    engine.tick(&mut state);

    assert_eq!(state.snake.body, cells(&[(3, 0), (2, 0), (1, 0)]));
    assert!(!state.game_over);
}

#[test]
fn scenario_right_wall() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(11));
    let snake = Snake::from_segments(cells(&[(19, 0), (18, 0), (17, 0)]), Direction::Right);
    let mut state = GameState::new(snake.clone(), Position::new(5, 5), 20);

    engine.tick(&mut state);

    assert!(state.game_over);
    assert_eq!(state.snake, snake);
}

#[test]
fn scenario_eat_food() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(11));
    let mut state = engine.reset();
    state.food = Position::new(3, 0);

    engine.tick(&mut state);

    assert_eq!(state.snake.body, cells(&[(3, 0), (2, 0), (1, 0), (0, 0)]));
    assert_eq!(state.score, 10);
    assert_ne!(state.food, Position::new(3, 0));
    assert!(!state.is_occupied_by_snake(state.food));
}

#[test]
fn scenario_pause_freezes_until_resumed() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(11));
    let mut state = engine.reset();
    state.toggle_pause();
    let frozen = state.clone();

    for _ in 0..10 {
        engine.tick(&mut state);
    }
    assert_eq!(state, frozen);

    state.toggle_pause();
    engine.tick(&mut state);
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.snake.head(), Position::new(3, 0));
}

#[test]
fn game_over_is_terminal_until_reset() {
    let mut engine = GameEngine::new(GameConfig::default().with_seed(11));
    let mut state = engine.reset();
    state.queue_direction(Direction::Up);
    engine.tick(&mut state);
    assert_eq!(state.phase(), Phase::GameOver);

    let ended = state.clone();
    state.queue_direction(Direction::Down);
    state.toggle_pause();
    engine.tick(&mut state);
    assert_eq!(state.snake, ended.snake);
    assert!(state.paused);
    assert_eq!(state.phase(), Phase::GameOver);

    let state = engine.reset();
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.score, 0);
}

/// Serpentine path over a 4x4 board eats every food and ends in a win
#[test]
fn filling_the_board_ends_in_a_win() {
    let mut engine = GameEngine::new(GameConfig {
        grid_size: 4,
        initial_snake_length: 1,
        ..GameConfig::default().with_seed(5)
    });
    let mut state = engine.reset();
    assert_eq!(state.snake.body, cells(&[(0, 0)]));

    // Boustrophedon order: row 0 left to right, row 1 right to left, ...
    let path: Vec<Position> = (0..4)
        .flat_map(|y| {
            let xs: Vec<i32> = if y % 2 == 0 { (0..4).collect() } else { (0..4).rev().collect() };
            xs.into_iter().map(move |x| Position::new(x, y))
        })
        .collect();

    for next in path.iter().skip(1) {
        // Drop food right where the head is going so the snake always grows
        state.food = *next;
        let head = state.snake.head();
        let direction = match (next.x - head.x, next.y - head.y) {
            (1, 0) => Direction::Right,
            (-1, 0) => Direction::Left,
            (0, 1) => Direction::Down,
            _ => Direction::Up,
        };
        state.queue_direction(direction);

        let result = engine.tick(&mut state);
        assert!(result.info.ate_food, "missed food at {next:?}");
    }

    assert_eq!(state.snake.len(), 16);
    assert_eq!(state.score, 150);
    assert_eq!(state.phase(), Phase::Won);
}
