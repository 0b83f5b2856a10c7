use std::collections::HashSet;

use grid_snake_core::{
    tick_interval_for_level, Cell, Command, Direction, GamePhase, GameSnapshot, GridSize, Level,
    LEVEL_UP_SCORE_INTERVAL, MAX_OBSTACLES, SCORE_PER_FOOD,
};
use grid_snake_world::{self as world, query, Config, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn assert_board_is_consistent(snapshot: &GameSnapshot) {
    let grid = snapshot.grid;
    let snake: HashSet<Cell> = snapshot.snake.iter().copied().collect();
    let obstacles: HashSet<Cell> = snapshot.obstacles.iter().copied().collect();

    assert!(!snapshot.snake.is_empty());
    assert_eq!(snake.len(), snapshot.snake.len(), "snake overlaps itself");
    assert_eq!(obstacles.len(), snapshot.obstacles.len(), "duplicate obstacle");
    assert!(snapshot.obstacles.len() <= MAX_OBSTACLES);
    assert!(snake.is_disjoint(&obstacles), "snake overlaps an obstacle");

    for cell in snake.iter().chain(obstacles.iter()) {
        assert!(grid.contains(*cell), "{cell:?} lies outside {grid:?}");
    }

    for pair in snapshot.snake.windows(2) {
        let distance = pair[0].x().abs_diff(pair[1].x()) + pair[0].y().abs_diff(pair[1].y());
        assert_eq!(distance, 1, "snake is disconnected at {pair:?}");
    }

    match snapshot.food {
        Some(food) => {
            assert!(grid.contains(food));
            assert!(!snake.contains(&food), "food under the snake");
            assert!(!obstacles.contains(&food), "food under an obstacle");
        }
        None => assert_eq!(snapshot.phase, GamePhase::Won),
    }

    assert_eq!(snapshot.score % SCORE_PER_FOOD, 0);
    let eaten = snapshot.score / SCORE_PER_FOOD;
    assert_eq!(snapshot.snake.len(), eaten as usize + 1);
    assert_eq!(
        snapshot.level,
        Level::new(1 + snapshot.score / LEVEL_UP_SCORE_INTERVAL)
    );
    assert_eq!(
        snapshot.tick_interval,
        tick_interval_for_level(snapshot.level)
    );
}

#[test]
fn random_play_preserves_board_invariants() {
    let mut state = GameState::new(Config::new(GridSize::new(8, 6), 42));
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut events = Vec::new();
    let mut runs = 0;

    world::apply(&mut state, Command::Start, &mut events);
    for _ in 0..5_000 {
        if rng.gen_bool(0.3) {
            let direction = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            world::apply(
                &mut state,
                Command::ChangeDirection { direction },
                &mut events,
            );
        }

        let before = query::snake_len(&state);
        world::apply(&mut state, Command::Step, &mut events);
        let snapshot = query::snapshot(&state);
        assert_board_is_consistent(&snapshot);

        match snapshot.phase {
            GamePhase::Running => assert!(snapshot.snake.len() - before <= 1),
            GamePhase::GameOver | GamePhase::Won => {
                runs += 1;
                world::apply(&mut state, Command::Restart, &mut events);
                assert_board_is_consistent(&query::snapshot(&state));
                world::apply(&mut state, Command::Start, &mut events);
            }
            phase => panic!("unexpected phase {phase:?} during play"),
        }
        events.clear();
    }

    assert!(runs > 0, "random play never ended a run");
}
