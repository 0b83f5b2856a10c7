#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Grid Snake.
//!
//! [`GameState`] owns the snake, food, obstacles, score, level, tick interval
//! and phase of a single session. It is mutated exclusively through [`apply`],
//! which reports every transition as an [`Event`]. Collision outcomes never
//! surface as errors: they are phase transitions.

mod layout;

use std::{
    collections::{HashSet, VecDeque},
    time::Duration,
};

use grid_snake_core::{
    obstacle_count_for_level, tick_interval_for_level, Cell, Command, Direction, Event,
    GamePhase, GridSize, Level, LEVEL_UP_SCORE_INTERVAL, MAX_OBSTACLES, SCORE_PER_FOOD,
    WELCOME_BANNER,
};
use grid_snake_system_collision::classify;
use grid_snake_system_placement::RandomPlacer;
use tracing::{debug, info, warn};

pub use self::layout::{BoardLayout, LayoutError};

/// Smallest grid able to hold a snake next to its food.
pub const MIN_GRID_CELLS: usize = 2;

const DEFAULT_RNG_SEED: u64 = 0x6a09_e667_f3bc_c908;

/// Configuration parameters required to construct a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid: GridSize,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration for the provided grid and placement seed.
    #[must_use]
    pub const fn new(grid: GridSize, rng_seed: u64) -> Self {
        Self { grid, rng_seed }
    }

    /// Grid the session is played on.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Seed driving food and obstacle placement.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(GridSize::default(), DEFAULT_RNG_SEED)
    }
}

/// Represents the authoritative state of a Grid Snake session.
#[derive(Clone, Debug)]
pub struct GameState {
    banner: &'static str,
    grid: GridSize,
    snake: VecDeque<Cell>,
    food: Option<Cell>,
    obstacles: Vec<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    level: Level,
    tick_interval: Duration,
    phase: GamePhase,
    placer: RandomPlacer,
    tick_index: u64,
}

impl GameState {
    /// Creates a session holding a fresh level one board ready to start.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut state = Self::empty(config.grid, config.rng_seed);
        state.rebuild_board(Level::FIRST);
        state
    }

    /// Creates a session from an explicit board that is ready to start.
    ///
    /// Food is placed randomly when the layout does not pin it.
    pub fn from_layout(layout: BoardLayout, rng_seed: u64) -> Result<Self, LayoutError> {
        layout.validate()?;

        let mut state = Self::empty(layout.grid, rng_seed);
        state.snake = layout.snake.into_iter().collect();
        state.direction = layout.direction;
        state.obstacles = layout.obstacles;
        state.score = layout.score;
        state.level = layout.level;
        state.tick_interval = tick_interval_for_level(layout.level);
        match layout.food {
            Some(food) => state.food = Some(food),
            None => state.place_food(),
        }
        Ok(state)
    }

    fn empty(grid: GridSize, rng_seed: u64) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid,
            snake: VecDeque::new(),
            food: None,
            obstacles: Vec::new(),
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
            level: Level::FIRST,
            tick_interval: tick_interval_for_level(Level::FIRST),
            phase: GamePhase::Ready,
            placer: RandomPlacer::new(rng_seed),
            tick_index: 0,
        }
    }

    fn rebuild_board(&mut self, level: Level) {
        self.snake.clear();
        self.snake.push_back(self.grid.center());
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.level = level;
        self.tick_interval = tick_interval_for_level(level);
        self.phase = GamePhase::Ready;
        self.food = None;
        self.obstacles.clear();

        self.place_food();
        for _ in 0..obstacle_count_for_level(level) {
            if !self.place_obstacle() {
                break;
            }
        }

        info!(
            level = level.get(),
            obstacles = self.obstacles.len(),
            "built fresh board"
        );
    }

    fn blocked_cells(&self, include_food: bool) -> HashSet<Cell> {
        let mut blocked: HashSet<Cell> = self.snake.iter().copied().collect();
        blocked.extend(self.obstacles.iter().copied());
        if include_food {
            blocked.extend(self.food);
        }
        blocked
    }

    fn place_food(&mut self) {
        let blocked = self.blocked_cells(false);
        match self.placer.place(&blocked, self.grid) {
            Ok(cell) => self.food = Some(cell),
            Err(error) => {
                warn!(%error, "unable to place food");
                self.food = None;
            }
        }
    }

    fn place_obstacle(&mut self) -> bool {
        let blocked = self.blocked_cells(true);
        match self.placer.place(&blocked, self.grid) {
            Ok(cell) => {
                self.obstacles.push(cell);
                true
            }
            Err(error) => {
                warn!(%error, "unable to place obstacle");
                false
            }
        }
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            GamePhase::Running | GamePhase::Paused => return,
            GamePhase::Ready => {}
            GamePhase::GameOver => {
                self.rebuild_board(Level::FIRST);
                out_events.push(Event::BoardReset { level: self.level });
            }
            GamePhase::Won => {
                self.rebuild_board(self.level.next());
                out_events.push(Event::BoardReset { level: self.level });
            }
        }

        self.phase = GamePhase::Running;
        info!(level = self.level.get(), "game started");
        out_events.push(Event::Started {
            level: self.level,
            tick_interval: self.tick_interval,
        });
    }

    fn pause(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Running {
            return;
        }

        self.phase = GamePhase::Paused;
        info!("game paused");
        out_events.push(Event::Paused);
    }

    fn resume(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Paused {
            return;
        }

        self.phase = GamePhase::Running;
        info!("game resumed");
        out_events.push(Event::Resumed {
            tick_interval: self.tick_interval,
        });
    }

    fn change_direction(&mut self, direction: Direction) {
        if self.phase.is_terminal() {
            return;
        }

        self.pending_direction = Some(direction);
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.tick_index = self.tick_index.saturating_add(1);

        if let Some(requested) = self.pending_direction.take() {
            if requested.is_opposite(self.direction) {
                debug!(?requested, current = ?self.direction, "ignored reversal");
            } else {
                self.direction = requested;
            }
        }

        let Some(head) = self.snake.front().copied() else {
            return;
        };
        let proposed = head.neighbor(self.direction);
        let eating = self.food == Some(proposed);

        let retained = if eating {
            self.snake.len()
        } else {
            self.snake.len().saturating_sub(1)
        };
        let outcome = classify(
            proposed,
            self.snake.iter().take(retained),
            &self.obstacles,
            self.grid,
        );
        if let Some(reason) = outcome.hazard() {
            self.phase = GamePhase::GameOver;
            info!(?reason, score = self.score, tick = self.tick_index, "game over");
            out_events.push(Event::GameOver { reason });
            return;
        }

        self.snake.push_front(proposed);
        if !eating {
            let _ = self.snake.pop_back();
            out_events.push(Event::SnakeMoved {
                head: proposed,
                grew: false,
            });
            return;
        }

        self.score = self.score.saturating_add(SCORE_PER_FOOD);
        debug!(score = self.score, tick = self.tick_index, "food eaten");
        out_events.push(Event::SnakeMoved {
            head: proposed,
            grew: true,
        });
        out_events.push(Event::FoodEaten {
            cell: proposed,
            score: self.score,
        });

        if self.score > 0 && self.score % LEVEL_UP_SCORE_INTERVAL == 0 {
            self.level_up(out_events);
        }

        let free_cells = self.grid.cell_count().saturating_sub(self.obstacles.len());
        if self.snake.len() >= free_cells {
            self.food = None;
            self.phase = GamePhase::Won;
            info!(level = self.level.get(), score = self.score, "board cleared");
            out_events.push(Event::Won { level: self.level });
            return;
        }

        self.place_food();
    }

    fn level_up(&mut self, out_events: &mut Vec<Event>) {
        self.level = self.level.next();
        self.tick_interval = tick_interval_for_level(self.level);
        if self.obstacles.len() < MAX_OBSTACLES {
            let _ = self.place_obstacle();
        }

        info!(
            level = self.level.get(),
            tick_interval = ?self.tick_interval,
            "level up"
        );
        out_events.push(Event::LevelUp { level: self.level });
        out_events.push(Event::TickIntervalChanged {
            tick_interval: self.tick_interval,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Applies the provided command to the game state, mutating it deterministically.
pub fn apply(state: &mut GameState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid { size } => {
            if size.cell_count() < MIN_GRID_CELLS {
                warn!(
                    width = size.width(),
                    height = size.height(),
                    "ignored grid that cannot hold a snake and its food"
                );
                return;
            }
            state.grid = size;
            state.rebuild_board(Level::FIRST);
            out_events.push(Event::BoardReset { level: state.level });
        }
        Command::Start => state.start(out_events),
        Command::Pause => state.pause(out_events),
        Command::Resume => state.resume(out_events),
        Command::TogglePause => match state.phase {
            GamePhase::Running => state.pause(out_events),
            GamePhase::Paused => state.resume(out_events),
            _ => {}
        },
        Command::Restart => {
            state.rebuild_board(Level::FIRST);
            out_events.push(Event::BoardReset { level: state.level });
        }
        Command::ChangeDirection { direction } => state.change_direction(direction),
        Command::Step => state.step(out_events),
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use std::time::Duration;

    use super::GameState;
    use grid_snake_core::{Cell, Direction, GamePhase, GameSnapshot, GridSize, Level};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(state: &GameState) -> &'static str {
        state.banner
    }

    /// Captures an immutable snapshot of everything a renderer needs.
    #[must_use]
    pub fn snapshot(state: &GameState) -> GameSnapshot {
        GameSnapshot {
            grid: state.grid,
            snake: state.snake.iter().copied().collect(),
            food: state.food,
            obstacles: state.obstacles.clone(),
            direction: state.direction,
            phase: state.phase,
            score: state.score,
            level: state.level,
            tick_interval: state.tick_interval,
        }
    }

    /// Dimensions of the playing field.
    #[must_use]
    pub fn grid(state: &GameState) -> GridSize {
        state.grid
    }

    /// Current macro-state of the session.
    #[must_use]
    pub fn phase(state: &GameState) -> GamePhase {
        state.phase
    }

    /// Snake cells ordered from head to tail.
    pub fn snake(state: &GameState) -> impl Iterator<Item = Cell> + '_ {
        state.snake.iter().copied()
    }

    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn head(state: &GameState) -> Option<Cell> {
        state.snake.front().copied()
    }

    /// Number of cells the snake occupies.
    #[must_use]
    pub fn snake_len(state: &GameState) -> usize {
        state.snake.len()
    }

    /// Cell holding the food, if any.
    #[must_use]
    pub fn food(state: &GameState) -> Option<Cell> {
        state.food
    }

    /// Obstacle cells in placement order.
    #[must_use]
    pub fn obstacles(state: &GameState) -> &[Cell] {
        &state.obstacles
    }

    /// Direction the snake currently travels in.
    #[must_use]
    pub fn direction(state: &GameState) -> Direction {
        state.direction
    }

    /// Direction waiting to be committed on the next tick.
    #[must_use]
    pub fn pending_direction(state: &GameState) -> Option<Direction> {
        state.pending_direction
    }

    /// Points accumulated during the run.
    #[must_use]
    pub fn score(state: &GameState) -> u32 {
        state.score
    }

    /// Level being played.
    #[must_use]
    pub fn level(state: &GameState) -> Level {
        state.level
    }

    /// Interval between ticks at the current level.
    #[must_use]
    pub fn tick_interval(state: &GameState) -> Duration {
        state.tick_interval
    }

    /// Number of ticks executed since the session was created.
    #[must_use]
    pub fn tick_index(state: &GameState) -> u64 {
        state.tick_index
    }
}
