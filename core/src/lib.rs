#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game state, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems react to deterministically. Renderers never touch the world
//! directly; they consume a [`GameSnapshot`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Snake.";

/// Points awarded for every food item the snake consumes.
pub const SCORE_PER_FOOD: u32 = 10;

/// Score milestone that triggers a level-up whenever it divides the score.
pub const LEVEL_UP_SCORE_INTERVAL: u32 = 50;

/// Tick interval used on level one.
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Amount the tick interval shrinks with every level gained.
pub const TICK_INTERVAL_DECREMENT: Duration = Duration::from_millis(10);

/// Fastest tick interval the simulation will ever use.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on the number of obstacles present on a board.
pub const MAX_OBSTACLES: usize = 10;

/// Length of time the level-up announcement stays visible.
pub const LEVEL_UP_BANNER_DURATION: Duration = Duration::from_secs(2);

/// Computes the tick interval that applies once the provided level is reached.
///
/// Level one ticks every 150 ms and each further level removes 10 ms until the
/// 50 ms floor is hit.
#[must_use]
pub fn tick_interval_for_level(level: Level) -> Duration {
    let gained = level.get().saturating_sub(1);
    let reduction = TICK_INTERVAL_DECREMENT.saturating_mul(gained);
    BASE_TICK_INTERVAL
        .saturating_sub(reduction)
        .max(MIN_TICK_INTERVAL)
}

/// Number of obstacles seeded onto a fresh board built for the provided level.
#[must_use]
pub fn obstacle_count_for_level(level: Level) -> usize {
    usize::try_from(level.get()).map_or(MAX_OBSTACLES, |count| count.min(MAX_OBSTACLES))
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Replaces the grid dimensions and builds a fresh level one board.
    ConfigureGrid {
        /// Dimensions of the new grid.
        size: GridSize,
    },
    /// Starts the game, rebuilding the board first when the last run ended.
    Start,
    /// Suspends a running game.
    Pause,
    /// Continues a paused game.
    Resume,
    /// Pauses a running game or resumes a paused one.
    TogglePause,
    /// Discards the current board and builds a fresh level one board.
    Restart,
    /// Records the direction the snake should take on the next tick.
    ChangeDirection {
        /// Requested direction of travel.
        direction: Direction,
    },
    /// Advances the simulation by exactly one tick.
    Step,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that a fresh board was built and awaits a start request.
    BoardReset {
        /// Level the new board was built for.
        level: Level,
    },
    /// Announces that the game entered the running phase.
    Started {
        /// Level being played.
        level: Level,
        /// Interval at which ticks should be scheduled.
        tick_interval: Duration,
    },
    /// Announces that a running game was paused.
    Paused,
    /// Announces that a paused game continues.
    Resumed {
        /// Interval at which ticks should be scheduled.
        tick_interval: Duration,
    },
    /// Confirms that the snake advanced by one cell.
    SnakeMoved {
        /// Cell occupied by the head after the move.
        head: Cell,
        /// Indicates whether the snake kept its tail because it ate.
        grew: bool,
    },
    /// Reports that food was consumed.
    FoodEaten {
        /// Cell the food occupied.
        cell: Cell,
        /// Score after awarding the food.
        score: u32,
    },
    /// Announces that a score milestone raised the level.
    LevelUp {
        /// Level reached.
        level: Level,
    },
    /// Signals that ticks must be rescheduled at a new interval.
    TickIntervalChanged {
        /// Interval that applies from now on.
        tick_interval: Duration,
    },
    /// Announces that the run ended in a collision.
    GameOver {
        /// Hazard the snake ran into.
        reason: GameOverReason,
    },
    /// Announces that the snake filled every free cell.
    Won {
        /// Level that was cleared.
        level: Level,
    },
}

/// Location of a single grid cell.
///
/// Coordinates are signed so a proposed head that leaves the grid can still be
/// represented and classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the adjacent cell one step along the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Self::new(self.x, self.y.saturating_add(1)),
            Direction::Left => Self::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Self::new(self.x.saturating_add(1), self.y),
        }
    }
}

/// Dimensions of the playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a new grid size descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells on the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let cells = u64::from(self.width) * u64::from(self.height);
        usize::try_from(cells).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies within the grid bounds.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let inside_columns = u32::try_from(cell.x()).is_ok_and(|x| x < self.width);
        let inside_rows = u32::try_from(cell.y()).is_ok_and(|y| y < self.height);
        inside_columns && inside_rows
    }

    /// Cell at the centre of the grid, rounding towards the origin.
    #[must_use]
    pub fn center(&self) -> Cell {
        let x = i32::try_from(self.width / 2).unwrap_or(i32::MAX);
        let y = i32::try_from(self.height / 2).unwrap_or(i32::MAX);
        Cell::new(x, y)
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(20, 20)
    }
}

/// Cardinal directions the snake can travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` points the exact opposite way.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Macro-state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// A fresh board waits for the player to start.
    Ready,
    /// Ticks are being scheduled and the snake moves.
    Running,
    /// The run is suspended and no ticks execute.
    Paused,
    /// The snake collided with a hazard.
    GameOver,
    /// The snake filled every free cell of the board.
    Won,
}

impl GamePhase {
    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Hazard responsible for ending a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The head left the grid.
    WallHit,
    /// The head ran into the snake's own body.
    SelfHit,
    /// The head ran into an obstacle.
    ObstacleHit,
}

/// Classification of a proposed head move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The move is legal.
    Ok,
    /// The head would leave the grid.
    WallHit,
    /// The head would enter a cell the body keeps occupying.
    SelfHit,
    /// The head would enter an obstacle.
    ObstacleHit,
}

impl MoveOutcome {
    /// Maps a failed move onto the reason reported when the run ends.
    #[must_use]
    pub const fn hazard(self) -> Option<GameOverReason> {
        match self {
            Self::Ok => None,
            Self::WallHit => Some(GameOverReason::WallHit),
            Self::SelfHit => Some(GameOverReason::SelfHit),
            Self::ObstacleHit => Some(GameOverReason::ObstacleHit),
        }
    }
}

/// Player level, starting at one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    /// Level every new game starts on.
    pub const FIRST: Self = Self(1);

    /// Creates a level, clamping zero up to the first level.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Level reached after gaining one more.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Read-only snapshot of a game session consumed by renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Dimensions of the playing field.
    pub grid: GridSize,
    /// Snake cells ordered from head to tail.
    pub snake: Vec<Cell>,
    /// Cell holding the food, absent once the board has been won.
    pub food: Option<Cell>,
    /// Obstacle cells in placement order.
    pub obstacles: Vec<Cell>,
    /// Direction the snake currently travels in.
    pub direction: Direction,
    /// Current macro-state of the session.
    pub phase: GamePhase,
    /// Points accumulated during the run.
    pub score: u32,
    /// Level being played.
    pub level: Level,
    /// Interval between ticks at the current level.
    pub tick_interval: Duration,
}

impl GameSnapshot {
    /// Cell occupied by the snake's head.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}
