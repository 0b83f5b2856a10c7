//! Explicit board layouts used to resume scripted or recorded positions.

use std::collections::HashSet;

use grid_snake_core::{Cell, Direction, GridSize, Level, MAX_OBSTACLES, SCORE_PER_FOOD};
use thiserror::Error;

use crate::MIN_GRID_CELLS;

/// Complete description of a board that has not started yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    /// Dimensions of the playing field.
    pub grid: GridSize,
    /// Snake cells ordered from head to tail.
    pub snake: Vec<Cell>,
    /// Direction the snake travels in.
    pub direction: Direction,
    /// Food cell, placed randomly when absent.
    pub food: Option<Cell>,
    /// Obstacle cells in placement order.
    pub obstacles: Vec<Cell>,
    /// Score already accumulated.
    pub score: u32,
    /// Level being played.
    pub level: Level,
}

impl BoardLayout {
    /// Creates a level one layout holding only the provided snake.
    #[must_use]
    pub fn new(grid: GridSize, snake: Vec<Cell>) -> Self {
        Self {
            grid,
            snake,
            direction: Direction::Right,
            food: None,
            obstacles: Vec::new(),
            score: 0,
            level: Level::FIRST,
        }
    }

    /// Sets the direction of travel.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Pins the food to the provided cell.
    #[must_use]
    pub fn with_food(mut self, food: Cell) -> Self {
        self.food = Some(food);
        self
    }

    /// Replaces the obstacle set.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: Vec<Cell>) -> Self {
        self.obstacles = obstacles;
        self
    }

    /// Sets the accumulated score and level.
    #[must_use]
    pub fn with_progress(mut self, score: u32, level: Level) -> Self {
        self.score = score;
        self.level = level;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        if self.grid.cell_count() < MIN_GRID_CELLS {
            return Err(LayoutError::GridTooSmall { grid: self.grid });
        }
        if self.snake.is_empty() {
            return Err(LayoutError::EmptySnake);
        }
        if self.obstacles.len() > MAX_OBSTACLES {
            return Err(LayoutError::TooManyObstacles {
                count: self.obstacles.len(),
            });
        }
        if self.score % SCORE_PER_FOOD != 0 {
            return Err(LayoutError::UnalignedScore { score: self.score });
        }

        for pair in self.snake.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let distance = from.x().abs_diff(to.x()) + from.y().abs_diff(to.y());
            if distance != 1 {
                return Err(LayoutError::Disconnected { from, to });
            }
        }

        let mut seen: HashSet<Cell> = HashSet::new();
        let cells = self
            .snake
            .iter()
            .chain(self.obstacles.iter())
            .chain(self.food.iter());
        for cell in cells {
            if !self.grid.contains(*cell) {
                return Err(LayoutError::OutOfBounds { cell: *cell });
            }
            if !seen.insert(*cell) {
                return Err(LayoutError::Overlap { cell: *cell });
            }
        }

        Ok(())
    }
}

/// Reasons a board layout is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The grid cannot hold a snake and its food.
    #[error("a {}x{} grid is too small to play on", .grid.width(), .grid.height())]
    GridTooSmall {
        /// Rejected grid.
        grid: GridSize,
    },
    /// The snake has no cells.
    #[error("the snake needs at least one cell")]
    EmptySnake,
    /// More obstacles than a board ever holds.
    #[error("{count} obstacles exceed the cap of {}", MAX_OBSTACLES)]
    TooManyObstacles {
        /// Number of obstacles provided.
        count: usize,
    },
    /// The score is not a whole number of food items.
    #[error("score {score} is not a multiple of {}", SCORE_PER_FOOD)]
    UnalignedScore {
        /// Score provided.
        score: u32,
    },
    /// Two consecutive snake cells are not adjacent.
    #[error("snake cells {from:?} and {to:?} are not adjacent")]
    Disconnected {
        /// Cell closer to the head.
        from: Cell,
        /// Cell closer to the tail.
        to: Cell,
    },
    /// A cell lies outside the grid.
    #[error("cell {cell:?} lies outside the grid")]
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
    },
    /// A cell is claimed twice by the snake, obstacles or food.
    #[error("cell {cell:?} is occupied more than once")]
    Overlap {
        /// Offending cell.
        cell: Cell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSize {
        GridSize::new(8, 8)
    }

    #[test]
    fn accepts_a_consistent_layout() {
        let layout = BoardLayout::new(grid(), vec![Cell::new(3, 3), Cell::new(2, 3)])
            .with_food(Cell::new(6, 6))
            .with_obstacles(vec![Cell::new(0, 0)])
            .with_progress(40, Level::FIRST);

        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn rejects_food_on_the_snake() {
        let layout = BoardLayout::new(grid(), vec![Cell::new(3, 3)]).with_food(Cell::new(3, 3));

        assert_eq!(
            layout.validate(),
            Err(LayoutError::Overlap {
                cell: Cell::new(3, 3)
            })
        );
    }

    #[test]
    fn rejects_gaps_in_the_snake() {
        let layout = BoardLayout::new(grid(), vec![Cell::new(3, 3), Cell::new(5, 3)]);

        assert!(matches!(
            layout.validate(),
            Err(LayoutError::Disconnected { .. })
        ));
    }

    #[test]
    fn rejects_cells_outside_the_grid() {
        let layout = BoardLayout::new(grid(), vec![Cell::new(8, 0)]);

        assert_eq!(
            layout.validate(),
            Err(LayoutError::OutOfBounds {
                cell: Cell::new(8, 0)
            })
        );
    }

    #[test]
    fn rejects_partial_food_scores() {
        let layout =
            BoardLayout::new(grid(), vec![Cell::new(1, 1)]).with_progress(15, Level::FIRST);

        assert_eq!(
            layout.validate(),
            Err(LayoutError::UnalignedScore { score: 15 })
        );
    }
}
