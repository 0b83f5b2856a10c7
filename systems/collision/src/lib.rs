#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure collision classification for proposed snake head moves.

use grid_snake_core::{Cell, GridSize, MoveOutcome};

/// Classifies the outcome of moving the snake's head into `proposed_head`.
///
/// `body` must contain the cells the snake keeps occupying during this tick:
/// the full body when the snake is about to eat, or the body without its tail
/// otherwise, because the tail vacates its cell as the head advances. Walls are
/// checked first, then the body, then the obstacles.
pub fn classify<'a, B, O>(
    proposed_head: Cell,
    body: B,
    obstacles: O,
    grid: GridSize,
) -> MoveOutcome
where
    B: IntoIterator<Item = &'a Cell>,
    O: IntoIterator<Item = &'a Cell>,
{
    if !grid.contains(proposed_head) {
        return MoveOutcome::WallHit;
    }

    if body.into_iter().any(|cell| *cell == proposed_head) {
        return MoveOutcome::SelfHit;
    }

    if obstacles.into_iter().any(|cell| *cell == proposed_head) {
        return MoveOutcome::ObstacleHit;
    }

    MoveOutcome::Ok
}
