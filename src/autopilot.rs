//! Idle/demo steering
//!
//! Greedy: head for the closest food, never reverse, and avoid cells that
//! would end the run on the next step when there is any alternative.

use crate::sim::{Direction, GameState, Position};

/// Manhattan distance between two cells
fn manhattan(a: Position, b: Position) -> i32 {
    (a - b).abs().element_sum()
}

/// Whether stepping onto `cell` survives the next tick
fn is_safe(state: &GameState, grid_size: i32, cell: Position) -> bool {
    let inside = (0..grid_size).contains(&cell.x) && (0..grid_size).contains(&cell.y);
    if !inside {
        return false;
    }
    // The tail moves away this tick unless we eat, so ignore it
    let body = state.snake.len().saturating_sub(1);
    !state.snake.iter().take(body).any(|&p| p == cell)
}

/// Pick the intent for the next tick
pub fn steer(state: &GameState, grid_size: i32) -> Option<Direction> {
    let head = state.head();
    let target = state
        .food
        .iter()
        .map(|f| f.position)
        .min_by_key(|&p| manhattan(head, p))?;

    let current = state.input.last_committed;
    Direction::CARDINALS
        .into_iter()
        .filter(|&d| d != current.opposite())
        .filter(|&d| is_safe(state, grid_size, head + d.delta()))
        .min_by_key(|&d| (manhattan(head + d.delta(), target), d != current))
}
