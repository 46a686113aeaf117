//! Snake movement

use super::food;
use super::pipeline::TickContext;
use super::state::GameState;

/// Advance the head one cell; grow if anything was eaten, else drop the tail
///
/// Runs even while the heading is `None`, which leaves a resting
/// one-cell snake in place. Returns how many items were eaten.
pub fn step(state: &mut GameState, ctx: &mut TickContext<'_>) -> usize {
    let head = state.head() + state.direction().delta();
    state.snake.push_front(head);

    let eaten = food::consume(state, head, ctx);
    if eaten == 0 {
        state.snake.pop_back();
    }
    eaten
}
