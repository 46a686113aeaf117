//! Wall and self collision
//!
//! Runs after movement. The freshly prepended head is compared against the
//! rest of the body, so stepping into the cell the tail just left is legal.

use super::pipeline::{Subsystem, TickContext};
use super::state::{CollisionKind, GameEvent, GameState};

/// Classify the head position of a moved snake
pub fn detect(state: &GameState, grid_size: i32) -> Option<CollisionKind> {
    let head = state.head();
    let inside = (0..grid_size).contains(&head.x) && (0..grid_size).contains(&head.y);
    if !inside {
        return Some(CollisionKind::Wall);
    }
    if state.snake.iter().skip(1).any(|&p| p == head) {
        return Some(CollisionKind::SelfBite);
    }
    None
}

/// Latches the run into its terminal state on the first collision
#[derive(Debug, Default)]
pub struct CollisionDetector {
    tripped: bool,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports the collision only on the call that flips the game to terminal
    pub fn check(&mut self, state: &mut GameState, grid_size: i32) -> Option<CollisionKind> {
        if self.tripped || state.terminal {
            return None;
        }
        let kind = detect(state, grid_size)?;
        self.tripped = true;
        state.terminal = true;
        let head = state.head();
        log::info!(
            "Collision ({kind:?}) at ({}, {}) after {} ticks, score {}",
            head.x,
            head.y,
            state.ticks,
            state.score
        );
        Some(kind)
    }
}

impl Subsystem for CollisionDetector {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn init(&mut self, _state: &mut GameState) {
        self.tripped = false;
    }

    fn post_tick(&mut self, state: &mut GameState, ctx: &mut TickContext<'_>) {
        if let Some(kind) = self.check(state, ctx.tuning.grid_size) {
            ctx.events.push(GameEvent::Collision(kind));
        }
    }
}
