//! Level and speed progression

use super::pipeline::{Subsystem, TickContext};
use super::state::{GameEvent, GameState};
use crate::tuning::GameTuning;

/// Recompute the tick interval and level up every `speed_interval` consumptions
///
/// Returns the new level only when it actually rose; at `level_max` the
/// base speed still steps down but nothing is reported.
pub fn advance(state: &mut GameState, tuning: &GameTuning) -> Option<u32> {
    let ramp = state.level.saturating_mul(tuning.speed_step_ms);
    state.current_speed_ms = state
        .base_speed_ms
        .saturating_sub(ramp)
        .max(tuning.min_speed_ms);

    if state.consumption_counter < tuning.speed_interval {
        return None;
    }
    state.base_speed_ms = state
        .base_speed_ms
        .saturating_sub(tuning.speed_step_ms)
        .max(tuning.min_speed_ms);
    let before = state.level;
    state.level = (state.level + 1).min(tuning.level_max);
    state.consumption_counter = 0;
    (state.level > before).then_some(state.level)
}

/// Post-tick hook wrapping [`advance`]
#[derive(Debug, Default)]
pub struct LevelProgression;

impl Subsystem for LevelProgression {
    fn name(&self) -> &'static str {
        "progression"
    }

    fn post_tick(&mut self, state: &mut GameState, ctx: &mut TickContext<'_>) {
        if state.terminal {
            return;
        }
        if let Some(level) = advance(state, ctx.tuning) {
            log::info!("Level {level} (base speed {}ms)", state.base_speed_ms);
            ctx.events.push(GameEvent::LevelUp {
                level,
                base_speed_ms: state.base_speed_ms,
            });
        }
    }
}
