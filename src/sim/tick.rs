//! Fixed core of a simulation tick
//!
//! Movement (with food consumption) followed by the effect expiry pass.
//! Hooks run around this in [`Pipeline::run_tick`](super::Pipeline::run_tick).

use super::movement;
use super::pipeline::TickContext;
use super::state::{GameEvent, GameState};

/// Move, eat and expire effects; returns how many items were eaten
pub fn tick(state: &mut GameState, ctx: &mut TickContext<'_>) -> usize {
    let len_before = state.snake.len();
    let eaten = movement::step(state, ctx);
    debug_assert_eq!(
        state.snake.len(),
        len_before + usize::from(eaten > 0),
        "snake length must grow by one exactly when food was eaten"
    );

    for kind in state.effects.expire(ctx.now_ms) {
        log::debug!("{kind:?} expired");
        ctx.events.push(GameEvent::EffectExpired(kind));
    }
    eaten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::seeded_rng;
    use crate::sim::effects::EffectKind;
    use crate::sim::input::Direction;
    use crate::tuning::GameTuning;

    #[test]
    fn test_tick_expires_glow() {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(12345);
        let mut state = GameState::new(&tuning, &mut rng, 0);
        state.food.clear();
        state.effects.glow.start(0, 100);

        let mut ctx = TickContext::new(50, &tuning, &mut rng);
        tick(&mut state, &mut ctx);
        assert!(state.effects.glow.active);

        let mut ctx = TickContext::new(101, &tuning, &mut rng);
        tick(&mut state, &mut ctx);
        assert!(!state.effects.glow.active);
        assert_eq!(ctx.events, vec![GameEvent::EffectExpired(EffectKind::Glow)]);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed and inputs should produce identical results
        let tuning = GameTuning::default();
        let mut rng1 = seeded_rng(99999);
        let mut rng2 = seeded_rng(99999);
        let mut state1 = GameState::new(&tuning, &mut rng1, 0);
        let mut state2 = GameState::new(&tuning, &mut rng2, 0);

        for (i, dir) in [Direction::Up, Direction::Left, Direction::Down]
            .into_iter()
            .enumerate()
        {
            for state in [&mut state1, &mut state2] {
                state.input.direction = dir;
            }
            let now = i as u64 * 150;
            tick(&mut state1, &mut TickContext::new(now, &tuning, &mut rng1));
            tick(&mut state2, &mut TickContext::new(now, &tuning, &mut rng2));
        }

        assert_eq!(state1, state2);
    }
}
