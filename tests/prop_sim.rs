//! Property-based tests for the tick engine.

use std::collections::VecDeque;

use glam::IVec2;
use proptest::prelude::*;

use grid_snake::GameTuning;
use grid_snake::autopilot;
use grid_snake::platform::seeded_rng;
use grid_snake::sim::food::generate;
use grid_snake::sim::{
    Direction, GameEvent, GameState, InputQueue, Pipeline, decay_multiplier,
};

const DIRS: [Direction; 5] = [
    Direction::None,
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Intent per tick: a raw direction, or `None` to let the autopilot pick
fn intents() -> impl Strategy<Value = Vec<Option<Direction>>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(None),
            2 => (0usize..5).prop_map(|i| Some(DIRS[i])),
        ],
        1..300,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Length grows by one exactly on ticks that eat; level and speed stay in bounds.
    #[test]
    fn prop_tick_invariants(seed in any::<u64>(), plan in intents()) {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(seed);
        let mut state = GameState::new(&tuning, &mut rng, 0);
        let mut pipeline = Pipeline::standard();
        pipeline.init_all(&mut state);

        let mut collisions = 0;
        let mut last_level = state.level;
        let mut now = 0;
        for intent in plan {
            let was_terminal = state.terminal;
            let len_before = state.snake.len();
            let intent = intent.or_else(|| autopilot::steer(&state, tuning.grid_size));
            if let Some(dir) = intent {
                state.input.push(dir);
            }

            now += u64::from(state.current_speed_ms);
            let report = pipeline.run_tick(&mut state, now, &tuning, &mut rng);
            collisions += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::Collision(_)))
                .count();

            if was_terminal {
                prop_assert_eq!(state.snake.len(), len_before);
                continue;
            }
            let grew = usize::from(report.eaten > 0);
            prop_assert_eq!(state.snake.len(), len_before + grew);
            prop_assert!(state.level >= last_level);
            prop_assert!(state.level <= tuning.level_max);
            prop_assert!(state.current_speed_ms >= tuning.min_speed_ms);
            prop_assert!(state.base_speed_ms >= tuning.min_speed_ms);
            last_level = state.level;
        }
        prop_assert!(collisions <= 1);
        prop_assert_eq!(collisions == 1, state.terminal);
    }

    /// A resolved direction never reverses the previous commitment.
    #[test]
    fn prop_no_reversal(bursts in prop::collection::vec(prop::collection::vec(0usize..5, 0..5), 1..100)) {
        let mut queue = InputQueue::default();
        for burst in bursts {
            let before = queue.last_committed;
            for i in burst {
                queue.push(DIRS[i]);
            }
            if let Some(dir) = queue.resolve() {
                prop_assert_ne!(dir, Direction::None);
                if before != Direction::None {
                    prop_assert_ne!(dir, before.opposite());
                }
                prop_assert_eq!(queue.last_committed, dir);
            } else {
                prop_assert_eq!(queue.last_committed, before);
            }
            prop_assert!(queue.pending.is_empty());
        }
    }

    /// Spawned food avoids the body and never stacks.
    #[test]
    fn prop_food_avoids_occupied(
        seed in any::<u64>(),
        cells in prop::collection::hash_set((0i32..20, 0i32..20), 1..300),
        level in 1u32..9,
    ) {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(seed);
        let occupied: VecDeque<IVec2> = cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect();

        let items = generate(&tuning, &mut rng, &occupied, level, false, 0);
        prop_assert!(!items.is_empty());
        for item in &items {
            prop_assert!(!occupied.contains(&item.position));
            prop_assert!(tuning.in_bounds(item.position));
        }
        if items.len() == 2 {
            prop_assert_ne!(items[0].position, items[1].position);
        }
    }

    /// Decay is non-increasing in age and floored.
    #[test]
    fn prop_decay_monotone(a in 0.0f64..60.0, b in 0.0f64..60.0, rate in 0.0f64..5.0) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let m_early = decay_multiplier(3.0, rate, -3.0, early);
        let m_late = decay_multiplier(3.0, rate, -3.0, late);
        prop_assert!(m_late <= m_early);
        prop_assert!(m_late >= -3.0);
        prop_assert!(m_early <= 3.0);
    }
}
