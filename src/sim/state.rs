//! Game state and core simulation types
//!
//! The whole mutable snapshot of a run lives here. It is rebuilt from
//! scratch on every reset and serializable for rendering collaborators.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::effects::{EffectKind, EffectState};
use super::food::{self, FoodItem, FoodKind};
use super::input::{Direction, InputQueue};
use crate::platform::RandomSource;
use crate::tuning::GameTuning;

/// Grid cell coordinates
pub type Position = IVec2;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Wall,
    SelfBite,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DirectionCommitted(Direction),
    FoodEaten {
        kind: FoodKind,
        position: Position,
        /// Score change caused by this item
        score_delta: i64,
    },
    FoodSpawned {
        kind: FoodKind,
        position: Position,
        bonus: bool,
    },
    ComboStarted { remaining: u32 },
    ComboExtended { added: u32, remaining: u32 },
    ComboFinished,
    ScoreMultiplied { factor: i64 },
    HubrisResolved { multiplier: f64, points: i64 },
    EffectStarted(EffectKind),
    EffectExpired(EffectKind),
    LevelUp { level: u32, base_speed_ms: u32 },
    Collision(CollisionKind),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Body cells, head first
    pub snake: VecDeque<Position>,
    pub input: InputQueue,
    pub score: i64,
    /// Current level in `[1, level_max]`
    pub level: u32,
    /// Interval floor that shrinks on level-up
    pub base_speed_ms: u32,
    /// Interval used to schedule the next tick
    pub current_speed_ms: u32,
    /// Consumptions since the last level-up
    pub consumption_counter: u32,
    /// Primary item plus at most one bonus
    pub food: Vec<FoodItem>,
    pub effects: EffectState,
    pub terminal: bool,
    /// Ticks processed this run
    pub ticks: u64,
}

impl GameState {
    /// Fresh run: one-cell snake at rest, first food placed
    pub fn new(tuning: &GameTuning, rng: &mut dyn RandomSource, now_ms: u64) -> Self {
        let snake = VecDeque::from([tuning.initial_pos]);
        let food = food::generate(tuning, rng, &snake, 1, true, now_ms);

        Self {
            snake,
            input: InputQueue::default(),
            score: 0,
            level: 1,
            base_speed_ms: tuning.base_speed_ms,
            current_speed_ms: tuning.base_speed_ms,
            consumption_counter: 0,
            food,
            effects: EffectState::default(),
            terminal: false,
            ticks: 0,
        }
    }

    /// Snake head
    ///
    /// # Panics
    /// If the snake is empty, which no tick can produce.
    pub fn head(&self) -> Position {
        assert!(!self.snake.is_empty(), "snake must never be empty");
        self.snake[0]
    }

    pub fn direction(&self) -> Direction {
        self.input.direction
    }

    /// Whether any body cell (head included) occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    /// JSON snapshot for rendering collaborators
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::seeded_rng;

    #[test]
    fn test_new_state() {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(1);
        let state = GameState::new(&tuning, &mut rng, 0);

        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert_eq!(state.direction(), Direction::None);
        assert_eq!(state.level, 1);
        assert_eq!(state.current_speed_ms, tuning.base_speed_ms);
        assert!(!state.terminal);
        assert!(!state.food.is_empty() && state.food.len() <= 2);
        assert!(state.food.iter().all(|f| !state.occupies(f.position)));
    }

    #[test]
    fn test_first_food_never_excluded_kind() {
        let tuning = GameTuning::default();
        for seed in 0..200 {
            let mut rng = seeded_rng(seed);
            let state = GameState::new(&tuning, &mut rng, 0);
            let primary = &state.food[0];
            assert!(!tuning.food.never_first.contains(&primary.kind));
        }
    }

    #[test]
    fn test_snapshot_json() {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(3);
        let state = GameState::new(&tuning, &mut rng, 0);
        let json = state.to_json().expect("serializable");
        let back: GameState = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, state);
    }

    #[test]
    #[should_panic(expected = "snake must never be empty")]
    fn test_empty_snake_panics() {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(3);
        let mut state = GameState::new(&tuning, &mut rng, 0);
        state.snake.clear();
        let _ = state.head();
    }
}
