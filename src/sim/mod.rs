//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through the tick's `now_ms`
//! - Randomness only through the injected source
//! - One committed direction per tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod food;
pub mod input;
pub mod movement;
pub mod notify;
pub mod pipeline;
pub mod progression;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{CollisionDetector, detect};
pub use effects::{Combo, EffectKind, EffectState, TimedEffect};
pub use food::{FoodItem, FoodKind, FoodRule, decay_multiplier};
pub use input::{Direction, InputQueue};
pub use notify::{EventLog, Notifier};
pub use pipeline::{InputResolver, Pipeline, Subsystem, TickContext, TickReport};
pub use progression::LevelProgression;
pub use scheduler::{Phase, Scheduler, TimerHandle};
pub use state::{CollisionKind, GameEvent, GameState, Position};
pub use tick::tick;
