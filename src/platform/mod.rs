//! Platform abstraction layer
//!
//! Everything the simulation consumes from the outside world:
//! - Time (`now()` in milliseconds)
//! - Randomness (`uniform()` in `[0, 1)`)
//!
//! Both are injected so tests can drive elapsed time and dice rolls directly.

pub mod random;
pub mod time;

pub use random::{RandomSource, ScriptedRandom, seeded_rng};
pub use time::{Clock, ManualClock, SystemClock};
