//! Tick pipeline and subsystem lifecycle
//!
//! Every tick runs the same fixed sequence:
//! pre-tick hooks -> movement/food/effects -> post-tick hooks.
//! Subsystems only see the shared [`GameState`] and the [`TickContext`];
//! none of them reaches into another's fields.

use super::collision::CollisionDetector;
use super::notify::EventLog;
use super::progression::LevelProgression;
use super::state::{GameEvent, GameState};
use super::tick;
use crate::platform::RandomSource;
use crate::tuning::GameTuning;

/// Per-tick inputs shared by the core and every hook
pub struct TickContext<'a> {
    pub now_ms: u64,
    pub tuning: &'a GameTuning,
    pub rng: &'a mut dyn RandomSource,
    /// Events raised so far this tick, in order
    pub events: Vec<GameEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(now_ms: u64, tuning: &'a GameTuning, rng: &'a mut dyn RandomSource) -> Self {
        Self {
            now_ms,
            tuning,
            rng,
            events: Vec::new(),
        }
    }
}

/// Lifecycle contract; every hook defaults to a no-op
pub trait Subsystem {
    fn name(&self) -> &'static str;

    /// Called on registration and again after every reset
    fn init(&mut self, _state: &mut GameState) {}

    fn pre_tick(&mut self, _state: &mut GameState, _ctx: &mut TickContext<'_>) {}

    fn post_tick(&mut self, _state: &mut GameState, _ctx: &mut TickContext<'_>) {}

    /// Called once when the run becomes terminal
    fn on_terminal(&mut self, _state: &GameState) {}
}

/// Commits one queued direction before movement
#[derive(Debug, Default)]
pub struct InputResolver;

impl Subsystem for InputResolver {
    fn name(&self) -> &'static str {
        "input"
    }

    fn pre_tick(&mut self, state: &mut GameState, ctx: &mut TickContext<'_>) {
        if let Some(dir) = state.input.resolve() {
            log::debug!("Direction committed: {dir:?}");
            ctx.events.push(GameEvent::DirectionCommitted(dir));
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Tick number within the run (0 when nothing ran)
    pub tick: u64,
    /// Items eaten this tick
    pub eaten: usize,
    /// The run is over after this tick
    pub terminal: bool,
    pub events: Vec<GameEvent>,
}

/// Ordered list of subsystems around the fixed tick core
#[derive(Default)]
pub struct Pipeline {
    subsystems: Vec<Box<dyn Subsystem>>,
}

impl Pipeline {
    /// Empty pipeline: ticks only move, eat and expire effects
    pub fn new() -> Self {
        Self::default()
    }

    /// Input resolution, collision, progression and event logging
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.subsystems.push(Box::new(InputResolver));
        pipeline.subsystems.push(Box::new(CollisionDetector::new()));
        pipeline.subsystems.push(Box::new(LevelProgression));
        pipeline.subsystems.push(Box::new(EventLog));
        pipeline
    }

    /// Append a subsystem and initialise it against the current state
    pub fn register(&mut self, mut subsystem: Box<dyn Subsystem>, state: &mut GameState) {
        log::debug!("Registering subsystem '{}'", subsystem.name());
        subsystem.init(state);
        self.subsystems.push(subsystem);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|s| s.name()).collect()
    }

    pub fn init_all(&mut self, state: &mut GameState) {
        for subsystem in &mut self.subsystems {
            subsystem.init(state);
        }
    }

    /// Run one tick; a terminal state is left untouched
    pub fn run_tick(
        &mut self,
        state: &mut GameState,
        now_ms: u64,
        tuning: &GameTuning,
        rng: &mut dyn RandomSource,
    ) -> TickReport {
        if state.terminal {
            return TickReport {
                terminal: true,
                ..TickReport::default()
            };
        }

        let mut ctx = TickContext::new(now_ms, tuning, rng);
        for subsystem in &mut self.subsystems {
            subsystem.pre_tick(state, &mut ctx);
        }

        state.ticks += 1;
        let eaten = tick::tick(state, &mut ctx);

        for subsystem in &mut self.subsystems {
            subsystem.post_tick(state, &mut ctx);
        }

        TickReport {
            tick: state.ticks,
            eaten,
            terminal: state.terminal,
            events: ctx.events,
        }
    }

    pub fn notify_terminal(&mut self, state: &GameState) {
        for subsystem in &mut self.subsystems {
            subsystem.on_terminal(state);
        }
    }
}
