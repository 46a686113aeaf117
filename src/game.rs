//! Composition root
//!
//! [`Game`] owns the state, the subsystem pipeline, the scheduler and the
//! injected clock and random source. Collaborators push intents and poll;
//! they only ever get read access to the state.

use crate::platform::{Clock, RandomSource};
use crate::sim::{
    Direction, GameState, Phase, Pipeline, Scheduler, Subsystem, TickReport,
};
use crate::tuning::GameTuning;

/// A single-threaded, self-rescheduling game session
pub struct Game {
    tuning: GameTuning,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    state: GameState,
    pipeline: Pipeline,
    scheduler: Scheduler,
}

impl Game {
    /// Session with the standard pipeline
    pub fn new(
        tuning: GameTuning,
        clock: impl Clock + 'static,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self::with_pipeline(tuning, clock, rng, Pipeline::standard())
    }

    pub fn with_pipeline(
        tuning: GameTuning,
        clock: impl Clock + 'static,
        rng: impl RandomSource + 'static,
        mut pipeline: Pipeline,
    ) -> Self {
        let clock: Box<dyn Clock> = Box::new(clock);
        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let mut state = GameState::new(&tuning, rng.as_mut(), clock.now_ms());
        pipeline.init_all(&mut state);

        Self {
            tuning,
            clock,
            rng,
            state,
            pipeline,
            scheduler: Scheduler::new(),
        }
    }

    /// Add a subsystem after the standard ones
    pub fn register(&mut self, subsystem: impl Subsystem + 'static) {
        self.pipeline.register(Box::new(subsystem), &mut self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    /// When the next tick is due, if one is scheduled
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.pending().map(|h| h.deadline_ms())
    }

    /// Buffer a directional intent for the next tick
    pub fn push_direction(&mut self, dir: Direction) -> bool {
        if self.state.terminal {
            return false;
        }
        self.state.input.push(dir)
    }

    /// Buffer a raw key; unknown keys are dropped
    pub fn push_key(&mut self, key: &str) -> bool {
        Direction::from_key(key).is_some_and(|dir| self.push_direction(dir))
    }

    /// Idle -> Running, running the first tick immediately
    pub fn start(&mut self) -> Option<TickReport> {
        if !self.scheduler.begin() {
            return None;
        }
        log::info!("Game started");
        self.scheduler.schedule(self.clock.now_ms(), 0);
        self.poll()
    }

    /// Fire the pending tick if it is due
    pub fn poll(&mut self) -> Option<TickReport> {
        let now = self.clock.now_ms();
        self.scheduler.take_due(now)?;

        let report = self
            .pipeline
            .run_tick(&mut self.state, now, &self.tuning, self.rng.as_mut());

        if report.terminal {
            self.scheduler.finish();
            self.pipeline.notify_terminal(&self.state);
        } else {
            self.scheduler
                .schedule(now, u64::from(self.state.current_speed_ms));
        }
        Some(report)
    }

    /// Cancel the pending tick, rebuild the state and start over
    pub fn reset(&mut self) -> Option<TickReport> {
        self.scheduler.restart();
        let now = self.clock.now_ms();
        self.state = GameState::new(&self.tuning, self.rng.as_mut(), now);
        self.pipeline.init_all(&mut self.state);
        log::info!("Game reset");
        self.scheduler.schedule(now, 0);
        self.poll()
    }

    /// Drive the session until it ends
    ///
    /// `steer` is asked for an intent before every tick; `wait` blocks for the
    /// given number of milliseconds until the next tick is due. Returns the
    /// final score.
    pub fn run(
        &mut self,
        mut steer: impl FnMut(&GameState) -> Option<Direction>,
        mut wait: impl FnMut(u64),
    ) -> i64 {
        if self.phase() == Phase::Idle {
            self.start();
        }
        while self.phase() == Phase::Running {
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let now = self.clock.now_ms();
            if now < deadline {
                wait(deadline - now);
                continue;
            }
            if let Some(dir) = steer(&self.state) {
                self.push_direction(dir);
            }
            self.poll();
        }
        self.state.score
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::{ManualClock, seeded_rng};
    use crate::sim::{GameEvent, Notifier, TickContext};

    /// Counts every tick as a full interval of meals
    struct Feeder;

    impl Subsystem for Feeder {
        fn name(&self) -> &'static str {
            "feeder"
        }

        fn pre_tick(&mut self, state: &mut GameState, ctx: &mut TickContext<'_>) {
            state.consumption_counter = ctx.tuning.speed_interval;
        }
    }

    fn game_at(clock: &ManualClock) -> Game {
        Game::new(GameTuning::default(), clock.clone(), seeded_rng(7))
    }

    #[test]
    fn test_start_runs_first_tick() {
        let clock = ManualClock::new(1000);
        let mut game = game_at(&clock);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.poll(), None);

        let report = game.start().expect("first tick");
        assert_eq!(report.tick, 1);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.next_deadline(), Some(1000 + 140));
        assert!(game.start().is_none());
    }

    #[test]
    fn test_poll_waits_for_deadline() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        game.start();
        clock.advance(139);
        assert!(game.poll().is_none());
        clock.advance(1);
        assert_eq!(game.poll().map(|r| r.tick), Some(2));
        // Only one tick per deadline, however late the poll is
        clock.advance(10_000);
        assert!(game.poll().is_some());
        assert!(game.poll().is_none());
    }

    #[test]
    fn test_game_over_notifies_once() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        let endings = Rc::new(Cell::new(0));
        {
            let endings = Rc::clone(&endings);
            game.register(
                Notifier::new().on_game_over(move |_| endings.set(endings.get() + 1)),
            );
        }
        game.start();
        game.push_direction(Direction::Left);

        let mut collided = 0;
        for _ in 0..30 {
            clock.advance(200);
            if let Some(report) = game.poll() {
                collided += report
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Collision(_)))
                    .count();
            }
        }
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.state().terminal);
        assert_eq!(collided, 1);
        assert_eq!(endings.get(), 1);
        assert_eq!(game.next_deadline(), None);
        assert!(!game.push_direction(Direction::Up));
    }

    #[test]
    fn test_reset_replaces_pending_timer() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        game.start();
        game.push_direction(Direction::Up);
        clock.advance(140);
        game.poll();

        clock.advance(20);
        let report = game.reset().expect("reset tick");
        assert_eq!(report.tick, 1);
        assert_eq!(game.state().ticks, 1);
        assert_eq!(game.state().snake.len(), 1);
        assert_eq!(game.state().direction(), Direction::None);
        assert_eq!(game.next_deadline(), Some(160 + 140));

        // The pre-reset deadline (280) no longer fires anything extra
        clock.set(280);
        assert!(game.poll().is_none());
    }

    #[test]
    fn test_reset_after_game_over() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        game.start();
        game.push_key("ArrowRight");
        for _ in 0..20 {
            clock.advance(200);
            game.poll();
        }
        assert_eq!(game.phase(), Phase::GameOver);
        game.reset();
        assert_eq!(game.phase(), Phase::Running);
        assert!(!game.state().terminal);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_push_key_drops_unknown() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        assert!(!game.push_key("Escape"));
        assert!(game.push_key("w"));
        assert_eq!(game.state().input.pending, vec![Direction::Up]);
    }

    #[test]
    fn test_run_until_wall() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        let waiter = clock.clone();
        let score = game.run(|_| Some(Direction::Down), |ms| waiter.advance(ms));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(score, game.state().score);
        assert_eq!(game.state().head(), glam::IVec2::new(10, 20));
    }

    #[test]
    fn test_interval_follows_progression() {
        let clock = ManualClock::new(0);
        let mut game = game_at(&clock);
        game.register(Feeder);
        game.start();

        let mut intervals = Vec::new();
        for _ in 0..8 {
            let deadline = game.next_deadline().expect("scheduled");
            intervals.push(deadline - clock.now_ms());
            clock.set(deadline);
            game.poll().expect("due tick");
        }
        assert_eq!(intervals, [140, 120, 100, 80, 70, 70, 70, 70]);
        assert_eq!(game.state().level, game.tuning().level_max);
        assert!(intervals.iter().all(|&ms| ms >= u64::from(game.tuning().min_speed_ms)));
    }
}
