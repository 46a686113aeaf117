//! Event reporting hooks
//!
//! The core never renders or shows messages itself. These subsystems turn
//! tick events into log lines or hand them to a UI callback.

use super::effects::EffectKind;
use super::pipeline::{Subsystem, TickContext};
use super::state::{GameEvent, GameState};

/// Logs every tick event; register last so it sees all of them
#[derive(Debug, Default)]
pub struct EventLog;

impl EventLog {
    fn log(event: &GameEvent) {
        match event {
            GameEvent::ComboStarted { remaining } => {
                log::info!("DOUBLE POINTS! ({remaining} charges)")
            }
            GameEvent::ComboExtended { added, remaining } => {
                log::info!("+{added} combo! Total: {remaining}")
            }
            GameEvent::ComboFinished => log::info!("Combo finished"),
            GameEvent::ScoreMultiplied { factor: 2 } => log::info!("SCORE DOUBLED!"),
            GameEvent::ScoreMultiplied { factor: 3 } => log::info!("SCORE TRIPLED!"),
            GameEvent::ScoreMultiplied { factor } => log::info!("Score x{factor}"),
            GameEvent::HubrisResolved { multiplier, points } if *multiplier > 0.0 => {
                log::info!("{multiplier:.1}x HUBRIS! ({points:+})")
            }
            GameEvent::HubrisResolved { multiplier, points } => {
                log::info!("{:.1}x PENALTY! ({points:+})", multiplier.abs())
            }
            GameEvent::EffectStarted(EffectKind::Glow) => log::info!("GOLDEN GLOW!"),
            GameEvent::EffectStarted(EffectKind::PaletteCycle) => {
                log::info!("GLITCH MODE ACTIVATED!")
            }
            other => log::debug!("{other:?}"),
        }
    }
}

impl Subsystem for EventLog {
    fn name(&self) -> &'static str {
        "event-log"
    }

    fn init(&mut self, state: &mut GameState) {
        log::debug!("New run, first food: {:?}", state.food.first().map(|f| f.kind));
    }

    fn post_tick(&mut self, _state: &mut GameState, ctx: &mut TickContext<'_>) {
        ctx.events.iter().for_each(Self::log);
    }

    fn on_terminal(&mut self, state: &GameState) {
        log::info!(
            "Game over: score {} level {} length {}",
            state.score,
            state.level,
            state.snake.len()
        );
    }
}

type EventFn = Box<dyn FnMut(&GameEvent)>;
type TerminalFn = Box<dyn FnMut(&GameState)>;

/// Forwards events and the terminal transition to UI callbacks
#[derive(Default)]
pub struct Notifier {
    on_event: Option<EventFn>,
    on_game_over: Option<TerminalFn>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(mut self, f: impl FnMut(&GameEvent) + 'static) -> Self {
        self.on_event = Some(Box::new(f));
        self
    }

    pub fn on_game_over(mut self, f: impl FnMut(&GameState) + 'static) -> Self {
        self.on_game_over = Some(Box::new(f));
        self
    }
}

impl Subsystem for Notifier {
    fn name(&self) -> &'static str {
        "notifier"
    }

    fn post_tick(&mut self, _state: &mut GameState, ctx: &mut TickContext<'_>) {
        if let Some(f) = self.on_event.as_mut() {
            ctx.events.iter().for_each(|e| f(e));
        }
    }

    fn on_terminal(&mut self, state: &GameState) {
        if let Some(f) = self.on_game_over.as_mut() {
            f(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::seeded_rng;
    use crate::tuning::GameTuning;

    #[test]
    fn test_notifier_forwards() {
        let tuning = GameTuning::default();
        let mut rng = seeded_rng(1);
        let mut state = GameState::new(&tuning, &mut rng, 0);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let ended = Rc::new(RefCell::new(None));
        let mut notifier = {
            let seen = Rc::clone(&seen);
            let ended = Rc::clone(&ended);
            Notifier::new()
                .on_event(move |e| seen.borrow_mut().push(e.clone()))
                .on_game_over(move |s| *ended.borrow_mut() = Some(s.score))
        };

        let mut ctx = TickContext::new(0, &tuning, &mut rng);
        ctx.events.push(GameEvent::ComboFinished);
        notifier.post_tick(&mut state, &mut ctx);
        state.score = 42;
        Subsystem::on_terminal(&mut notifier, &state);

        assert_eq!(*seen.borrow(), vec![GameEvent::ComboFinished]);
        assert_eq!(*ended.borrow(), Some(42));
    }
}
