//! Food economy
//!
//! Spawning draws a primary kind from a cumulative probability table and
//! independently rolls for a bonus item. Eating applies the item's
//! [`FoodRule`]; several items under the head are all consumed in one tick.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::pipeline::TickContext;
use super::state::{GameEvent, GameState, Position};
use crate::platform::RandomSource;
use crate::tuning::{FoodTable, GameTuning};

/// Rejection-sampling attempts before falling back to a free-cell scan
const MAX_PLACEMENT_ATTEMPTS: u32 = 256;
/// Redraws allowed when the first spawn lands on an excluded kind
const MAX_FIRST_REDRAWS: u32 = 64;

/// Food catalog keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Apple,
    Cherry,
    GoldenApple,
    HubrisBerry,
    GlitchBerry,
}

impl FoodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Cherry => "cherry",
            FoodKind::GoldenApple => "golden_apple",
            FoodKind::HubrisBerry => "hubris_berry",
            FoodKind::GlitchBerry => "glitch_berry",
        }
    }
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What eating an item does, with exactly the data each rule needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FoodRule {
    /// `points * level`, doubled while a combo is active (spends a charge)
    Flat { points: i64 },
    /// Starts or extends a combo, plus `points * level`
    Combo { points: i64, charges: u32 },
    /// Doubles the score (triples and ends an active combo), starts glow
    Jackpot { glow_ms: u64 },
    /// `base_points` scaled by a multiplier that decays with item age
    Decaying {
        base_points: i64,
        base_multiplier: f64,
        /// Multiplier lost per second
        decay_rate: f64,
        floor: f64,
    },
    /// Starts the palette cycle; awards flat points if any
    Cosmetic { palette_ms: u64, points: i64 },
}

/// A food item on the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub kind: FoodKind,
    pub position: Position,
    pub spawn_ms: u64,
    pub color: String,
    pub rule: FoodRule,
    /// Spawned by the bonus roll rather than the primary draw
    pub bonus: bool,
}

/// Decaying-food multiplier after `elapsed_secs`, clamped to `floor`
pub fn decay_multiplier(base_multiplier: f64, decay_rate: f64, floor: f64, elapsed_secs: f64) -> f64 {
    (base_multiplier - decay_rate * elapsed_secs).max(floor)
}

/// Round half toward positive infinity
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Draw a primary kind from the cumulative table
pub fn draw_primary(table: &FoodTable, rng: &mut dyn RandomSource, is_first: bool) -> FoodKind {
    let draw = |rng: &mut dyn RandomSource| {
        let roll = rng.uniform();
        let mut cumulative = 0.0;
        for w in &table.weights {
            cumulative += w.weight;
            if roll < cumulative {
                return w.kind;
            }
        }
        table.fallback
    };

    let mut kind = draw(rng);
    if !is_first {
        return kind;
    }
    let mut redraws = 0;
    while table.never_first.contains(&kind) {
        if redraws == MAX_FIRST_REDRAWS {
            // Give up on luck and take the first allowed kind deterministically
            return table
                .weights
                .iter()
                .map(|w| w.kind)
                .chain(std::iter::once(table.fallback))
                .find(|k| !table.never_first.contains(k))
                .unwrap_or(table.fallback);
        }
        kind = draw(rng);
        redraws += 1;
    }
    kind
}

/// Pick a free cell: rejection sampling first, then a uniform pick among free cells
pub fn place(
    grid_size: i32,
    rng: &mut dyn RandomSource,
    blocked: impl Fn(Position) -> bool,
) -> Option<Position> {
    let n = usize::try_from(grid_size).ok()?;
    if n == 0 {
        return None;
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Position::new(rng.index(n) as i32, rng.index(n) as i32);
        if !blocked(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|&p| !blocked(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.index(free.len())])
}

/// Spawn the primary item and, if the bonus roll succeeds, a bonus item
pub fn generate(
    tuning: &GameTuning,
    rng: &mut dyn RandomSource,
    occupied: &VecDeque<Position>,
    level: u32,
    is_first: bool,
    now_ms: u64,
) -> Vec<FoodItem> {
    let table = &tuning.food;
    let primary = draw_primary(table, rng, is_first);
    let bonus = table
        .bonus
        .filter(|b| level >= b.min_level)
        .filter(|b| rng.uniform() < b.probability)
        .map(|b| b.kind);

    let mut items: Vec<FoodItem> = Vec::with_capacity(2);
    let picks = std::iter::once((primary, false)).chain(bonus.map(|k| (k, true)));
    for (kind, is_bonus) in picks {
        let Some(spec) = table.spec(kind) else {
            log::warn!("No catalog entry for {kind}, skipping spawn");
            continue;
        };
        let taken: Vec<Position> = items.iter().map(|f| f.position).collect();
        let Some(position) = place(tuning.grid_size, rng, |p| {
            occupied.contains(&p) || taken.contains(&p)
        }) else {
            log::warn!("Grid exhausted, cannot place {kind}");
            continue;
        };
        log::debug!("Spawned {kind} at ({}, {}) bonus={is_bonus}", position.x, position.y);
        items.push(FoodItem {
            kind,
            position,
            spawn_ms: now_ms,
            color: spec.color.clone(),
            rule: spec.rule,
            bonus: is_bonus,
        });
    }
    items
}

/// Award `points * level * combo multiplier` and spend a combo charge
fn award_flat(state: &mut GameState, points: i64, events: &mut Vec<GameEvent>) -> i64 {
    let combo = &mut state.effects.combo;
    let delta = points * i64::from(state.level) * combo.multiplier();
    state.score = state.score.saturating_add(delta);
    if combo.spend() {
        events.push(GameEvent::ComboFinished);
    }
    delta
}

/// Apply one item's rule; returns the score change
fn apply_rule(state: &mut GameState, item: &FoodItem, now_ms: u64, events: &mut Vec<GameEvent>) -> i64 {
    match item.rule {
        FoodRule::Flat { points } => award_flat(state, points, events),

        FoodRule::Combo { points, charges } => {
            let was_active = state.effects.combo.active;
            let remaining = state.effects.combo.grant(charges);
            events.push(if was_active {
                GameEvent::ComboExtended {
                    added: charges,
                    remaining,
                }
            } else {
                GameEvent::ComboStarted { remaining }
            });
            let delta = points * i64::from(state.level);
            state.score = state.score.saturating_add(delta);
            delta
        }

        FoodRule::Jackpot { glow_ms } => {
            let before = state.score;
            let factor = if state.effects.combo.active {
                state.effects.combo.clear();
                3
            } else {
                2
            };
            state.score = state.score.saturating_mul(factor);
            events.push(GameEvent::ScoreMultiplied { factor });
            state.effects.glow.start(now_ms, glow_ms);
            events.push(GameEvent::EffectStarted(EffectKind::Glow));
            state.score - before
        }

        FoodRule::Decaying {
            base_points,
            base_multiplier,
            decay_rate,
            floor,
        } => {
            let elapsed_secs = now_ms.saturating_sub(item.spawn_ms) as f64 / 1000.0;
            let multiplier = decay_multiplier(base_multiplier, decay_rate, floor, elapsed_secs);
            let points = round_half_up(base_points as f64 * multiplier);
            state.score = state.score.saturating_add(points);
            events.push(GameEvent::HubrisResolved { multiplier, points });
            points
        }

        FoodRule::Cosmetic { palette_ms, points } => {
            state.effects.palette_cycle.start(now_ms, palette_ms);
            events.push(GameEvent::EffectStarted(EffectKind::PaletteCycle));
            if points > 0 {
                award_flat(state, points, events)
            } else {
                0
            }
        }
    }
}

/// Eat every item under `head`, then respawn the food set
///
/// Returns how many items were eaten.
pub fn consume(state: &mut GameState, head: Position, ctx: &mut TickContext<'_>) -> usize {
    let (eaten, rest): (Vec<FoodItem>, Vec<FoodItem>) = std::mem::take(&mut state.food)
        .into_iter()
        .partition(|f| f.position == head);
    state.food = rest;
    if eaten.is_empty() {
        return 0;
    }

    for item in &eaten {
        let score_delta = apply_rule(state, item, ctx.now_ms, &mut ctx.events);
        ctx.events.push(GameEvent::FoodEaten {
            kind: item.kind,
            position: item.position,
            score_delta,
        });
    }

    state.consumption_counter += 1;
    let is_first = state.snake.len() == 1;
    state.food = generate(ctx.tuning, ctx.rng, &state.snake, state.level, is_first, ctx.now_ms);
    ctx.events.extend(state.food.iter().map(|f| GameEvent::FoodSpawned {
        kind: f.kind,
        position: f.position,
        bonus: f.bonus,
    }));
    eaten.len()
}
