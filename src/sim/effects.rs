//! Timed modifiers
//!
//! Combo is counted in consumptions; glow and palette cycle expire by
//! wall-clock comparison against an absolute end time.

use serde::{Deserialize, Serialize};

/// Which effect an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Combo,
    Glow,
    PaletteCycle,
}

/// Double-points window measured in remaining consumptions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub active: bool,
    pub remaining: u32,
}

impl Combo {
    pub fn multiplier(&self) -> i64 {
        if self.active { 2 } else { 1 }
    }

    /// Start or extend the window; returns the new remaining count
    pub fn grant(&mut self, charges: u32) -> u32 {
        if self.active {
            self.remaining += charges;
        } else {
            self.active = true;
            self.remaining = charges;
        }
        self.remaining
    }

    /// Spend one charge; returns true when the window just closed
    pub fn spend(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0;
    }
}

/// Effect active until an absolute time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub active: bool,
    pub end_ms: u64,
}

impl TimedEffect {
    /// (Re)start the effect; a restart replaces the previous end time
    pub fn start(&mut self, now_ms: u64, duration_ms: u64) {
        self.active = true;
        self.end_ms = now_ms.saturating_add(duration_ms);
    }

    /// Deactivate once `now` passes the end; returns true on the transition
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self.active && now_ms > self.end_ms {
            self.active = false;
            return true;
        }
        false
    }
}

/// All active modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectState {
    pub combo: Combo,
    pub glow: TimedEffect,
    pub palette_cycle: TimedEffect,
}

impl EffectState {
    /// Expiry pass; idempotent once everything has lapsed
    ///
    /// Combo is left alone: it only ends through consumption.
    pub fn expire(&mut self, now_ms: u64) -> Vec<EffectKind> {
        let mut expired = Vec::new();
        if self.glow.expire(now_ms) {
            expired.push(EffectKind::Glow);
        }
        if self.palette_cycle.expire(now_ms) {
            expired.push(EffectKind::PaletteCycle);
        }
        expired
    }
}
