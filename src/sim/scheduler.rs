//! Variable-interval tick scheduling
//!
//! Each tick schedules the next one after the current speed, so ticks never
//! overlap and the interval may change between them. The scheduler owns the
//! single pending timer; cancelling it is what keeps a reset from leaving a
//! second loop running.

use serde::{Deserialize, Serialize};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Running,
    GameOver,
}

/// A scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline_ms: u64,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }
}

/// Owns the phase and at most one pending timer
#[derive(Debug)]
pub struct Scheduler {
    phase: Phase,
    pending: Option<TimerHandle>,
    next_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            pending: None,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Idle -> Running; false if already started
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Arm the timer `delay_ms` after `now_ms`
    ///
    /// Any timer still pending is cancelled first, so there is never more
    /// than one.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerHandle {
        if let Some(old) = self.cancel() {
            log::warn!("Replacing pending tick timer #{}", old.id);
        }
        let handle = TimerHandle {
            id: self.next_id,
            deadline_ms: now_ms.saturating_add(delay_ms),
        };
        self.next_id += 1;
        self.pending = Some(handle);
        handle
    }

    /// Disarm the pending timer, if any
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    /// Take the pending timer if it is due and the run is live
    pub fn take_due(&mut self, now_ms: u64) -> Option<TimerHandle> {
        if self.phase != Phase::Running {
            return None;
        }
        match self.pending {
            Some(handle) if handle.deadline_ms <= now_ms => self.pending.take(),
            _ => None,
        }
    }

    /// Running -> GameOver; drops any pending timer
    pub fn finish(&mut self) {
        self.cancel();
        self.phase = Phase::GameOver;
    }

    /// Cancel whatever is pending and go back to Running
    pub fn restart(&mut self) {
        if let Some(old) = self.cancel() {
            log::debug!("Cancelled tick timer #{} for reset", old.id);
        }
        self.phase = Phase::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut s = Scheduler::new();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.begin());
        assert!(!s.begin());
        assert_eq!(s.phase(), Phase::Running);
        s.finish();
        assert_eq!(s.phase(), Phase::GameOver);
        s.restart();
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_take_due() {
        let mut s = Scheduler::new();
        s.begin();
        let h = s.schedule(100, 150);
        assert_eq!(h.deadline_ms(), 250);
        assert_eq!(s.take_due(249), None);
        assert_eq!(s.take_due(250), Some(h));
        assert_eq!(s.take_due(400), None);
    }

    #[test]
    fn test_single_pending_timer() {
        let mut s = Scheduler::new();
        s.begin();
        let first = s.schedule(0, 100);
        let second = s.schedule(0, 50);
        assert_ne!(first.id(), second.id());
        assert_eq!(s.pending(), Some(second));
        assert_eq!(s.take_due(100), Some(second));
        assert_eq!(s.take_due(100), None);
    }

    #[test]
    fn test_not_due_when_idle_or_over() {
        let mut s = Scheduler::new();
        s.schedule(0, 0);
        assert_eq!(s.take_due(10), None);
        s.begin();
        s.finish();
        assert_eq!(s.pending(), None);
        assert_eq!(s.take_due(10), None);
    }

    #[test]
    fn test_restart_cancels() {
        let mut s = Scheduler::new();
        s.begin();
        s.schedule(0, 100);
        s.restart();
        assert_eq!(s.pending(), None);
    }
}
