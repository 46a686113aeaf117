//! Directional intent buffering
//!
//! Intents arrive at arbitrary times between ticks and are only committed
//! once per tick, right before movement. Reversals are checked against the
//! committed direction, never the queue tail, so two quick presses cannot
//! fold the snake back onto itself within a single tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Unit movement direction (`None` = not moving yet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid offset (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::None => IVec2::ZERO,
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Normalize a raw key name; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "Down" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "Left" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "Right" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Pending intents plus the committed heading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputQueue {
    /// Heading applied by movement this tick
    pub direction: Direction,
    /// Last heading committed by `resolve`
    pub last_committed: Direction,
    /// Buffered intents, oldest first
    pub pending: Vec<Direction>,
}

impl InputQueue {
    fn reverses(&self, dir: Direction) -> bool {
        dir == self.last_committed.opposite()
    }

    /// Buffer an intent; reversals of the committed heading are dropped
    pub fn push(&mut self, dir: Direction) -> bool {
        if dir == Direction::None || self.reverses(dir) {
            return false;
        }
        self.pending.push(dir);
        true
    }

    /// Commit the first non-reversing intent and drop the rest
    ///
    /// Returns the newly committed direction. Leaves everything untouched when
    /// nothing valid is queued.
    pub fn resolve(&mut self) -> Option<Direction> {
        let dir = self.pending.iter().copied().find(|&d| !self.reverses(d))?;
        self.direction = dir;
        self.last_committed = dir;
        self.pending.clear();
        Some(dir)
    }
}
