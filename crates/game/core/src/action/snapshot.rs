//! Baseline of actor state captured when an attempt starts.

use crate::state::{LiveState, Position, Tick};

/// Immutable baseline the invalidation predicate compares live state against.
///
/// Fields are private: once captured, a snapshot cannot be altered. Create a
/// new attempt to get a new baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    vital: f32,
    position: Position,
    captured_at: Tick,
}

impl Snapshot {
    /// Captures the baseline from the actor's current live state.
    pub fn capture(live: &LiveState, now: Tick) -> Self {
        Self {
            vital: live.vital,
            position: live.position,
            captured_at: now,
        }
    }

    pub fn vital(&self) -> f32 {
        self.vital
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn captured_at(&self) -> Tick {
        self.captured_at
    }
}
