//! Live actor state as reported by the host world.

use super::common::Position;

/// Consciousness level reported by the host's health system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Consciousness {
    #[default]
    Conscious,
    Unconscious,
    Dead,
}

/// Per-tick view of an actor, polled by the invalidation predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiveState {
    /// Aggregate vital stat (overall health). Any change breaks an attempt.
    pub vital: f32,

    /// Cell the actor currently occupies.
    pub position: Position,

    pub consciousness: Consciousness,

    /// True while the actor is in a motion state that forbids deliberate
    /// actions (e.g. slipping).
    pub motion_locked: bool,
}

impl LiveState {
    pub fn new(vital: f32, position: Position) -> Self {
        Self {
            vital,
            position,
            consciousness: Consciousness::Conscious,
            motion_locked: false,
        }
    }

    #[must_use]
    pub fn with_consciousness(mut self, consciousness: Consciousness) -> Self {
        self.consciousness = consciousness;
        self
    }

    #[must_use]
    pub fn with_motion_lock(mut self, motion_locked: bool) -> Self {
        self.motion_locked = motion_locked;
        self
    }
}

impl Default for LiveState {
    fn default() -> Self {
        Self::new(100.0, Position::ORIGIN)
    }
}
