//! Invalidation predicate for running attempts.
//!
//! The predicate is a pure function of the snapshot and the live state the
//! host reports on this tick. It returns every reason that applies so
//! observers can tell *why* an attempt broke, but the executor only cares
//! whether the set is empty.

use std::fmt;

use bitflags::bitflags;

use super::Snapshot;
use crate::state::{Consciousness, LiveState};

bitflags! {
    /// Reasons an attempt is (or would be) invalid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Invalidation: u8 {
        /// The host no longer reports live state for the actor.
        const MISSING = 1 << 0;
        const UNCONSCIOUS = 1 << 1;
        const DEAD = 1 << 2;
        /// Vital stat differs from the snapshot (damage or healing).
        const VITAL_CHANGED = 1 << 3;
        /// Actor is in a motion-lock state such as slipping.
        const MOTION_LOCKED = 1 << 4;
        /// Actor left the snapshot cell.
        const MOVED = 1 << 5;
    }
}

impl Invalidation {
    /// Returns true if no invalidating condition applies.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.is_empty()
    }
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("valid");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                f.write_str("|")?;
            }
            f.write_str(&name.to_ascii_lowercase())?;
            first = false;
        }
        Ok(())
    }
}

/// Compares the actor's live state with the snapshot.
///
/// `None` means the host could not produce live state for the actor, which
/// always invalidates.
pub fn evaluate(snapshot: &Snapshot, live: Option<&LiveState>) -> Invalidation {
    let Some(live) = live else {
        return Invalidation::MISSING;
    };

    let mut reasons = Invalidation::empty();
    match live.consciousness {
        Consciousness::Conscious => {}
        Consciousness::Unconscious => reasons |= Invalidation::UNCONSCIOUS,
        Consciousness::Dead => reasons |= Invalidation::DEAD,
    }
    // Bitwise comparison: any change breaks the attempt, and a steady NaN
    // reading does not.
    if live.vital.to_bits() != snapshot.vital().to_bits() {
        reasons |= Invalidation::VITAL_CHANGED;
    }
    if live.motion_locked {
        reasons |= Invalidation::MOTION_LOCKED;
    }
    if live.position != snapshot.position() {
        reasons |= Invalidation::MOVED;
    }
    reasons
}
