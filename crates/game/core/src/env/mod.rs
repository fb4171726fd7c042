//! Collaborator interfaces the engine talks to.
//!
//! The engine never reaches for global managers: live state, notifications,
//! audio, progress display and terminal effects are passed in through the
//! [`Env`] aggregate on every call. This keeps the state machine testable with
//! plain recording fakes.
mod progress;
mod sinks;

pub use progress::{ProgressHandle, ProgressObserver};
pub use sinks::{AudioSink, NotificationSink, TerminalEffect};

use crate::state::{EntityId, LiveState};

/// Read-only provider of per-actor live state, polled once per tick.
pub trait LiveStateOracle {
    /// Returns the actor's current state, or `None` if the actor is gone.
    fn live_state(&self, actor: EntityId) -> Option<LiveState>;

    /// Name used when addressing observers. Defaults to the entity id.
    fn display_name(&self, actor: EntityId) -> Option<String> {
        let _ = actor;
        None
    }
}

/// Aggregates the collaborators required by the initiator and executor.
pub struct Env<'a> {
    pub live: &'a dyn LiveStateOracle,
    pub notifier: &'a dyn NotificationSink,
    pub audio: &'a dyn AudioSink,
    pub progress: &'a dyn ProgressObserver,
    pub effects: &'a mut dyn TerminalEffect,
}

impl<'a> Env<'a> {
    pub fn new(
        live: &'a dyn LiveStateOracle,
        notifier: &'a dyn NotificationSink,
        audio: &'a dyn AudioSink,
        progress: &'a dyn ProgressObserver,
        effects: &'a mut dyn TerminalEffect,
    ) -> Self {
        Self {
            live,
            notifier,
            audio,
            progress,
            effects,
        }
    }

    /// Resolves the name shown to observers.
    pub fn actor_name(&self, actor: EntityId) -> String {
        self.live
            .display_name(actor)
            .unwrap_or_else(|| actor.to_string())
    }
}
