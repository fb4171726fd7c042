//! The timed action entity and its lifecycle states.

use std::fmt;
use std::time::Duration;

use super::{ActionMessages, ActionProfile, CancellationToken, Invalidation, Snapshot, TimedActionKind};
use crate::env::ProgressHandle;
use crate::state::{ActionId, EntityId, Tick};

/// Lifecycle state of a timed action.
///
/// `Running` is the only non-terminal state. Terminal states are absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionState {
    Running,
    Completed,
    Interrupted,
    Cancelled,
}

impl ActionState {
    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !self.is_running()
    }
}

/// Request to start a timed action for an actor.
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptRequest {
    pub actor: EntityId,
    pub kind: TimedActionKind,
    pub duration: Duration,
    pub messages: ActionMessages,
    pub sound: Option<String>,
}

impl AttemptRequest {
    /// Builds a request from a profile.
    ///
    /// An unusable profile duration becomes [`Duration::ZERO`], which the
    /// initiator refuses.
    pub fn from_profile(actor: EntityId, profile: &ActionProfile) -> Self {
        Self {
            actor,
            kind: profile.kind,
            duration: profile.duration().unwrap_or(Duration::ZERO),
            messages: profile.messages.clone(),
            sound: profile.sound.clone(),
        }
    }

    /// Overrides the duration (e.g. with a restraint's resist time).
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// A player-initiated action that completes after `duration` unless it is
/// interrupted or cancelled first.
///
/// Created by the initiator, mutated only by the executor. Once terminal the
/// action holds no resources and is dropped by the registry.
pub struct TimedAction {
    id: ActionId,
    actor: EntityId,
    kind: TimedActionKind,
    snapshot: Snapshot,
    duration: Duration,
    elapsed: Duration,
    state: ActionState,
    token: CancellationToken,
    progress: Option<Box<dyn ProgressHandle>>,
    messages: ActionMessages,
    sound: Option<String>,
}

impl TimedAction {
    pub(crate) fn start(
        id: ActionId,
        request: AttemptRequest,
        snapshot: Snapshot,
        token: CancellationToken,
        progress: Box<dyn ProgressHandle>,
    ) -> Self {
        Self {
            id,
            actor: request.actor,
            kind: request.kind,
            snapshot,
            duration: request.duration,
            elapsed: Duration::ZERO,
            state: ActionState::Running,
            token,
            progress: Some(progress),
            messages: request.messages,
            sound: request.sound,
        }
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn actor(&self) -> EntityId {
        self.actor
    }

    pub fn kind(&self) -> TimedActionKind {
        self.kind
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    /// Token shared with whoever may want to cancel this action.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn messages(&self) -> &ActionMessages {
        &self.messages
    }

    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    /// Running and not yet asked to cancel.
    pub fn is_live(&self) -> bool {
        self.state.is_running() && !self.token.is_cancelled()
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        debug_assert!(self.state.is_running(), "advance on terminal action");
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Enters a terminal state and hands back the progress handle.
    ///
    /// The handle is returned only on the first call; the state never leaves
    /// a terminal value.
    pub(crate) fn finish(&mut self, state: ActionState) -> Option<Box<dyn ProgressHandle>> {
        debug_assert!(state.is_terminal());
        if self.state.is_terminal() {
            return None;
        }
        self.state = state;
        self.progress.take()
    }

    pub(crate) fn outcome(&self, reasons: Invalidation, tick: Tick) -> ActionOutcome {
        ActionOutcome {
            id: self.id,
            actor: self.actor,
            kind: self.kind,
            state: self.state,
            elapsed: self.elapsed,
            duration: self.duration,
            reasons,
            tick,
        }
    }
}

impl Drop for TimedAction {
    fn drop(&mut self) {
        // An action torn down mid-flight (engine dropped) still retires its
        // progress display.
        if let Some(handle) = self.progress.take() {
            handle.retire();
        }
    }
}

impl fmt::Debug for TimedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedAction")
            .field("id", &self.id)
            .field("actor", &self.actor)
            .field("kind", &self.kind)
            .field("snapshot", &self.snapshot)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .field("cancel_requested", &self.token.is_cancelled())
            .field("has_progress", &self.progress.is_some())
            .finish()
    }
}

/// Terminal transition reported by the executor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionOutcome {
    pub id: ActionId,
    pub actor: EntityId,
    pub kind: TimedActionKind,
    pub state: ActionState,
    /// Elapsed time frozen at the moment of the transition.
    pub elapsed: Duration,
    pub duration: Duration,
    /// Non-empty only for `Interrupted`.
    pub reasons: Invalidation,
    /// Engine tick on which the transition happened.
    pub tick: Tick,
}
