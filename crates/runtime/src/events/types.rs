//! Event types for different topics.
//!
//! Durations travel as milliseconds so every payload serializes to plain
//! JSON numbers.

use serde::{Deserialize, Serialize};

use game_core::{
    ActionId, ActionOutcome, ActionState, EntityId, ErrorSeverity, Invalidation, Position, Tick,
    TimedActionKind,
};

/// Attempt lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// An attempt was accepted and is now running.
    Started {
        actor: EntityId,
        action: ActionId,
        kind: TimedActionKind,
        duration_ms: u64,
        tick: Tick,
    },

    /// A begin request was refused; nothing was created.
    Refused {
        actor: EntityId,
        kind: TimedActionKind,
        /// Stable error identifier, e.g. `ATTEMPT_NOT_ELIGIBLE`.
        code: String,
        severity: ErrorSeverity,
        reason: String,
        tick: Tick,
    },

    /// The attempt ran to completion and its effect was applied.
    Completed {
        actor: EntityId,
        action: ActionId,
        kind: TimedActionKind,
        elapsed_ms: u64,
        tick: Tick,
    },

    /// The attempt broke because the actor's state changed.
    Interrupted {
        actor: EntityId,
        action: ActionId,
        kind: TimedActionKind,
        reasons: Invalidation,
        elapsed_ms: u64,
        tick: Tick,
    },

    /// The attempt observed a cancellation request.
    Cancelled {
        actor: EntityId,
        action: ActionId,
        kind: TimedActionKind,
        elapsed_ms: u64,
        tick: Tick,
    },
}

impl ActionEvent {
    pub fn actor(&self) -> EntityId {
        match self {
            ActionEvent::Started { actor, .. }
            | ActionEvent::Refused { actor, .. }
            | ActionEvent::Completed { actor, .. }
            | ActionEvent::Interrupted { actor, .. }
            | ActionEvent::Cancelled { actor, .. } => *actor,
        }
    }

    /// Builds the event for a terminal transition reported by the engine.
    pub fn from_outcome(outcome: &ActionOutcome) -> Option<Self> {
        let elapsed_ms = outcome.elapsed.as_millis() as u64;
        let event = match outcome.state {
            ActionState::Running => return None,
            ActionState::Completed => ActionEvent::Completed {
                actor: outcome.actor,
                action: outcome.id,
                kind: outcome.kind,
                elapsed_ms,
                tick: outcome.tick,
            },
            ActionState::Interrupted => ActionEvent::Interrupted {
                actor: outcome.actor,
                action: outcome.id,
                kind: outcome.kind,
                reasons: outcome.reasons,
                elapsed_ms,
                tick: outcome.tick,
            },
            ActionState::Cancelled => ActionEvent::Cancelled {
                actor: outcome.actor,
                action: outcome.id,
                kind: outcome.kind,
                elapsed_ms,
                tick: outcome.tick,
            },
        };
        Some(event)
    }
}

/// Pair of messages produced by one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub actor: EntityId,
    /// Text shown to the acting player.
    pub self_message: String,
    /// Text shown to everyone else in view.
    pub others_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub sound: String,
    pub position: Position,
}

/// Progress indicator lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEvent {
    Started {
        actor: EntityId,
        action: ActionId,
        duration_ms: u64,
    },
    Interrupted {
        actor: EntityId,
        action: ActionId,
    },
    Retired {
        actor: EntityId,
        action: ActionId,
    },
}
