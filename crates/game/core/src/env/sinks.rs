//! Fire-and-forget output sinks.

use crate::action::TimedActionKind;
use crate::state::{EntityId, Position};

/// Chat-style notification channel.
pub trait NotificationSink {
    /// Sends `self_message` to the actor and `others_message` to nearby
    /// observers.
    fn notify(&self, actor: EntityId, self_message: &str, others_message: &str);
}

/// Positional audio playback.
pub trait AudioSink {
    fn play_at(&self, sound: &str, position: Position);
}

/// Irreversible effect applied when an attempt completes.
///
/// Invoked exactly once per completed action and never for interrupted or
/// cancelled ones.
pub trait TerminalEffect {
    fn apply_effect(&mut self, actor: EntityId, kind: TimedActionKind);
}
