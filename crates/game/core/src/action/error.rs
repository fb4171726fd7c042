//! Refusals reported synchronously by `begin_attempt`.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::EntityId;

use super::{Invalidation, TimedActionKind};

/// Why an attempt was not started. No action exists after any of these.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    /// The invalidation predicate already holds at request time.
    #[error("actor {actor} is not eligible to start an attempt: {reasons}")]
    NotEligible {
        actor: EntityId,
        reasons: Invalidation,
        context: ErrorContext,
    },

    /// The requested duration is zero (or came from an unusable profile value).
    #[error("{kind} attempt for actor {actor} has no positive duration")]
    InvalidDuration {
        actor: EntityId,
        kind: TimedActionKind,
        context: ErrorContext,
    },
}

impl AttemptError {
    pub fn actor(&self) -> EntityId {
        match self {
            Self::NotEligible { actor, .. } | Self::InvalidDuration { actor, .. } => *actor,
        }
    }
}

impl GameError for AttemptError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEligible { .. } => ErrorSeverity::Recoverable,
            Self::InvalidDuration { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotEligible { context, .. } | Self::InvalidDuration { context, .. } => {
                Some(context)
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEligible { .. } => "ATTEMPT_NOT_ELIGIBLE",
            Self::InvalidDuration { .. } => "ATTEMPT_INVALID_DURATION",
        }
    }
}
