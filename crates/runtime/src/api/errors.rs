//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, content loading and attempt
//! validation so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{AttemptError, EntityId, ErrorContext, ErrorSeverity, GameError, TimedActionKind};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action worker command channel closed")]
    CommandChannelClosed,

    #[error("action worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("action worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error("{0} is not wearing any restraints")]
    NotRestrained(EntityId),

    #[error("unknown actor {0}")]
    UnknownActor(EntityId),

    #[error("actor {0} already exists")]
    ActorExists(EntityId),

    #[error("no action profile registered for {0}")]
    MissingProfile(TimedActionKind),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Attempt(inner) => inner.severity(),
            Self::NotRestrained(_)
            | Self::UnknownActor(_)
            | Self::ActorExists(_)
            | Self::MissingProfile(_) => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::Content(_) => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Attempt(inner) => inner.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Attempt(inner) => inner.error_code(),
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::NotRestrained(_) => "RUNTIME_NOT_RESTRAINED",
            Self::UnknownActor(_) => "RUNTIME_UNKNOWN_ACTOR",
            Self::ActorExists(_) => "RUNTIME_ACTOR_EXISTS",
            Self::MissingProfile(_) => "RUNTIME_MISSING_PROFILE",
            Self::Content(_) => "RUNTIME_CONTENT",
        }
    }
}
