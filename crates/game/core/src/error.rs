//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`AttemptError`, `RecordError`) are defined next to
//! the operations that produce them. This module provides the classification
//! trait they share.
//!
//! Note that interruption and cancellation of a running action are *not*
//! errors: they are ordinary terminal states reported through the
//! collaborators. Only refusals at request time surface as `Err`.

use crate::state::{EntityId, Tick};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request may succeed later once world state changes
    /// (e.g. the actor regains consciousness).
    Recoverable,

    /// Invalid input that should not be retried without changes.
    Validation,

    /// Host-side failure unrelated to the request (closed channels, bad content).
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Actor that triggered the error (if applicable).
    pub actor: Option<EntityId>,

    /// Engine clock at the time of error.
    pub tick: Tick,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(tick: Tick) -> Self {
        Self { actor: None, tick }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
