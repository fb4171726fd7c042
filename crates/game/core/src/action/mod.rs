//! Timed action building blocks.
//!
//! An attempt is described by a [`TimedActionKind`] and its [`ActionProfile`],
//! anchored to a [`Snapshot`] of the actor, and watched by the invalidation
//! [`predicate`] on every tick. A [`CancellationToken`] lets a newer request
//! preempt it cooperatively.
mod cancel;
mod error;
mod kind;
pub mod predicate;
mod profile;
mod snapshot;
mod timed;

pub use cancel::CancellationToken;
pub use error::AttemptError;
pub use kind::TimedActionKind;
pub use predicate::Invalidation;
pub use profile::{ActionMessages, ActionProfile};
pub use snapshot::Snapshot;
pub use timed::{ActionOutcome, ActionState, AttemptRequest, TimedAction};
