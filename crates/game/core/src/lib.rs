//! Deterministic timed-action rules shared by the runtime and tools.
//!
//! `game-core` defines the cancelable timed-action state machine: snapshot
//! capture, per-tick invalidation, cooperative cancellation and terminal
//! effect dispatch. It performs no I/O; every side effect goes through the
//! collaborator traits in [`env`]. All action state flows through
//! [`engine::ActionEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod records;
pub mod state;

pub use action::{
    ActionMessages, ActionOutcome, ActionProfile, ActionState, AttemptError, AttemptRequest,
    CancellationToken, Invalidation, Snapshot, TimedAction, TimedActionKind,
};
pub use config::ActionConfig;
pub use engine::{
    ActionEngine, ActionRequestInitiator, ActorActionRegistry, TimedActionExecutor,
};
pub use env::{
    AudioSink, Env, LiveStateOracle, NotificationSink, ProgressHandle, ProgressObserver,
    TerminalEffect,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use records::{DamageProfile, RecordError, ScanOutcome, ScanRecord, ScanRecords, ScanSubject};
pub use state::{ActionId, Consciousness, EntityId, LiveState, Position, Tick};
