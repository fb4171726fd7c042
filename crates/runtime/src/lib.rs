//! Runtime orchestration for the timed-action engine.
//!
//! This crate wires the deterministic [`game_core::ActionEngine`] to a
//! simulated world, a topic-based event bus and a background worker. Consumers
//! embed [`Runtime`] to spawn actors, start attempts, drive ticks and
//! subscribe to events through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`world`] holds the actor and effect tables the engine talks to
//! - [`sinks`] adapts engine output to bus events
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod sinks;
pub mod world;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{ActionEvent, AudioEvent, ChatEvent, Event, EventBus, ProgressEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TickMode};
pub use sinks::BusSinks;
pub use world::{ActorSpec, ActorView, AttemptView, Restraint};
