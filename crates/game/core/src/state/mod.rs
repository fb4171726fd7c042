//! Identifiers and live actor state shared by the engine and its collaborators.
mod common;
mod vitals;

pub use common::{ActionId, EntityId, Position, Tick};
pub use vitals::{Consciousness, LiveState};
