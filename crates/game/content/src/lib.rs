//! Data-driven content definitions and loaders.
//!
//! This crate houses static content for the timed-action engine and provides
//! loaders for RON/TOML data files:
//! - Timed action profiles (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActionProfileRegistry, ConfigLoader, LoadResult};
