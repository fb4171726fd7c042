//! High-level runtime orchestrator.
//!
//! The runtime owns the action worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::env;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::{ActionProfileRegistry, ConfigLoader};
use game_core::ActionConfig;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{ActionWorker, Command};

/// How the worker advances the engine clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TickMode {
    /// Tick on a fixed wall-clock interval.
    #[default]
    Interval,
    /// Tick only when a client calls [`RuntimeHandle::advance`].
    Manual,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub action_config: ActionConfig,
    pub tick_mode: TickMode,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            action_config: ActionConfig::default(),
            tick_mode: TickMode::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Reads configuration from environment variables.
    ///
    /// `ACTION_CONFIG_PATH` names a TOML file loaded first; `TICK_INTERVAL_MS`
    /// then overrides its tick interval. Unparseable values are ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("ACTION_CONFIG_PATH") {
            config.action_config = ConfigLoader::load(&PathBuf::from(path))?;
        }

        if let Some(ms) = read_env::<u64>("TICK_INTERVAL_MS") {
            config.action_config.tick_interval_ms = ms.max(1);
        }

        if let Some(mode) = read_env::<TickMode>("TICK_MODE") {
            config.tick_mode = mode;
        }

        if let Some(capacity) = read_env::<usize>("EVENT_BUFFER_SIZE") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("COMMAND_BUFFER_SIZE") {
            config.command_buffer_size = capacity.max(1);
        }

        Ok(config)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates the action worker
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime with the given configuration and embedded profiles.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every [`RuntimeHandle`] clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    profiles: Option<ActionProfileRegistry>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            profiles: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these action profiles instead of the embedded ones
    pub fn profiles(mut self, profiles: ActionProfileRegistry) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let profiles = match self.profiles {
            Some(profiles) => profiles,
            None => ActionProfileRegistry::load()?,
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = ActionWorker::new(
            self.config.action_config,
            self.config.tick_mode,
            profiles,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_mode_parses_case_insensitively() {
        assert_eq!("manual".parse::<TickMode>().unwrap(), TickMode::Manual);
        assert_eq!("Interval".parse::<TickMode>().unwrap(), TickMode::Interval);
        assert!("sometimes".parse::<TickMode>().is_err());
        assert_eq!(TickMode::Manual.to_string(), "manual");
    }
}
