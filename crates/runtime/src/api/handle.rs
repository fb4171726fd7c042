//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! starting attempts, driving ticks or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{ActionId, EntityId, LiveState, Tick, TimedActionKind};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;
use crate::world::{ActorSpec, ActorView};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Place a new actor in the world
    pub async fn spawn_actor(&self, spec: ActorSpec) -> Result<()> {
        self.request(|reply| Command::SpawnActor { spec, reply })
            .await?
    }

    /// Replace an actor's live state
    pub async fn update_actor(&self, actor: EntityId, live: LiveState) -> Result<()> {
        self.request(|reply| Command::UpdateActor { actor, live, reply })
            .await?
    }

    /// Remove an actor; a running attempt breaks on the next tick
    pub async fn despawn_actor(&self, actor: EntityId) -> Result<()> {
        self.request(|reply| Command::DespawnActor { actor, reply })
            .await?
    }

    /// Start a timed action, cancelling whatever the actor was doing
    pub async fn begin_attempt(&self, actor: EntityId, kind: TimedActionKind) -> Result<ActionId> {
        self.request(|reply| Command::BeginAttempt { actor, kind, reply })
            .await?
    }

    /// Ask the actor's attempt to stop at the next tick
    ///
    /// Returns `true` if this call raised the cancellation flag.
    pub async fn request_cancel(&self, actor: EntityId) -> Result<bool> {
        self.request(|reply| Command::RequestCancel { actor, reply })
            .await
    }

    /// Query an actor (read-only snapshot)
    pub async fn query_actor(&self, actor: EntityId) -> Result<Option<ActorView>> {
        self.request(|reply| Command::QueryActor { actor, reply })
            .await
    }

    /// True while the actor has an attempt in flight that was not asked to cancel
    pub async fn is_running(&self, actor: EntityId) -> Result<bool> {
        self.request(|reply| Command::IsRunning { actor, reply })
            .await
    }

    /// Run `ticks` engine ticks now and return the engine clock
    pub async fn advance(&self, ticks: u64) -> Result<Tick> {
        self.request(|reply| Command::Advance { ticks, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Action` - Attempt lifecycle
    /// - `Topic::Chat` - Messages for the actor and observers
    /// - `Topic::Audio` - Sound cues
    /// - `Topic::Progress` - Progress indicator lifecycle
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut actions = handle.subscribe(Topic::Action);
    /// while let Ok(event) = actions.recv().await {
    ///     // Handle attempt events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
