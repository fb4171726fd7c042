//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ActionEvent, AudioEvent, ChatEvent, ProgressEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Attempt lifecycle (started, refused, terminal transitions)
    Action,
    /// Messages addressed to the actor and to observers
    Chat,
    /// Positional sound cues
    Audio,
    /// Progress indicator lifecycle
    Progress,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Action, Topic::Chat, Topic::Audio, Topic::Progress];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Action(ActionEvent),
    Chat(ChatEvent),
    Audio(AudioEvent),
    Progress(ProgressEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Action(_) => Topic::Action,
            Event::Chat(_) => Topic::Chat,
            Event::Audio(_) => Topic::Audio,
            Event::Progress(_) => Topic::Progress,
        }
    }
}

/// One broadcast sender per topic, created up front.
struct Channels {
    action: broadcast::Sender<Event>,
    chat: broadcast::Sender<Event>,
    audio: broadcast::Sender<Event>,
    progress: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Action => &self.action,
            Topic::Chat => &self.chat,
            Topic::Audio => &self.audio,
            Topic::Progress => &self.progress,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a topic
/// has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                action: broadcast::channel(capacity).0,
                chat: broadcast::channel(capacity).0,
                audio: broadcast::channel(capacity).0,
                progress: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
