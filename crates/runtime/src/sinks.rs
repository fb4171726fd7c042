//! Engine output sinks backed by the [`EventBus`].

use std::time::Duration;

use game_core::{
    ActionId, AudioSink, EntityId, NotificationSink, Position, ProgressHandle, ProgressObserver,
};

use crate::events::{AudioEvent, ChatEvent, Event, EventBus, ProgressEvent};

/// Publishes chat, audio and progress output to the bus.
#[derive(Clone)]
pub struct BusSinks {
    bus: EventBus,
}

impl BusSinks {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl NotificationSink for BusSinks {
    fn notify(&self, actor: EntityId, self_message: &str, others_message: &str) {
        self.bus.publish(Event::Chat(ChatEvent {
            actor,
            self_message: self_message.to_owned(),
            others_message: others_message.to_owned(),
        }));
    }
}

impl AudioSink for BusSinks {
    fn play_at(&self, sound: &str, position: Position) {
        self.bus.publish(Event::Audio(AudioEvent {
            sound: sound.to_owned(),
            position,
        }));
    }
}

impl ProgressObserver for BusSinks {
    fn start(&self, actor: EntityId, action: ActionId, duration: Duration) -> Box<dyn ProgressHandle> {
        self.bus.publish(Event::Progress(ProgressEvent::Started {
            actor,
            action,
            duration_ms: duration.as_millis() as u64,
        }));
        Box::new(BusProgressHandle {
            actor,
            action,
            bus: self.bus.clone(),
        })
    }
}

struct BusProgressHandle {
    actor: EntityId,
    action: ActionId,
    bus: EventBus,
}

impl ProgressHandle for BusProgressHandle {
    fn interrupt(self: Box<Self>) {
        self.bus.publish(Event::Progress(ProgressEvent::Interrupted {
            actor: self.actor,
            action: self.action,
        }));
    }

    fn retire(self: Box<Self>) {
        self.bus.publish(Event::Progress(ProgressEvent::Retired {
            actor: self.actor,
            action: self.action,
        }));
    }
}
