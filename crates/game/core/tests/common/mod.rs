//! Recording collaborators for driving the engine in tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use game_core::{
    ActionConfig, ActionEngine, ActionId, ActionOutcome, ActionProfile, AttemptError,
    AttemptRequest, AudioSink, EntityId, Env, LiveState, LiveStateOracle, NotificationSink,
    Position, ProgressHandle, ProgressObserver, TerminalEffect, TimedActionKind,
};

#[derive(Default)]
pub struct FakeWorld {
    pub actors: HashMap<EntityId, LiveState>,
    pub names: HashMap<EntityId, String>,
}

impl LiveStateOracle for FakeWorld {
    fn live_state(&self, actor: EntityId) -> Option<LiveState> {
        self.actors.get(&actor).copied()
    }

    fn display_name(&self, actor: EntityId) -> Option<String> {
        self.names.get(&actor).cloned()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub actor: EntityId,
    pub self_message: String,
    pub others_message: String,
}

#[derive(Default)]
pub struct Recorder {
    pub notes: RefCell<Vec<Note>>,
    pub sounds: RefCell<Vec<(String, Position)>>,
}

impl NotificationSink for Recorder {
    fn notify(&self, actor: EntityId, self_message: &str, others_message: &str) {
        self.notes.borrow_mut().push(Note {
            actor,
            self_message: self_message.into(),
            others_message: others_message.into(),
        });
    }
}

impl AudioSink for Recorder {
    fn play_at(&self, sound: &str, position: Position) {
        self.sounds.borrow_mut().push((sound.into(), position));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Started(ActionId),
    Interrupted(ActionId),
    Retired(ActionId),
}

#[derive(Clone, Default)]
pub struct ProgressLog {
    pub events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl ProgressLog {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of times the handle for `id` was released (interrupt or retire).
    pub fn releases(&self, id: ActionId) -> usize {
        self.events()
            .iter()
            .filter(|event| {
                matches!(event, ProgressEvent::Interrupted(x) | ProgressEvent::Retired(x) if *x == id)
            })
            .count()
    }
}

struct LoggedHandle {
    id: ActionId,
    log: ProgressLog,
}

impl ProgressHandle for LoggedHandle {
    fn interrupt(self: Box<Self>) {
        self.log
            .events
            .lock()
            .unwrap()
            .push(ProgressEvent::Interrupted(self.id));
    }

    fn retire(self: Box<Self>) {
        self.log
            .events
            .lock()
            .unwrap()
            .push(ProgressEvent::Retired(self.id));
    }
}

impl ProgressObserver for ProgressLog {
    fn start(&self, _actor: EntityId, action: ActionId, _duration: Duration) -> Box<dyn ProgressHandle> {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Started(action));
        Box::new(LoggedHandle {
            id: action,
            log: self.clone(),
        })
    }
}

#[derive(Default)]
pub struct EffectLog {
    pub applied: Vec<(EntityId, TimedActionKind)>,
}

impl TerminalEffect for EffectLog {
    fn apply_effect(&mut self, actor: EntityId, kind: TimedActionKind) {
        self.applied.push((actor, kind));
    }
}

/// Engine plus recording collaborators, ticking in whole seconds.
pub struct Harness {
    pub world: FakeWorld,
    pub recorder: Recorder,
    pub progress: ProgressLog,
    pub effects: EffectLog,
    pub engine: ActionEngine,
}

impl Harness {
    pub fn new() -> Self {
        let config = ActionConfig::with_tick_interval(Duration::from_secs(1));
        Self {
            world: FakeWorld::default(),
            recorder: Recorder::default(),
            progress: ProgressLog::default(),
            effects: EffectLog::default(),
            engine: ActionEngine::new(&config),
        }
    }

    pub fn spawn(&mut self, actor: EntityId, live: LiveState) {
        self.world.actors.insert(actor, live);
    }

    pub fn live_mut(&mut self, actor: EntityId) -> &mut LiveState {
        self.world.actors.get_mut(&actor).expect("actor spawned")
    }

    pub fn begin(&mut self, request: AttemptRequest) -> Result<ActionId, AttemptError> {
        let mut env = Env::new(
            &self.world,
            &self.recorder,
            &self.recorder,
            &self.progress,
            &mut self.effects,
        );
        self.engine.begin_attempt(&mut env, request)
    }

    pub fn begin_uncuff(&mut self, actor: EntityId, duration: Duration) -> Result<ActionId, AttemptError> {
        let request = AttemptRequest::from_profile(actor, &ActionProfile::uncuff()).with_duration(duration);
        self.begin(request)
    }

    pub fn tick(&mut self) -> Vec<ActionOutcome> {
        let mut env = Env::new(
            &self.world,
            &self.recorder,
            &self.recorder,
            &self.progress,
            &mut self.effects,
        );
        self.engine.tick(&mut env)
    }

    /// Ticks until an outcome for `actor` appears, up to `limit` ticks.
    pub fn run_until_outcome(&mut self, actor: EntityId, limit: usize) -> Option<ActionOutcome> {
        for _ in 0..limit {
            if let Some(outcome) = self.tick().into_iter().find(|o| o.actor == actor) {
                return Some(outcome);
            }
        }
        None
    }

    pub fn notes(&self) -> Vec<Note> {
        self.recorder.notes.borrow().clone()
    }
}

pub fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}
