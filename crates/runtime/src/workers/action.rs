//! Action worker that owns the authoritative [`game_core::ActionEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives engine ticks on a
//! fixed interval or on demand, and publishes events to the EventBus.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use game_content::ActionProfileRegistry;
use game_core::{
    ActionConfig, ActionEngine, ActionId, AttemptRequest, EntityId, Env, GameError, LiveState,
    Tick, TimedActionKind,
};

use crate::api::{Result, RuntimeError};
use crate::events::{ActionEvent, Event, EventBus};
use crate::runtime::TickMode;
use crate::sinks::BusSinks;
use crate::world::{ActorSpec, ActorView, AttemptView, World};

/// Commands that can be sent to the action worker
pub enum Command {
    SpawnActor {
        spec: ActorSpec,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Replace an actor's live state (damage, movement, falling asleep...).
    UpdateActor {
        actor: EntityId,
        live: LiveState,
        reply: oneshot::Sender<Result<()>>,
    },
    DespawnActor {
        actor: EntityId,
        reply: oneshot::Sender<Result<()>>,
    },
    BeginAttempt {
        actor: EntityId,
        kind: TimedActionKind,
        reply: oneshot::Sender<Result<ActionId>>,
    },
    RequestCancel {
        actor: EntityId,
        reply: oneshot::Sender<bool>,
    },
    QueryActor {
        actor: EntityId,
        reply: oneshot::Sender<Option<ActorView>>,
    },
    IsRunning {
        actor: EntityId,
        reply: oneshot::Sender<bool>,
    },
    /// Run `ticks` engine ticks immediately. Replies with the engine clock.
    Advance {
        ticks: u64,
        reply: oneshot::Sender<Tick>,
    },
}

/// Background task that processes attempt commands and engine ticks.
pub struct ActionWorker {
    engine: ActionEngine,
    world: World,
    sinks: BusSinks,
    profiles: ActionProfileRegistry,
    config: ActionConfig,
    tick_mode: TickMode,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl ActionWorker {
    pub fn new(
        config: ActionConfig,
        tick_mode: TickMode,
        profiles: ActionProfileRegistry,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            tick_interval_ms = config.tick_interval().as_millis() as u64,
            tick_mode = %tick_mode,
            profiles = profiles.len(),
            "ActionWorker initialized"
        );

        Self {
            engine: ActionEngine::new(&config),
            world: World::default(),
            sinks: BusSinks::new(event_bus.clone()),
            profiles,
            config,
            tick_mode,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        let mut interval = time::interval(self.config.tick_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let ticking = self.tick_mode == TickMode::Interval;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = interval.tick(), if ticking => self.tick(),
            }
        }

        debug!(target: "runtime::worker", clock = %self.engine.clock(), "ActionWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SpawnActor { spec, reply } => {
                let result = self.spawn_actor(spec);
                if reply.send(result).is_err() {
                    debug!("SpawnActor reply channel closed (caller dropped)");
                }
            }
            Command::UpdateActor { actor, live, reply } => {
                let result = if self.world.update(actor, live) {
                    Ok(())
                } else {
                    Err(RuntimeError::UnknownActor(actor))
                };
                if reply.send(result).is_err() {
                    debug!("UpdateActor reply channel closed (caller dropped)");
                }
            }
            Command::DespawnActor { actor, reply } => {
                let result = if self.world.despawn(actor) {
                    info!(target: "runtime::worker", actor = %actor, "actor despawned");
                    Ok(())
                } else {
                    Err(RuntimeError::UnknownActor(actor))
                };
                if reply.send(result).is_err() {
                    debug!("DespawnActor reply channel closed (caller dropped)");
                }
            }
            Command::BeginAttempt { actor, kind, reply } => {
                let result = self.begin_attempt(actor, kind);
                if reply.send(result).is_err() {
                    debug!("BeginAttempt reply channel closed (caller dropped)");
                }
            }
            Command::RequestCancel { actor, reply } => {
                let raised = self.engine.request_cancel(actor);
                debug!(target: "runtime::worker", actor = %actor, raised, "cancel requested");
                if reply.send(raised).is_err() {
                    debug!("RequestCancel reply channel closed (caller dropped)");
                }
            }
            Command::QueryActor { actor, reply } => {
                if reply.send(self.query_actor(actor)).is_err() {
                    debug!("QueryActor reply channel closed (caller dropped)");
                }
            }
            Command::IsRunning { actor, reply } => {
                if reply.send(self.engine.is_running(actor)).is_err() {
                    debug!("IsRunning reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ticks, reply } => {
                for _ in 0..ticks {
                    self.tick();
                }
                if reply.send(self.engine.clock()).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn spawn_actor(&mut self, spec: ActorSpec) -> Result<()> {
        let actor = spec.id;
        let restrained = spec.restraint.is_some();
        if !self.world.spawn(spec) {
            return Err(RuntimeError::ActorExists(actor));
        }
        info!(target: "runtime::worker", actor = %actor, restrained, "actor spawned");
        Ok(())
    }

    fn begin_attempt(&mut self, actor: EntityId, kind: TimedActionKind) -> Result<ActionId> {
        let result = self.start_attempt(actor, kind);

        let tick = self.engine.clock();
        let event = match &result {
            Ok(action) => {
                let duration_ms = self
                    .engine
                    .action(actor)
                    .map_or(0, |running| running.duration().as_millis() as u64);
                ActionEvent::Started {
                    actor,
                    action: *action,
                    kind,
                    duration_ms,
                    tick,
                }
            }
            Err(error) => {
                let severity = error.severity();
                warn!(
                    target: "runtime::worker",
                    actor = %actor,
                    kind = %kind,
                    code = error.error_code(),
                    severity = severity.as_str(),
                    error = %error,
                    "attempt refused"
                );
                ActionEvent::Refused {
                    actor,
                    kind,
                    code: error.error_code().to_owned(),
                    severity,
                    reason: error.to_string(),
                    tick,
                }
            }
        };
        self.event_bus.publish(Event::Action(event));

        result
    }

    fn start_attempt(&mut self, actor: EntityId, kind: TimedActionKind) -> Result<ActionId> {
        // The newest request wins even when it is refused below.
        if let Some(previous) = self.engine.preempt(actor) {
            debug!(target: "runtime::worker", actor = %actor, previous = %previous, "attempt preempted");
        }
        let request = self.build_request(actor, kind)?;

        let mut env = Env::new(
            &self.world.actors,
            &self.sinks,
            &self.sinks,
            &self.sinks,
            &mut self.world.effects,
        );
        let action = self.engine.begin_attempt(&mut env, request)?;
        Ok(action)
    }

    /// Resolves the profile and duration for a request.
    ///
    /// Uncuff takes its duration from the worn restraint and is refused when
    /// the actor wears none.
    fn build_request(&self, actor: EntityId, kind: TimedActionKind) -> Result<AttemptRequest> {
        let profile = self
            .profiles
            .get(kind)
            .ok_or(RuntimeError::MissingProfile(kind))?;
        let fallback = profile
            .duration()
            .unwrap_or_else(|| self.config.default_duration());

        let duration = if kind == TimedActionKind::Uncuff {
            let restraint = self
                .world
                .effects
                .restraint(actor)
                .ok_or(RuntimeError::NotRestrained(actor))?;
            restraint.resist_time().unwrap_or(fallback)
        } else {
            fallback
        };

        Ok(AttemptRequest::from_profile(actor, profile).with_duration(duration))
    }

    fn query_actor(&self, actor: EntityId) -> Option<ActorView> {
        let mut view = self.world.view(actor)?;
        view.attempt = self.engine.action(actor).map(|action| AttemptView {
            action: action.id(),
            kind: action.kind(),
            elapsed_ms: action.elapsed().as_millis() as u64,
            duration_ms: action.duration().as_millis() as u64,
            cancel_requested: action.token().is_cancelled(),
        });
        Some(view)
    }

    fn tick(&mut self) {
        let mut env = Env::new(
            &self.world.actors,
            &self.sinks,
            &self.sinks,
            &self.sinks,
            &mut self.world.effects,
        );
        let outcomes = self.engine.tick(&mut env);

        for outcome in &outcomes {
            if let Some(event) = ActionEvent::from_outcome(outcome) {
                self.event_bus.publish(Event::Action(event));
            }
        }
    }
}
