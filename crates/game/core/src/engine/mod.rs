//! Attempt scheduling and the tick pipeline.
//!
//! The [`ActionEngine`] is the authoritative owner of every timed action. It
//! ties together the [`ActorActionRegistry`], the [`ActionRequestInitiator`]
//! and the [`TimedActionExecutor`]. Hosts call [`ActionEngine::begin_attempt`]
//! when a player asks for an action and [`ActionEngine::tick`] once per
//! scheduling interval; everything else is observed through the collaborators
//! in [`Env`].

mod executor;
mod initiator;
mod registry;

pub use executor::TimedActionExecutor;
pub use initiator::ActionRequestInitiator;
pub use registry::ActorActionRegistry;

use crate::action::{ActionOutcome, AttemptError, AttemptRequest, CancellationToken, TimedAction};
use crate::config::ActionConfig;
use crate::env::Env;
use crate::state::{ActionId, EntityId, Tick};

/// Single-threaded engine that owns all running timed actions.
///
/// Multiple actors' actions tick independently; the registry entry is the
/// only state shared between a new request and a running action.
#[derive(Debug)]
pub struct ActionEngine {
    registry: ActorActionRegistry,
    executor: TimedActionExecutor,
    last_id: ActionId,
}

impl ActionEngine {
    pub fn new(config: &ActionConfig) -> Self {
        Self {
            registry: ActorActionRegistry::new(),
            executor: TimedActionExecutor::new(config.tick_interval()),
            last_id: ActionId::default(),
        }
    }

    /// Starts an attempt, preempting any attempt the actor already has.
    ///
    /// # Errors
    ///
    /// See [`ActionRequestInitiator::begin_attempt`]. No action exists for
    /// the actor after an error.
    pub fn begin_attempt(
        &mut self,
        env: &mut Env<'_>,
        request: AttemptRequest,
    ) -> Result<ActionId, AttemptError> {
        let id = self.last_id.next();
        let started = ActionRequestInitiator::begin_attempt(
            &mut self.registry,
            env,
            request,
            id,
            self.executor.clock(),
        )?;
        self.last_id = id;
        Ok(started)
    }

    /// Requests cancellation of the actor's running attempt.
    ///
    /// Takes effect at the start of the next tick. Returns `true` if the
    /// request raised the flag, `false` if there was nothing to cancel or it
    /// was already raised.
    pub fn request_cancel(&self, actor: EntityId) -> bool {
        self.registry
            .get(actor)
            .is_some_and(|action| action.token().cancel())
    }

    /// Signals the actor's attempt to cancel and takes it off the live map,
    /// as a new request would. It reports `Cancelled` on the next tick.
    ///
    /// For hosts that refuse a request before it reaches
    /// [`ActionEngine::begin_attempt`].
    pub fn preempt(&mut self, actor: EntityId) -> Option<ActionId> {
        self.registry.preempt(actor)
    }

    /// Clone of the actor's cancellation token, for callers that cancel from
    /// elsewhere.
    pub fn token(&self, actor: EntityId) -> Option<CancellationToken> {
        self.registry.get(actor).map(|action| action.token().clone())
    }

    /// Advances every running attempt by one tick.
    pub fn tick(&mut self, env: &mut Env<'_>) -> Vec<ActionOutcome> {
        self.executor.tick(&mut self.registry, env)
    }

    /// True while the actor has an attempt in flight that has not been asked
    /// to cancel.
    pub fn is_running(&self, actor: EntityId) -> bool {
        self.registry.is_running(actor)
    }

    /// The actor's registered attempt.
    pub fn action(&self, actor: EntityId) -> Option<&TimedAction> {
        self.registry.get(actor)
    }

    pub fn registry(&self) -> &ActorActionRegistry {
        &self.registry
    }

    /// Number of ticks executed so far.
    pub fn clock(&self) -> Tick {
        self.executor.clock()
    }
}
