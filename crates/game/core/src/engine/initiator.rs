//! Entry point that turns a request into a running action.

use tracing::{debug, info};

use super::ActorActionRegistry;
use crate::action::{
    ActionMessages, AttemptError, AttemptRequest, CancellationToken, Snapshot, TimedAction,
    predicate,
};
use crate::env::Env;
use crate::error::ErrorContext;
use crate::state::{ActionId, Tick};

/// Starts attempts, preempting whatever the actor was already doing.
pub struct ActionRequestInitiator;

impl ActionRequestInitiator {
    /// Begins an attempt for `request.actor`.
    ///
    /// The actor's previous action (if any) is signalled first, so a refused
    /// request still cancels the old attempt: the newest request always wins.
    ///
    /// # Errors
    ///
    /// - [`AttemptError::InvalidDuration`] if the duration is zero
    /// - [`AttemptError::NotEligible`] if the actor is already in an
    ///   invalidating state (unconscious, slipping, gone, ...)
    pub fn begin_attempt(
        registry: &mut ActorActionRegistry,
        env: &mut Env<'_>,
        request: AttemptRequest,
        id: ActionId,
        now: Tick,
    ) -> Result<ActionId, AttemptError> {
        let actor = request.actor;
        let context = ErrorContext::new(now).with_actor(actor);

        if let Some(previous) = registry.preempt(actor) {
            debug!(
                target: "game_core::engine",
                actor = %actor,
                previous = %previous,
                "preempting running attempt"
            );
        }

        if request.duration.is_zero() {
            return Err(AttemptError::InvalidDuration {
                actor,
                kind: request.kind,
                context,
            });
        }

        let Some(live) = env.live.live_state(actor) else {
            return Err(AttemptError::NotEligible {
                actor,
                reasons: predicate::Invalidation::MISSING,
                context,
            });
        };

        let snapshot = Snapshot::capture(&live, now);
        let reasons = predicate::evaluate(&snapshot, Some(&live));
        if !reasons.is_valid() {
            return Err(AttemptError::NotEligible {
                actor,
                reasons,
                context,
            });
        }

        let duration = request.duration;
        let kind = request.kind;
        let start_self = request.messages.start_self.clone();
        let start_others = request.messages.start_others.clone();

        let progress = env.progress.start(actor, id, duration);
        registry.register(TimedAction::start(
            id,
            request,
            snapshot,
            CancellationToken::new(),
            progress,
        ));

        let name = env.actor_name(actor);
        env.notifier.notify(
            actor,
            &ActionMessages::render(&start_self, &name, duration),
            &ActionMessages::render(&start_others, &name, duration),
        );

        info!(
            target: "game_core::engine",
            actor = %actor,
            action = %id,
            kind = %kind,
            duration_ms = duration.as_millis() as u64,
            "attempt started"
        );

        Ok(id)
    }
}
