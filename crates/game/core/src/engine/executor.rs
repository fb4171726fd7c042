//! Tick-driven state machine for running actions.

use std::time::Duration;

use tracing::{debug, info, trace};

use super::ActorActionRegistry;
use crate::action::{ActionMessages, ActionOutcome, ActionState, Invalidation, TimedAction, predicate};
use crate::env::Env;
use crate::state::Tick;

/// Advances every running action by one scheduling tick.
///
/// Per action and per tick, in this order:
/// 1. cancellation requested → `Cancelled` (silent, handle retired)
/// 2. invalidation predicate holds → `Interrupted` (handle interrupted,
///    `elapsed` frozen)
/// 3. `elapsed >= duration` → `Completed` (effect, notification, sound,
///    handle retired)
/// 4. otherwise `elapsed += tick_delta`
///
/// Because invalidation is checked before completion, an action that breaks
/// on the tick it would have completed ends `Interrupted`.
#[derive(Debug)]
pub struct TimedActionExecutor {
    tick_delta: Duration,
    clock: Tick,
}

impl TimedActionExecutor {
    pub fn new(tick_delta: Duration) -> Self {
        Self {
            tick_delta,
            clock: Tick::ZERO,
        }
    }

    /// Number of ticks executed so far.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Runs one tick over every action in the registry and returns the
    /// terminal transitions it produced. Terminal actions are removed.
    pub fn tick(
        &mut self,
        registry: &mut ActorActionRegistry,
        env: &mut Env<'_>,
    ) -> Vec<ActionOutcome> {
        self.clock = self.clock + 1;
        let now = self.clock;
        let delta = self.tick_delta;
        let mut outcomes = Vec::new();

        registry.retain_mut(|action| match Self::step(action, env, delta, now) {
            Some(outcome) => {
                outcomes.push(outcome);
                false
            }
            None => true,
        });

        trace!(
            target: "game_core::engine",
            tick = %now,
            transitions = outcomes.len(),
            "tick complete"
        );
        outcomes
    }

    /// Advances a single action. Returns the outcome if it became terminal.
    fn step(
        action: &mut TimedAction,
        env: &mut Env<'_>,
        delta: Duration,
        now: Tick,
    ) -> Option<ActionOutcome> {
        if action.token().is_cancelled() {
            if let Some(handle) = action.finish(ActionState::Cancelled) {
                handle.retire();
            }
            debug!(
                target: "game_core::engine",
                actor = %action.actor(),
                action = %action.id(),
                elapsed_ms = action.elapsed().as_millis() as u64,
                "attempt cancelled"
            );
            return Some(action.outcome(Invalidation::empty(), now));
        }

        let live = env.live.live_state(action.actor());
        let reasons = predicate::evaluate(action.snapshot(), live.as_ref());
        if !reasons.is_valid() {
            if let Some(handle) = action.finish(ActionState::Interrupted) {
                handle.interrupt();
            }
            info!(
                target: "game_core::engine",
                actor = %action.actor(),
                action = %action.id(),
                reasons = %reasons,
                elapsed_ms = action.elapsed().as_millis() as u64,
                "attempt interrupted"
            );
            return Some(action.outcome(reasons, now));
        }

        if action.elapsed() >= action.duration() {
            Self::complete(action, env);
            return Some(action.outcome(Invalidation::empty(), now));
        }

        action.advance(delta);
        None
    }

    fn complete(action: &mut TimedAction, env: &mut Env<'_>) {
        let actor = action.actor();
        env.effects.apply_effect(actor, action.kind());

        let name = env.actor_name(actor);
        let messages = action.messages();
        env.notifier.notify(
            actor,
            &ActionMessages::render(&messages.success_self, &name, action.duration()),
            &ActionMessages::render(&messages.success_others, &name, action.duration()),
        );

        if let Some(sound) = action.sound() {
            // The predicate just passed, so the actor is still on the snapshot cell.
            env.audio.play_at(sound, action.snapshot().position());
        }

        if let Some(handle) = action.finish(ActionState::Completed) {
            handle.retire();
        }

        info!(
            target: "game_core::engine",
            actor = %actor,
            action = %action.id(),
            kind = %action.kind(),
            elapsed_ms = action.elapsed().as_millis() as u64,
            "attempt completed"
        );
    }
}
