//! Actor → live action bookkeeping.

use std::collections::BTreeMap;

use crate::action::TimedAction;
use crate::state::{ActionId, EntityId};

/// Maps each actor to at most one live [`TimedAction`].
///
/// The single-action invariant is enforced by preemption: registering a new
/// action for an actor first signals the previous action's token and moves it
/// to the superseded list, where it waits for the next tick to observe the
/// cancellation and release its resources.
///
/// Actions are kept in a `BTreeMap` so every tick visits actors in the same
/// order.
#[derive(Debug, Default)]
pub struct ActorActionRegistry {
    live: BTreeMap<EntityId, TimedAction>,
    superseded: Vec<TimedAction>,
}

impl ActorActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation on the actor's current action and retires its
    /// registry entry. Returns the id of the preempted action, if any.
    pub fn preempt(&mut self, actor: EntityId) -> Option<ActionId> {
        let previous = self.live.remove(&actor)?;
        previous.token().cancel();
        let id = previous.id();
        self.superseded.push(previous);
        Some(id)
    }

    /// Installs a new action, preempting a leftover entry for the same actor.
    pub(crate) fn register(&mut self, action: TimedAction) {
        let actor = action.actor();
        self.preempt(actor);
        self.live.insert(actor, action);
    }

    /// The actor's registered action, if any.
    pub fn get(&self, actor: EntityId) -> Option<&TimedAction> {
        self.live.get(&actor)
    }

    /// True while the actor has an action that is running and not asked to
    /// cancel.
    pub fn is_running(&self, actor: EntityId) -> bool {
        self.live.get(&actor).is_some_and(TimedAction::is_live)
    }

    /// Number of actions that have not reached a terminal state, superseded
    /// ones included.
    pub fn len(&self) -> usize {
        self.live.len() + self.superseded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.superseded.is_empty()
    }

    /// Number of preempted actions that have not yet observed cancellation.
    pub fn pending_cancellations(&self) -> usize {
        self.superseded.len()
    }

    /// Iterates over every action that has not reached a terminal state,
    /// superseded ones included.
    pub fn iter(&self) -> impl Iterator<Item = &TimedAction> + '_ {
        self.superseded.iter().chain(self.live.values())
    }

    /// Runs `keep` on every action, superseded first, dropping the ones for
    /// which it returns `false`.
    pub(crate) fn retain_mut(&mut self, mut keep: impl FnMut(&mut TimedAction) -> bool) {
        self.superseded.retain_mut(&mut keep);
        self.live.retain(|_, action| keep(action));
    }
}
