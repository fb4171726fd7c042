//! Simulated world the worker exposes to the engine.
//!
//! The world is split in two tables so the engine can read live state and
//! apply terminal effects in the same call: [`ActorTable`] answers the
//! live-state queries and [`EffectTable`] owns everything a completed action
//! can change.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use game_core::{ActionId, EntityId, LiveState, LiveStateOracle, TerminalEffect, TimedActionKind};

/// Restraint worn by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restraint {
    pub name: String,

    /// Seconds needed to struggle free. `None` uses the uncuff profile.
    #[serde(default)]
    pub resist_time_secs: Option<f32>,
}

impl Restraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resist_time_secs: None,
        }
    }

    pub fn handcuffs() -> Self {
        Self::new("handcuffs")
    }

    #[must_use]
    pub fn with_resist_time(mut self, secs: f32) -> Self {
        self.resist_time_secs = Some(secs);
        self
    }

    /// Resist time as a duration, ignoring unusable values.
    pub fn resist_time(&self) -> Option<Duration> {
        self.resist_time_secs
            .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
            .filter(|duration| !duration.is_zero())
    }
}

/// Everything needed to place an actor in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub id: EntityId,
    pub name: String,
    pub live: LiveState,
    #[serde(default)]
    pub restraint: Option<Restraint>,
}

impl ActorSpec {
    pub fn new(id: EntityId, name: impl Into<String>, live: LiveState) -> Self {
        Self {
            id,
            name: name.into(),
            live,
            restraint: None,
        }
    }

    #[must_use]
    pub fn restrained(mut self, restraint: Restraint) -> Self {
        self.restraint = Some(restraint);
        self
    }
}

/// Read-only view of an actor returned by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: EntityId,
    pub name: String,
    pub live: LiveState,
    pub restraint: Option<Restraint>,
    /// Kinds of actions this actor has completed, oldest first.
    pub completed: Vec<TimedActionKind>,
    pub attempt: Option<AttemptView>,
}

/// The actor's registered attempt at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptView {
    pub action: ActionId,
    pub kind: TimedActionKind,
    pub elapsed_ms: u64,
    pub duration_ms: u64,
    pub cancel_requested: bool,
}

#[derive(Debug, Clone)]
struct ActorEntry {
    name: String,
    live: LiveState,
}

/// Live state and names of every spawned actor.
#[derive(Debug, Default)]
pub struct ActorTable {
    actors: HashMap<EntityId, ActorEntry>,
}

impl ActorTable {
    pub fn contains(&self, actor: EntityId) -> bool {
        self.actors.contains_key(&actor)
    }

    fn insert(&mut self, actor: EntityId, name: String, live: LiveState) {
        self.actors.insert(actor, ActorEntry { name, live });
    }

    fn update(&mut self, actor: EntityId, live: LiveState) -> bool {
        match self.actors.get_mut(&actor) {
            Some(entry) => {
                entry.live = live;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, actor: EntityId) -> bool {
        self.actors.remove(&actor).is_some()
    }
}

impl LiveStateOracle for ActorTable {
    fn live_state(&self, actor: EntityId) -> Option<LiveState> {
        self.actors.get(&actor).map(|entry| entry.live)
    }

    fn display_name(&self, actor: EntityId) -> Option<String> {
        self.actors.get(&actor).map(|entry| entry.name.clone())
    }
}

/// State changed by completed actions.
#[derive(Debug, Default)]
pub struct EffectTable {
    restraints: HashMap<EntityId, Restraint>,
    completed: HashMap<EntityId, Vec<TimedActionKind>>,
}

impl EffectTable {
    pub fn restraint(&self, actor: EntityId) -> Option<&Restraint> {
        self.restraints.get(&actor)
    }

    pub fn completed(&self, actor: EntityId) -> &[TimedActionKind] {
        self.completed.get(&actor).map(Vec::as_slice).unwrap_or_default()
    }
}

impl TerminalEffect for EffectTable {
    fn apply_effect(&mut self, actor: EntityId, kind: TimedActionKind) {
        if kind == TimedActionKind::Uncuff
            && let Some(restraint) = self.restraints.remove(&actor)
        {
            info!(
                target: "runtime::world",
                actor = %actor,
                restraint = %restraint.name,
                "restraint removed"
            );
        }
        debug!(target: "runtime::world", actor = %actor, kind = %kind, "effect applied");
        self.completed.entry(actor).or_default().push(kind);
    }
}

/// Actor and effect tables owned by the worker.
#[derive(Debug, Default)]
pub struct World {
    pub actors: ActorTable,
    pub effects: EffectTable,
}

impl World {
    /// Places a new actor. Returns `false` if the id is taken.
    pub fn spawn(&mut self, spec: ActorSpec) -> bool {
        if self.actors.contains(spec.id) {
            return false;
        }
        if let Some(restraint) = spec.restraint {
            self.effects.restraints.insert(spec.id, restraint);
        }
        self.actors.insert(spec.id, spec.name, spec.live);
        true
    }

    /// Replaces an actor's live state. Returns `false` for unknown actors.
    pub fn update(&mut self, actor: EntityId, live: LiveState) -> bool {
        self.actors.update(actor, live)
    }

    /// Removes an actor. Its restraint goes with it.
    pub fn despawn(&mut self, actor: EntityId) -> bool {
        self.effects.restraints.remove(&actor);
        self.actors.remove(actor)
    }

    /// Builds a view of the actor without its attempt.
    pub fn view(&self, actor: EntityId) -> Option<ActorView> {
        let entry = self.actors.actors.get(&actor)?;
        Some(ActorView {
            id: actor,
            name: entry.name.clone(),
            live: entry.live,
            restraint: self.effects.restraint(actor).cloned(),
            completed: self.effects.completed(actor).to_vec(),
            attempt: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncuff_effect_removes_restraint_only() {
        let mut world = World::default();
        let actor = EntityId(1);
        assert!(world.spawn(
            ActorSpec::new(actor, "Urist", LiveState::default()).restrained(Restraint::handcuffs())
        ));

        world.effects.apply_effect(actor, TimedActionKind::SecureWindow);
        assert!(world.effects.restraint(actor).is_some());

        world.effects.apply_effect(actor, TimedActionKind::Uncuff);
        assert!(world.effects.restraint(actor).is_none());
        assert_eq!(
            world.effects.completed(actor),
            &[TimedActionKind::SecureWindow, TimedActionKind::Uncuff]
        );
    }

    #[test]
    fn spawn_refuses_duplicate_ids() {
        let mut world = World::default();
        let spec = ActorSpec::new(EntityId(5), "A", LiveState::default());
        assert!(world.spawn(spec.clone()));
        assert!(!world.spawn(spec));
    }

    #[test]
    fn despawned_actor_has_no_live_state() {
        let mut world = World::default();
        world.spawn(ActorSpec::new(EntityId(2), "B", LiveState::default()));
        assert!(world.actors.live_state(EntityId(2)).is_some());

        assert!(world.despawn(EntityId(2)));
        assert!(world.actors.live_state(EntityId(2)).is_none());
        assert!(world.view(EntityId(2)).is_none());
    }

    #[test]
    fn resist_time_ignores_unusable_values() {
        assert_eq!(Restraint::handcuffs().resist_time(), None);
        assert_eq!(
            Restraint::handcuffs().with_resist_time(12.0).resist_time(),
            Some(Duration::from_secs(12))
        );
        assert_eq!(Restraint::handcuffs().with_resist_time(0.0).resist_time(), None);
        assert_eq!(Restraint::handcuffs().with_resist_time(-3.0).resist_time(), None);
    }
}
