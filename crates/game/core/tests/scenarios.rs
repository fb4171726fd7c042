mod common;

use common::{Harness, ProgressEvent, secs};
use game_core::{
    ActionMessages, ActionProfile, ActionState, AttemptError, AttemptRequest, Consciousness,
    EntityId, ErrorContext, ErrorSeverity, GameError, Invalidation, LiveState, Position, Tick,
    TimedActionKind,
};

const ACTOR: EntityId = EntityId(1);

fn harness_with_actor() -> Harness {
    let mut harness = Harness::new();
    harness.spawn(ACTOR, LiveState::new(100.0, Position::new(2, 3)));
    harness.world.names.insert(ACTOR, "Urist".into());
    harness
}

#[test]
fn stable_attempt_completes_after_duration() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).expect("attempt should start");
    assert!(h.engine.is_running(ACTOR));

    let outcome = h.run_until_outcome(ACTOR, 100).expect("attempt should finish");

    assert_eq!(outcome.id, id);
    assert_eq!(outcome.state, ActionState::Completed);
    assert!(outcome.elapsed >= secs(30));
    assert_eq!(outcome.tick, Tick(31));
    assert!(!h.engine.is_running(ACTOR));
    assert!(h.engine.action(ACTOR).is_none());

    assert_eq!(h.effects.applied, vec![(ACTOR, TimedActionKind::Uncuff)]);
    assert_eq!(
        h.recorder.sounds.borrow().as_slice(),
        &[("Handcuffs".to_string(), Position::new(2, 3))]
    );
    assert_eq!(
        h.progress.events(),
        vec![ProgressEvent::Started(id), ProgressEvent::Retired(id)]
    );

    let notes = h.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(
        notes[0].self_message,
        "You are attempting to remove the cuffs. This takes up to 30 seconds"
    );
    assert_eq!(notes[0].others_message, "Urist is attempting to remove their cuffs");
    assert_eq!(notes[1].self_message, "You have successfully removed the cuffs");
    assert_eq!(notes[1].others_message, "Urist has removed their cuffs");
}

#[test]
fn vital_change_interrupts_and_freezes_elapsed() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).unwrap();

    for _ in 0..5 {
        assert!(h.tick().is_empty());
    }
    assert_eq!(h.engine.action(ACTOR).unwrap().elapsed(), secs(5));

    h.live_mut(ACTOR).vital = 95.0;
    let outcomes = h.tick();

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert_eq!(outcome.id, id);
    assert_eq!(outcome.state, ActionState::Interrupted);
    assert_eq!(outcome.elapsed, secs(5));
    assert_eq!(outcome.reasons, Invalidation::VITAL_CHANGED);

    assert!(h.effects.applied.is_empty());
    assert_eq!(
        h.progress.events(),
        vec![ProgressEvent::Started(id), ProgressEvent::Interrupted(id)]
    );
    // Only the start notification was sent.
    assert_eq!(h.notes().len(), 1);

    for _ in 0..40 {
        assert!(h.tick().is_empty());
    }
    assert!(h.effects.applied.is_empty());
}

#[test]
fn retrigger_cancels_previous_attempt_and_starts_fresh() {
    let mut h = harness_with_actor();
    let first = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    for _ in 0..3 {
        h.tick();
    }

    let second = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    assert_ne!(first, second);

    let current = h.engine.action(ACTOR).unwrap();
    assert_eq!(current.id(), second);
    assert_eq!(current.elapsed(), secs(0));
    assert_eq!(h.engine.registry().pending_cancellations(), 1);
    assert_eq!(
        h.engine.registry().iter().filter(|a| a.is_live()).count(),
        1,
        "only the newest attempt is live"
    );

    let outcomes = h.tick();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].id, first);
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
    assert_eq!(outcomes[0].elapsed, secs(3));
    assert_eq!(h.engine.registry().pending_cancellations(), 0);

    // Cancellation is silent: two start notes, nothing else.
    assert_eq!(h.notes().len(), 2);
    assert_eq!(h.progress.releases(first), 1);
    assert!(h.progress.events().contains(&ProgressEvent::Retired(first)));

    let outcome = h.run_until_outcome(ACTOR, 100).unwrap();
    assert_eq!(outcome.id, second);
    assert_eq!(outcome.state, ActionState::Completed);
    assert_eq!(h.effects.applied.len(), 1);
}

#[test]
fn unconscious_actor_is_not_eligible() {
    let mut h = harness_with_actor();
    h.live_mut(ACTOR).consciousness = Consciousness::Unconscious;

    let err = h.begin_uncuff(ACTOR, secs(30)).unwrap_err();
    match err {
        AttemptError::NotEligible { actor, reasons, .. } => {
            assert_eq!(actor, ACTOR);
            assert_eq!(reasons, Invalidation::UNCONSCIOUS);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(h.engine.action(ACTOR).is_none());
    assert!(h.engine.registry().is_empty());
    assert!(h.progress.events().is_empty());
    assert!(h.notes().is_empty());
}

#[test]
fn slipping_or_missing_actors_are_not_eligible() {
    let mut h = harness_with_actor();
    h.live_mut(ACTOR).motion_locked = true;
    assert!(matches!(
        h.begin_uncuff(ACTOR, secs(30)),
        Err(AttemptError::NotEligible { reasons, .. }) if reasons == Invalidation::MOTION_LOCKED
    ));

    assert!(matches!(
        h.begin_uncuff(EntityId(42), secs(30)),
        Err(AttemptError::NotEligible { reasons, .. }) if reasons == Invalidation::MISSING
    ));
}

#[test]
fn zero_duration_is_refused() {
    let mut h = harness_with_actor();
    assert!(matches!(
        h.begin_uncuff(ACTOR, secs(0)),
        Err(AttemptError::InvalidDuration { kind: TimedActionKind::Uncuff, .. })
    ));

    let mut broken = ActionProfile::uncuff();
    broken.duration_secs = -1.0;
    let request = AttemptRequest::from_profile(ACTOR, &broken);
    assert!(matches!(
        h.begin(request),
        Err(AttemptError::InvalidDuration { .. })
    ));
    assert!(h.engine.registry().is_empty());
}

#[test]
fn elapsed_is_monotonic_while_running() {
    let mut h = harness_with_actor();
    h.begin_uncuff(ACTOR, secs(10)).unwrap();

    let mut previous = secs(0);
    while let Some(action) = h.engine.action(ACTOR) {
        let elapsed = action.elapsed();
        assert!(elapsed >= previous);
        previous = elapsed;
        h.tick();
    }
    assert_eq!(previous, secs(10));
}

#[test]
fn invalidation_is_observed_on_the_same_tick() {
    let mut h = harness_with_actor();
    h.begin_uncuff(ACTOR, secs(30)).unwrap();
    for _ in 0..7 {
        h.tick();
    }

    h.live_mut(ACTOR).position = Position::new(2, 4);
    let outcomes = h.tick();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].state, ActionState::Interrupted);
    assert_eq!(outcomes[0].tick, Tick(8));
    assert_eq!(outcomes[0].reasons, Invalidation::MOVED);
}

#[test]
fn invalidation_beats_completion_on_the_same_tick() {
    let mut h = harness_with_actor();
    h.begin_uncuff(ACTOR, secs(3)).unwrap();
    for _ in 0..3 {
        assert!(h.tick().is_empty());
    }
    // The next tick would complete the attempt.
    assert_eq!(h.engine.action(ACTOR).unwrap().elapsed(), secs(3));

    h.live_mut(ACTOR).consciousness = Consciousness::Dead;
    let outcomes = h.tick();

    assert_eq!(outcomes[0].state, ActionState::Interrupted);
    assert_eq!(outcomes[0].reasons, Invalidation::DEAD);
    assert!(h.effects.applied.is_empty());
    assert!(h.recorder.sounds.borrow().is_empty());
}

#[test]
fn cancellation_takes_effect_on_the_next_tick() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    for _ in 0..4 {
        h.tick();
    }

    assert!(h.engine.request_cancel(ACTOR));
    assert!(!h.engine.request_cancel(ACTOR), "second request is a no-op");

    // Signalling never acts synchronously.
    let action = h.engine.action(ACTOR).unwrap();
    assert_eq!(action.state(), ActionState::Running);
    assert!(!h.engine.is_running(ACTOR));

    let outcomes = h.tick();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].id, id);
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
    assert_eq!(outcomes[0].tick, Tick(5));
    assert_eq!(outcomes[0].elapsed, secs(4));
    assert_eq!(h.progress.releases(id), 1);
    assert!(h.effects.applied.is_empty());
}

#[test]
fn external_token_cancels_like_request_cancel() {
    let mut h = harness_with_actor();
    h.begin_uncuff(ACTOR, secs(30)).unwrap();
    let token = h.engine.token(ACTOR).unwrap();

    token.cancel();
    token.cancel();

    let outcomes = h.tick();
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
}

#[test]
fn cancellation_wins_over_invalidation() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    h.tick();

    h.engine.request_cancel(ACTOR);
    h.live_mut(ACTOR).vital = 1.0;

    let outcomes = h.tick();
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
    assert_eq!(h.progress.events().last(), Some(&ProgressEvent::Retired(id)));
}

#[test]
fn refused_retrigger_still_preempts() {
    let mut h = harness_with_actor();
    let first = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    h.tick();

    h.live_mut(ACTOR).motion_locked = true;
    assert!(h.begin_uncuff(ACTOR, secs(30)).is_err());
    assert!(h.engine.action(ACTOR).is_none());

    let outcomes = h.tick();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].id, first);
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
}

#[test]
fn actors_tick_independently() {
    let other = EntityId(2);
    let mut h = harness_with_actor();
    h.spawn(other, LiveState::new(50.0, Position::new(9, 9)));

    h.begin_uncuff(ACTOR, secs(5)).unwrap();
    h.begin_uncuff(other, secs(5)).unwrap();
    assert!(h.engine.is_running(ACTOR));
    assert!(h.engine.is_running(other));

    h.tick();
    h.live_mut(other).motion_locked = true;
    let outcomes = h.tick();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].actor, other);
    assert_eq!(outcomes[0].state, ActionState::Interrupted);

    let outcome = h.run_until_outcome(ACTOR, 20).unwrap();
    assert_eq!(outcome.state, ActionState::Completed);
    assert_eq!(h.effects.applied, vec![(ACTOR, TimedActionKind::Uncuff)]);
}

#[test]
fn at_most_one_live_attempt_per_actor_across_retriggers() {
    let mut h = harness_with_actor();
    for round in 0..6 {
        h.begin_uncuff(ACTOR, secs(30)).unwrap();
        let live = h
            .engine
            .registry()
            .iter()
            .filter(|a| a.actor() == ACTOR && a.is_live())
            .count();
        assert_eq!(live, 1, "round {round}");
        if round % 2 == 0 {
            h.tick();
        }
    }
    h.tick();
    assert_eq!(h.engine.registry().pending_cancellations(), 0);
    assert_eq!(h.engine.registry().len(), 1);
}

#[test]
fn dropping_the_engine_retires_running_handles() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    h.tick();

    let progress = h.progress.clone();
    drop(h);

    assert_eq!(progress.releases(id), 1);
    assert_eq!(progress.events().last(), Some(&ProgressEvent::Retired(id)));
}

#[test]
fn tool_profiles_use_their_own_messages() {
    let mut h = harness_with_actor();
    let profile = ActionProfile {
        kind: TimedActionKind::SecureWindow,
        duration_secs: 4.0,
        messages: ActionMessages {
            start_self: "You start securing the window...".into(),
            start_others: "{actor} starts securing the window...".into(),
            success_self: "You secure the window.".into(),
            success_others: "{actor} secures the window.".into(),
        },
        sound: None,
    };

    h.begin(AttemptRequest::from_profile(ACTOR, &profile)).unwrap();
    let outcome = h.run_until_outcome(ACTOR, 10).unwrap();

    assert_eq!(outcome.state, ActionState::Completed);
    assert_eq!(outcome.elapsed, secs(4));
    assert_eq!(h.effects.applied, vec![(ACTOR, TimedActionKind::SecureWindow)]);
    assert!(h.recorder.sounds.borrow().is_empty());
    assert_eq!(h.notes()[1].others_message, "Urist secures the window.");
}

#[test]
fn unnamed_actor_is_shown_by_id() {
    let mut h = Harness::new();
    h.spawn(ACTOR, LiveState::new(100.0, Position::new(2, 3)));

    h.begin_uncuff(ACTOR, secs(2)).unwrap();
    h.run_until_outcome(ACTOR, 10).unwrap();

    let notes = h.notes();
    assert_eq!(notes[0].others_message, "#1 is attempting to remove their cuffs");
    assert_eq!(notes[1].others_message, "#1 has removed their cuffs");
}

#[test]
fn refusals_report_severity_and_context() {
    let mut h = harness_with_actor();
    h.tick();
    h.tick();
    h.live_mut(ACTOR).consciousness = Consciousness::Dead;

    let err = h.begin_uncuff(ACTOR, secs(30)).unwrap_err();
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    assert_eq!(err.error_code(), "ATTEMPT_NOT_ELIGIBLE");
    assert_eq!(
        err.context(),
        Some(&ErrorContext::new(Tick(2)).with_actor(ACTOR))
    );

    h.live_mut(ACTOR).consciousness = Consciousness::Conscious;
    let err = h.begin_uncuff(ACTOR, secs(0)).unwrap_err();
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(err.severity().as_str(), "validation");
    assert_eq!(err.error_code(), "ATTEMPT_INVALID_DURATION");
}

#[test]
fn host_preemption_cancels_on_next_tick() {
    let mut h = harness_with_actor();
    let id = h.begin_uncuff(ACTOR, secs(30)).unwrap();
    h.tick();

    assert_eq!(h.engine.preempt(ACTOR), Some(id));
    assert!(!h.engine.is_running(ACTOR));
    assert!(h.engine.action(ACTOR).is_none());
    assert_eq!(h.engine.preempt(ACTOR), None);

    let outcomes = h.tick();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].id, id);
    assert_eq!(outcomes[0].state, ActionState::Cancelled);
    assert_eq!(outcomes[0].elapsed, secs(1));
    assert_eq!(h.progress.releases(id), 1);
    assert!(h.engine.registry().is_empty());
}
