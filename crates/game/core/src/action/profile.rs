//! Static description of a timed action: how long it takes and what it says.

use std::time::Duration;

use super::TimedActionKind;

/// Message templates shown when an action starts and when it completes.
///
/// Each pair carries distinct text for the acting player and for observers.
/// Templates may contain `{actor}` (display name of the actor) and
/// `{duration}` (configured duration in seconds).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionMessages {
    pub start_self: String,
    pub start_others: String,
    pub success_self: String,
    pub success_others: String,
}

impl ActionMessages {
    /// Substitutes the `{actor}` and `{duration}` placeholders.
    pub fn render(template: &str, actor_name: &str, duration: Duration) -> String {
        template
            .replace("{actor}", actor_name)
            .replace("{duration}", &format!("{}", duration.as_secs_f32()))
    }
}

/// Data-driven profile for one [`TimedActionKind`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProfile {
    pub kind: TimedActionKind,

    /// Default duration in seconds. Restraints and requests may override it.
    pub duration_secs: f32,

    pub messages: ActionMessages,

    /// Sound cue played at the actor's cell on completion.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound: Option<String>,
}

impl ActionProfile {
    /// Returns the configured duration, or `None` if it is zero, negative or
    /// not a finite number.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_from_secs_f32(self.duration_secs)
            .ok()
            .filter(|duration| !duration.is_zero())
    }

    /// Built-in profile for the uncuff attempt.
    pub fn uncuff() -> Self {
        Self {
            kind: TimedActionKind::Uncuff,
            duration_secs: 30.0,
            messages: ActionMessages {
                start_self:
                    "You are attempting to remove the cuffs. This takes up to {duration} seconds"
                        .into(),
                start_others: "{actor} is attempting to remove their cuffs".into(),
                success_self: "You have successfully removed the cuffs".into(),
                success_others: "{actor} has removed their cuffs".into(),
            },
            sound: Some("Handcuffs".into()),
        }
    }
}
