/// Kinds of timed actions the engine knows how to run.
///
/// The kind selects the profile (duration, messages, sound cue) and is passed
/// to the terminal-effect sink so the host can apply the matching effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TimedActionKind {
    /// Struggle out of worn restraints.
    Uncuff,
    /// Screw a loose window pane to the floor.
    SecureWindow,
    /// Unscrew an anchored window pane.
    UnsecureWindow,
    /// Take a loose window pane apart.
    DisassembleWindow,
}

impl TimedActionKind {
    pub const ALL: [Self; 4] = [
        Self::Uncuff,
        Self::SecureWindow,
        Self::UnsecureWindow,
        Self::DisassembleWindow,
    ];
}
