use std::time::Duration;

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionConfig {
    /// Wall-clock length of one scheduling tick, in milliseconds.
    ///
    /// This is also the `elapsed` increment applied to every running action
    /// that survives a tick.
    pub tick_interval_ms: u64,

    /// Duration used when neither the action profile nor the request carries
    /// one, in milliseconds.
    pub default_duration_ms: u64,
}

impl ActionConfig {
    // ===== runtime-tunable defaults =====
    /// Roughly one rendered frame at 60 Hz.
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;
    pub const DEFAULT_DURATION_MS: u64 = 30_000;

    pub fn new() -> Self {
        Self {
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            default_duration_ms: Self::DEFAULT_DURATION_MS,
        }
    }

    pub fn with_tick_interval(tick_interval: Duration) -> Self {
        Self {
            tick_interval_ms: tick_interval.as_millis() as u64,
            ..Self::new()
        }
    }

    /// Tick length as a [`Duration`]. Never zero.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tick_interval_is_clamped() {
        let config = ActionConfig {
            tick_interval_ms: 0,
            ..ActionConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn with_tick_interval_keeps_default_duration() {
        let config = ActionConfig::with_tick_interval(Duration::from_secs(1));
        assert_eq!(config.tick_interval_ms, 1_000);
        assert_eq!(config.default_duration(), Duration::from_secs(30));
    }
}
