//! Scripted attempts played against the runtime.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use game_core::{Consciousness, EntityId, LiveState, Position, TimedActionKind};
use runtime::{ActorSpec, Restraint, RuntimeHandle, TickMode};

const PRISONER: EntityId = EntityId(1);
const RESIST_SECS: f32 = 30.0;

/// Which script to play. Selected with `SIM_SCENARIO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Scenario {
    /// The prisoner stays still and slips the cuffs.
    #[default]
    Complete,
    /// The prisoner is hit five seconds in.
    Interrupt,
    /// The prisoner starts over three seconds in.
    Retrigger,
    /// The prisoner is knocked out before trying.
    Unconscious,
}

impl Scenario {
    pub fn from_env() -> Self {
        std::env::var("SIM_SCENARIO")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Plays a scenario, waiting on the runtime clock in either tick mode.
pub struct Director {
    handle: RuntimeHandle,
    tick: Duration,
    mode: TickMode,
}

impl Director {
    pub fn new(handle: RuntimeHandle, tick: Duration, mode: TickMode) -> Self {
        Self { handle, tick, mode }
    }

    pub async fn play(&self, scenario: Scenario) -> Result<()> {
        info!(scenario = %scenario, "playing scenario");

        let live = LiveState::new(100.0, Position::new(3, 7));
        let live = if scenario == Scenario::Unconscious {
            live.with_consciousness(Consciousness::Unconscious)
        } else {
            live
        };
        self.handle
            .spawn_actor(
                ActorSpec::new(PRISONER, "Prisoner", live)
                    .restrained(Restraint::handcuffs().with_resist_time(RESIST_SECS)),
            )
            .await?;

        let resist = Duration::from_secs_f32(RESIST_SECS);
        match scenario {
            Scenario::Complete => {
                self.begin().await?;
                self.wait(resist).await?;
            }
            Scenario::Interrupt => {
                self.begin().await?;
                self.wait(Duration::from_secs(5)).await?;
                self.handle
                    .update_actor(PRISONER, LiveState { vital: 85.0, ..live })
                    .await?;
                self.wait(Duration::ZERO).await?;
            }
            Scenario::Retrigger => {
                self.begin().await?;
                self.wait(Duration::from_secs(3)).await?;
                self.begin().await?;
                self.wait(resist).await?;
            }
            Scenario::Unconscious => {
                // The refusal is reported as an event.
                let _ = self.begin().await;
            }
        }

        if let Some(view) = self.handle.query_actor(PRISONER).await? {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Ok(())
    }

    async fn begin(&self) -> Result<()> {
        self.handle
            .begin_attempt(PRISONER, TimedActionKind::Uncuff)
            .await?;
        Ok(())
    }

    /// Lets `span` of game time pass, plus the tick that observes it.
    async fn wait(&self, span: Duration) -> Result<()> {
        let ticks = span.as_nanos().div_ceil(self.tick.as_nanos().max(1)) as u64 + 1;
        match self.mode {
            TickMode::Manual => {
                self.handle.advance(ticks).await?;
            }
            TickMode::Interval => {
                let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
                tokio::time::sleep(self.tick.saturating_mul(ticks)).await;
            }
        }
        Ok(())
    }
}
