//! Uncuff simulator binary.
//!
//! Composition root that loads `.env`, sets up logging, builds the runtime
//! and plays a scripted attempt, printing every runtime event as a JSON line.
//!
//! # Environment
//!
//! - `SIM_SCENARIO`: `complete` (default), `interrupt`, `retrigger`, `unconscious`
//! - `SESSION_ID`: log session directory name
//! - `TICK_MODE`, `TICK_INTERVAL_MS`, `EVENT_BUFFER_SIZE`,
//!   `COMMAND_BUFFER_SIZE`, `ACTION_CONFIG_PATH`: see [`runtime::RuntimeConfig`]
//!
//! # Examples
//!
//! ```bash
//! TICK_MODE=manual SIM_SCENARIO=interrupt cargo run -p uncuff-client
//! ```

mod logging;
mod scenario;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;

use runtime::{Runtime, RuntimeConfig, Topic};

use crate::scenario::{Director, Scenario};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env()?;
    let scenario = Scenario::from_env();

    // 2. Setup logging
    let (log_file, _log_guard) = logging::setup_logging(std::env::var("SESSION_ID").ok())?;
    eprintln!("logging to {}", log_file.display());

    tracing::info!("Starting uncuff simulator");
    tracing::info!("Tick mode: {}", runtime_config.tick_mode);
    tracing::info!(
        "Tick interval: {:?}",
        runtime_config.action_config.tick_interval()
    );

    let tick = runtime_config.action_config.tick_interval();
    let mode = runtime_config.tick_mode;

    // 3. Build Runtime
    let runtime = Runtime::builder().config(runtime_config).build().await?;
    let handle = runtime.handle();

    // 4. Print events from every topic until the bus closes
    let printers: Vec<_> = handle
        .subscribe_multiple(&Topic::ALL)
        .into_values()
        .map(|mut rx| {
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => match serde_json::to_string(&event) {
                            Ok(line) => println!("{line}"),
                            Err(e) => tracing::warn!("Failed to encode event: {}", e),
                        },
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("Event printer lagged, skipped {} events", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect();

    // 5. Play the scenario
    Director::new(handle, tick, mode).play(scenario).await?;

    // 6. Shutdown (the Director owned the last handle)
    runtime.shutdown().await?;
    for printer in printers {
        printer.await?;
    }

    tracing::info!("Simulator finished");
    Ok(())
}
