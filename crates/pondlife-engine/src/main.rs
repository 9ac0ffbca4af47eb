//! Headless engine binary for the Pondlife simulation.
//!
//! Runs one scripted playthrough of the pond in real time and logs the
//! story as it unfolds.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `pondlife-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load the event message catalogue
//! 4. Build the session, control channel, and narrative script
//! 5. Run the session loop until a bound is reached
//! 6. Log the outcome and print the final snapshot as JSON

mod error;
mod narrative;

use std::path::{Path, PathBuf};

use pondlife_core::catalogue::EventCatalogue;
use pondlife_core::config::ThresholdConfig;
use pondlife_core::control::{ControlCommand, SessionControl};
use pondlife_core::runner;
use pondlife_core::session::PondSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::narrative::{DEFAULT_OBSERVE_TICKS, NarrativeScript};

/// Tick cap used when the configuration leaves `max_ticks` unlimited.
const DEFAULT_MAX_TICKS: u64 = 240;

/// Application entry point for the headless engine.
///
/// # Errors
///
/// Returns an error if configuration or catalogue loading fails, or if
/// the session cannot start.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report afterwards.
    let config_path = env_path("PONDLIFE_CONFIG", "pondlife-config.yaml");
    let loaded = load_config(&config_path);

    // 2. Initialize structured logging.
    let fallback_level = loaded
        .as_ref()
        .map_or_else(|_| "info".to_owned(), |(config, _)| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level)),
        )
        .with_target(true)
        .init();

    info!("pondlife-engine starting");

    let (config, from_file) = loaded?;
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        tick_millis = config.time.tick_millis,
        tick_millis_fast = config.time.tick_millis_fast,
        witness_ticks = config.time.witness_ticks(),
        events = config.events.len(),
        "Timing and thresholds"
    );

    // 3. Load the message catalogue.
    let catalogue_path = env_path("PONDLIFE_CATALOGUE", "content/events.en.json");
    let catalogue = load_catalogue(&catalogue_path)?;
    info!(entries = catalogue.len(), "Message catalogue ready");

    // 4. Assemble the session and script.
    let mut bounds = config.simulation.clone();
    if bounds.max_ticks == 0 {
        bounds.max_ticks = DEFAULT_MAX_TICKS;
    }
    let mut session = PondSession::new(config.compile(), catalogue);
    let (control, mut commands) = SessionControl::channel();
    control.send(ControlCommand::Resume);
    let mut script = NarrativeScript::new(control, DEFAULT_OBSERVE_TICKS);

    info!(
        max_ticks = bounds.max_ticks,
        observe_ticks = DEFAULT_OBSERVE_TICKS,
        "Session assembled, entering tick loop"
    );

    // 5. Run.
    let outcome = runner::run_session(&mut session, &mut commands, &bounds, &mut script)
        .await
        .map_err(EngineError::from)?;

    // 6. Report.
    runner::log_run_end(&outcome);
    info!(
        stage = ?session.stage(),
        theme = session.theme().as_str(),
        events_logged = session.event_log().len(),
        history_points = session.history().len(),
        "Final session state"
    );
    let snapshot = serde_json::to_string_pretty(session.state()).map_err(EngineError::from)?;
    println!("{snapshot}");

    info!(
        end_reason = ?outcome.end_reason,
        total_ticks = outcome.total_ticks,
        "pondlife-engine shutdown complete"
    );

    Ok(())
}

/// Path from an environment variable, or `default` when unset.
fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Load the configuration, falling back to defaults when the file is
/// absent. The flag reports whether the file was read.
fn load_config(path: &Path) -> Result<(ThresholdConfig, bool), EngineError> {
    if path.exists() {
        Ok((ThresholdConfig::from_file(path)?, true))
    } else {
        Ok((ThresholdConfig::default(), false))
    }
}

/// Load the message catalogue, falling back to an empty one when the file
/// is absent.
fn load_catalogue(path: &Path) -> Result<EventCatalogue, EngineError> {
    if path.exists() {
        Ok(EventCatalogue::from_file(path)?)
    } else {
        info!(path = %path.display(), "Catalogue not found, events will show raw keys");
        Ok(EventCatalogue::default())
    }
}
