//! Session loop runner with player controls.
//!
//! This module provides [`run_session`], the async function that drives
//! a [`PondSession`] in real time with support for:
//!
//! - **Bounded runs**: stop after `max_ticks` or `max_real_time_seconds`
//! - **Pause/resume**: a paused session waits for the next command
//! - **Speed**: the sleep between ticks follows the session's speed mode
//! - **Commands**: queued [`ControlCommand`]s are applied between ticks
//!
//! The loop is the only writer of the session. A tick is never
//! interrupted; commands that arrive during a tick or the sleep after it
//! are applied in order before the next tick.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{info, warn};

use crate::config::SimulationBoundsConfig;
use crate::control::ControlCommand;
use crate::session::{PondSession, TickReport};

/// Errors that can occur before the loop starts.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The session cannot run with the loaded configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// A [`ControlCommand::Stop`] was received.
    Stopped,
    /// The session was paused and every command sender was dropped.
    ChannelClosed,
}

/// Result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// The reason the run ended.
    pub end_reason: EndReason,
    /// Ticks executed by this run.
    pub total_ticks: u64,
    /// Session tick when the run ended.
    pub final_tick: u64,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick has been committed.
    fn on_tick(&mut self, report: &TickReport, session: &PondSession);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _report: &TickReport, _session: &PondSession) {}
}

/// Run `session` until a bound is reached or it is stopped.
///
/// While paused the loop waits for the next command; the wall-clock
/// limit is only checked while running.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidConfig`] if the history cannot hold a
/// single snapshot.
pub async fn run_session(
    session: &mut PondSession,
    commands: &mut UnboundedReceiver<ControlCommand>,
    bounds: &SimulationBoundsConfig,
    callback: &mut dyn TickCallback,
) -> Result<RunOutcome, RunnerError> {
    if session.thresholds().history.max_points == 0 {
        return Err(RunnerError::InvalidConfig {
            reason: "history.maxPoints must be at least 1".to_owned(),
        });
    }

    let started_at = Utc::now();
    let mut total_ticks: u64 = 0;
    let mut channel_open = true;

    info!(
        max_ticks = bounds.max_ticks,
        max_real_time_seconds = bounds.max_real_time_seconds,
        tick = session.state().tick,
        "Session starting"
    );

    loop {
        // --- Drain queued commands ---
        while channel_open {
            match commands.try_recv() {
                Ok(ControlCommand::Stop) => {
                    return Ok(finish(EndReason::Stopped, session, total_ticks));
                }
                Ok(command) => session.apply(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => channel_open = false,
            }
        }

        // --- Wait while paused ---
        if session.is_paused() {
            if !channel_open {
                return Ok(finish(EndReason::ChannelClosed, session, total_ticks));
            }
            match commands.recv().await {
                Some(ControlCommand::Stop) => {
                    return Ok(finish(EndReason::Stopped, session, total_ticks));
                }
                Some(command) => session.apply(command),
                None => channel_open = false,
            }
            continue;
        }

        // --- Execute tick ---
        let report = session.tick();
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&report, session);

        // --- Check bounds ---
        if bounds.max_ticks > 0 && report.state.tick >= bounds.max_ticks {
            info!(tick = report.state.tick, max_ticks = bounds.max_ticks, "Tick limit reached");
            return Ok(finish(EndReason::MaxTicksReached, session, total_ticks));
        }
        if time_limit_reached(started_at, bounds.max_real_time_seconds) {
            info!(
                max_seconds = bounds.max_real_time_seconds,
                tick = report.state.tick,
                "Real-time limit reached"
            );
            return Ok(finish(EndReason::MaxRealTimeReached, session, total_ticks));
        }

        // --- Sleep for tick interval ---
        let interval = session.tick_interval();
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}

/// Log the outcome of a run.
pub fn log_run_end(outcome: &RunOutcome) {
    info!(
        reason = ?outcome.end_reason,
        total_ticks = outcome.total_ticks,
        final_tick = outcome.final_tick,
        "Session ended"
    );
    if outcome.total_ticks == 0 {
        warn!("Session ended with no ticks executed");
    }
}

fn time_limit_reached(started_at: DateTime<Utc>, max_seconds: u64) -> bool {
    if max_seconds == 0 {
        return false;
    }
    let elapsed = Utc::now().signed_duration_since(started_at).num_seconds();
    u64::try_from(elapsed).unwrap_or(0) >= max_seconds
}

const fn finish(end_reason: EndReason, session: &PondSession, total_ticks: u64) -> RunOutcome {
    RunOutcome {
        end_reason,
        total_ticks,
        final_tick: session.state().tick,
    }
}
