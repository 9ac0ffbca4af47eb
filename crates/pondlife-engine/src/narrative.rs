//! Scripted playthrough: drives a session through the four stages and
//! logs what the pond does.
//!
//! The script never touches the session directly. It reads the session
//! after each tick and sends [`ControlCommand`]s, which the runner
//! applies before the next tick.

use pondlife_core::control::{ControlCommand, SessionControl};
use pondlife_core::runner::TickCallback;
use pondlife_core::session::{PondSession, TickReport};
use pondlife_types::{EventItem, GameStage, Severity, Theme};
use tracing::{error, info, warn};

/// Default number of ticks to observe the untouched pond.
pub const DEFAULT_OBSERVE_TICKS: u64 = 24;

/// Tick callback that plays the observe / pollute / witness / restore arc.
pub struct NarrativeScript {
    control: SessionControl,
    observe_ticks: u64,
    intervened: bool,
    remediated: bool,
    last_theme: Theme,
}

impl NarrativeScript {
    /// Create a script that pollutes the pond after `observe_ticks`.
    pub const fn new(control: SessionControl, observe_ticks: u64) -> Self {
        Self {
            control,
            observe_ticks,
            intervened: false,
            remediated: false,
            last_theme: Theme::Healthy,
        }
    }

    fn send(&self, command: ControlCommand) {
        if !self.control.send(command) {
            warn!(?command, "session loop gone, command dropped");
        }
    }
}

impl TickCallback for NarrativeScript {
    fn on_tick(&mut self, report: &TickReport, session: &PondSession) {
        let tick = report.state.tick;

        for event in &report.events {
            log_event(event);
        }

        if report.theme != self.last_theme {
            info!(
                tick,
                from = self.last_theme.as_str(),
                to = report.theme.as_str(),
                "pond theme changed"
            );
            self.last_theme = report.theme;
        }

        match session.stage() {
            GameStage::Observing if !self.intervened && tick >= self.observe_ticks => {
                info!(tick, "observation over, introducing runoff");
                self.intervened = true;
                self.send(ControlCommand::ToStage(GameStage::Intervening));
                self.send(ControlCommand::ApplyRunoff);
                self.send(ControlCommand::ToStage(GameStage::Witnessing));
            }
            GameStage::Restoring if !self.remediated => {
                info!(tick, "restoration begins, deploying aerator and buffer strip");
                self.remediated = true;
                self.send(ControlCommand::SetAerator(true));
                self.send(ControlCommand::SetBuffer(true));
            }
            _ => {}
        }
    }
}

fn log_event(event: &EventItem) {
    let key = event.key.as_str();
    match event.severity {
        Severity::Event => info!(tick = event.tick, key, "{}", event.text),
        Severity::Warn => warn!(tick = event.tick, key, "{}", event.text),
        Severity::Disaster => error!(tick = event.tick, key, "{}", event.text),
    }
}
