//! Player and script commands delivered to a running session.
//!
//! Commands travel over a tokio unbounded channel and are applied by the
//! runner on its own task between ticks, so the session always has a
//! single writer and no transition is ever interrupted.

use pondlife_types::{GameStage, SpeedMode};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A request to change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCommand {
    /// Stop ticking until resumed.
    Pause,
    /// Resume ticking.
    Resume,
    /// Flip the paused flag.
    TogglePause,
    /// Change the tick cadence.
    SetSpeed(SpeedMode),
    /// Move to a narrative stage.
    ToStage(GameStage),
    /// Inject a pulse of nutrient runoff.
    ApplyRunoff,
    /// Switch the aerator.
    SetAerator(bool),
    /// Plant or remove the buffer strip.
    SetBuffer(bool),
    /// Return to the initial pond.
    Reset,
    /// End the run.
    Stop,
}

/// Cloneable handle for sending commands to a running session.
#[derive(Debug, Clone)]
pub struct SessionControl {
    tx: mpsc::UnboundedSender<ControlCommand>,
}

impl SessionControl {
    /// Create a handle and the receiving end consumed by the runner.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ControlCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a command. Returns `false` once the runner has gone away.
    pub fn send(&self, command: ControlCommand) -> bool {
        self.tx.send(command).is_ok()
    }

    /// Queue [`ControlCommand::Stop`].
    pub fn stop(&self) -> bool {
        self.send(ControlCommand::Stop)
    }

    /// Whether the runner has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
