//! Session orchestration: one pond, its narrative stage, and its records.
//!
//! [`PondSession`] owns everything a running game needs and is the only
//! writer of all of it:
//!
//! - the [`SimulationEngine`] with the live snapshot and flags,
//! - compiled [`Thresholds`] and the [`EventCatalogue`],
//! - stage, pause, and speed,
//! - the append-only event log and the [`CooldownState`],
//! - a bounded history of sampled snapshots,
//! - the witness tracker that advances WITNESSING to RESTORING.
//!
//! Every tick detects events against exactly the snapshot that tick
//! produced.

use std::collections::VecDeque;
use std::time::Duration;

use pondlife_types::{
    BiomeState, EngineFlags, EventItem, EventKey, GameStage, SpeedMode, Theme,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalogue::EventCatalogue;
use crate::config::Thresholds;
use crate::control::ControlCommand;
use crate::engine::SimulationEngine;
use crate::events::{self, CooldownState};
use crate::rules;
use crate::theme;

/// What one tick produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// The committed snapshot.
    pub state: BiomeState,
    /// Theme of the committed snapshot.
    pub theme: Theme,
    /// Events fired by this tick, in detection order.
    pub events: Vec<EventItem>,
}

/// Progress through the witness period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessTracker {
    /// First tick observed while witnessing.
    pub start_tick: Option<u64>,
    /// Ticks to witness before restoration begins.
    pub target_ticks: u64,
}

/// A single pond game.
#[derive(Debug, Clone)]
pub struct PondSession {
    engine: SimulationEngine,
    thresholds: Thresholds,
    catalogue: EventCatalogue,
    stage: GameStage,
    paused: bool,
    speed: SpeedMode,
    event_log: Vec<EventItem>,
    cooldowns: CooldownState,
    history: VecDeque<BiomeState>,
    witness: WitnessTracker,
}

impl PondSession {
    /// Create a paused session at the initial pond.
    pub fn new(thresholds: Thresholds, catalogue: EventCatalogue) -> Self {
        let witness = WitnessTracker {
            start_tick: None,
            target_ticks: thresholds.time.witness_ticks(),
        };
        let mut session = Self {
            engine: SimulationEngine::new(),
            thresholds,
            catalogue,
            stage: GameStage::Observing,
            paused: true,
            speed: SpeedMode::Normal,
            event_log: Vec::new(),
            cooldowns: CooldownState::new(),
            history: VecDeque::new(),
            witness,
        };
        session.history.push_back(rules::initial_state());
        session
    }

    /// Advance the pond one step and record what happened.
    pub fn tick(&mut self) -> TickReport {
        let tick = self.engine.tick();
        let state = *self.engine.state();

        let fired = events::detect(
            &state,
            &self.thresholds.events,
            &self.catalogue,
            &mut self.cooldowns,
            tick,
        );
        self.event_log.extend(fired.iter().cloned());

        if tick.checked_rem(self.thresholds.history.stride()) == Some(0) {
            self.history.push_back(state);
            while self.history.len() > self.thresholds.history.max_points {
                self.history.pop_front();
            }
        }

        let theme = self.theme();
        debug!(
            tick,
            theme = theme.as_str(),
            events = fired.len(),
            dissolved_oxygen = state.dissolved_oxygen,
            nutrients = state.nutrients,
            "tick complete"
        );

        if self.stage == GameStage::Witnessing {
            let start = *self.witness.start_tick.get_or_insert(tick);
            if tick.saturating_sub(start) >= self.witness.target_ticks {
                info!(tick, witnessed = tick.saturating_sub(start), "witness period over");
                self.to_stage(GameStage::Restoring);
            }
        }

        TickReport {
            state,
            theme,
            events: fired,
        }
    }

    /// Return to the initial pond, paused at normal speed while observing.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.stage = GameStage::Observing;
        self.paused = true;
        self.speed = SpeedMode::Normal;
        self.event_log.clear();
        self.cooldowns.clear();
        self.history.clear();
        self.history.push_back(*self.engine.state());
        self.witness.start_tick = None;
        info!("session reset");
    }

    /// Flip the paused flag.
    pub const fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the paused flag.
    pub const fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Change the tick cadence.
    pub const fn set_speed(&mut self, speed: SpeedMode) {
        self.speed = speed;
    }

    /// Move to `stage`, applying its pause and speed presets.
    ///
    /// Every stage other than RESTORING switches both remediation tools off.
    pub fn to_stage(&mut self, stage: GameStage) {
        let (paused, speed) = match stage {
            GameStage::Observing | GameStage::Intervening => (true, SpeedMode::Normal),
            GameStage::Witnessing => {
                self.witness.start_tick = None;
                (false, SpeedMode::Fast)
            }
            GameStage::Restoring => (false, SpeedMode::Normal),
        };
        self.stage = stage;
        self.paused = paused;
        self.speed = speed;
        if stage != GameStage::Restoring {
            self.engine.set_aerator(false);
            self.engine.set_buffer(false);
        }
        info!(stage = ?stage, tick = self.engine.current_tick(), "stage changed");
    }

    /// Inject nutrient runoff and log it.
    pub fn apply_runoff(&mut self) {
        self.engine.apply_intervention_runoff();
        self.record(EventKey::RunoffIntroduced);
        info!(
            tick = self.engine.current_tick(),
            nutrients = self.engine.state().nutrients,
            "runoff introduced"
        );
    }

    /// Switch the aerator; switching it on is logged.
    pub fn set_aerator(&mut self, active: bool) {
        self.engine.set_aerator(active);
        if active {
            self.record(EventKey::AeratorOn);
        }
        info!(active, tick = self.engine.current_tick(), "aerator toggled");
    }

    /// Plant or remove the buffer strip; planting it is logged.
    pub fn set_buffer(&mut self, active: bool) {
        self.engine.set_buffer(active);
        if active {
            self.record(EventKey::BufferOn);
        }
        info!(active, tick = self.engine.current_tick(), "buffer strip toggled");
    }

    /// Apply a control command. [`ControlCommand::Stop`] is handled by the
    /// runner and ignored here.
    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Pause => self.set_paused(true),
            ControlCommand::Resume => self.set_paused(false),
            ControlCommand::TogglePause => self.toggle_pause(),
            ControlCommand::SetSpeed(speed) => self.set_speed(speed),
            ControlCommand::ToStage(stage) => self.to_stage(stage),
            ControlCommand::ApplyRunoff => self.apply_runoff(),
            ControlCommand::SetAerator(active) => self.set_aerator(active),
            ControlCommand::SetBuffer(active) => self.set_buffer(active),
            ControlCommand::Reset => self.reset(),
            ControlCommand::Stop => debug!("stop is handled by the runner"),
        }
    }

    /// Wall-clock interval between ticks at the current speed.
    pub const fn tick_interval(&self) -> Duration {
        match self.speed {
            SpeedMode::Normal => self.thresholds.time.normal_interval(),
            SpeedMode::Fast => self.thresholds.time.fast_interval(),
        }
    }

    /// The current snapshot.
    pub const fn state(&self) -> &BiomeState {
        self.engine.state()
    }

    /// The current remediation flags.
    pub const fn flags(&self) -> EngineFlags {
        self.engine.flags()
    }

    /// The current narrative stage.
    pub const fn stage(&self) -> GameStage {
        self.stage
    }

    /// The current tick cadence.
    pub const fn speed(&self) -> SpeedMode {
        self.speed
    }

    /// Whether ticking is suspended.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Every event logged since the last reset, oldest first.
    pub fn event_log(&self) -> &[EventItem] {
        &self.event_log
    }

    /// Sampled snapshots, oldest first.
    pub const fn history(&self) -> &VecDeque<BiomeState> {
        &self.history
    }

    /// Last firing tick per event key.
    pub const fn cooldowns(&self) -> &CooldownState {
        &self.cooldowns
    }

    /// The witness tracker.
    pub const fn witness(&self) -> WitnessTracker {
        self.witness
    }

    /// The compiled thresholds.
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Theme of the current snapshot.
    pub fn theme(&self) -> Theme {
        theme::classify(self.engine.state(), &self.thresholds.theme_rules)
    }

    fn record(&mut self, key: EventKey) {
        let item = events::emit(
            key,
            self.engine.current_tick(),
            &self.catalogue,
            &mut self.cooldowns,
        );
        self.event_log.push(item);
    }
}
