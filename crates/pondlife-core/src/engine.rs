//! Simulation engine: the single owner of the live snapshot and flags.
//!
//! The engine is a small stateful wrapper around the [`rules`] module. It
//! holds the current [`BiomeState`] and [`EngineFlags`], commits each
//! transition, and advances the tick counter by exactly one per step.
//! Nothing else holds write access; callers read copies through
//! [`SimulationEngine::state`] and [`SimulationEngine::flags`].
//!
//! All operations are synchronous, bounded-time, and infallible.
//!
//! [`rules`]: crate::rules

use pondlife_types::{BiomeState, EngineFlags};
use tracing::trace;

use crate::rules;

/// Owner of the live simulation state.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEngine {
    /// Current snapshot.
    state: BiomeState,

    /// Active remediation toggles.
    flags: EngineFlags,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine {
    /// Create an engine at the documented initial snapshot with both
    /// flags cleared.
    pub const fn new() -> Self {
        Self {
            state: rules::initial_state(),
            flags: EngineFlags {
                aerator_active: false,
                buffer_active: false,
            },
        }
    }

    /// Create an engine from an explicit snapshot (useful for testing and
    /// state restoration).
    pub const fn from_parts(state: BiomeState, flags: EngineFlags) -> Self {
        Self { state, flags }
    }

    /// Advance one step. Returns the new tick number.
    pub fn tick(&mut self) -> u64 {
        let next_tick = self.state.tick.saturating_add(1);
        let next = rules::transition(&self.state, self.flags);
        self.state = BiomeState {
            tick: next_tick,
            ..next
        };
        trace!(tick = next_tick, "biome transition committed");
        next_tick
    }

    /// Restore the initial snapshot and clear both flags.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Inject a pulse of nutrient runoff. The tick counter is unchanged.
    pub fn apply_intervention_runoff(&mut self) {
        self.state = rules::apply_runoff(&self.state);
    }

    /// Switch the aerator on or off.
    pub const fn set_aerator(&mut self, active: bool) {
        self.flags.aerator_active = active;
    }

    /// Plant or remove the buffer strip.
    pub const fn set_buffer(&mut self, active: bool) {
        self.flags.buffer_active = active;
    }

    /// The current snapshot.
    pub const fn state(&self) -> &BiomeState {
        &self.state
    }

    /// The current remediation flags.
    pub const fn flags(&self) -> EngineFlags {
        self.flags
    }

    /// The current tick number.
    pub const fn current_tick(&self) -> u64 {
        self.state.tick
    }
}
