//! Snapshot and event structs for the Pondlife simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BiomeField, EventKey, Severity};

/// Lower bound of every [`BiomeField`].
pub const FIELD_MIN: f64 = 0.0;

/// Upper bound of every [`BiomeField`].
pub const FIELD_MAX: f64 = 100.0;

/// Clamp a value into the `[0, 100]` field range.
///
/// `NaN` maps to the lower bound so a degenerate input can never escape
/// the range.
pub fn clamp_field(value: f64) -> f64 {
    if value.is_nan() {
        return FIELD_MIN;
    }
    value.clamp(FIELD_MIN, FIELD_MAX)
}

/// Immutable-per-tick snapshot of the pond.
///
/// Every ecological field is an aggregate on a 0-100 scale and is clamped
/// after each transition. `tick` is advanced by exactly one per simulation
/// step and is never decremented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BiomeState {
    /// Number of completed simulation steps.
    pub tick: u64,
    /// Dissolved nutrient load.
    pub nutrients: f64,
    /// Dissolved oxygen.
    pub dissolved_oxygen: f64,
    /// Water turbidity.
    pub water_turbidity: f64,
    /// Free-floating algae biomass.
    pub phytoplankton: f64,
    /// Macrophyte biomass.
    pub aquatic_plants: f64,
    /// Zooplankton biomass.
    pub zooplankton: f64,
    /// Forage fish biomass.
    pub small_fish: f64,
    /// Predatory fish biomass.
    pub large_fish: f64,
    /// Decomposer biomass.
    pub decomposers: f64,
}

impl BiomeState {
    /// Read a field by tag.
    pub const fn get(&self, field: BiomeField) -> f64 {
        match field {
            BiomeField::Nutrients => self.nutrients,
            BiomeField::DissolvedOxygen => self.dissolved_oxygen,
            BiomeField::WaterTurbidity => self.water_turbidity,
            BiomeField::Phytoplankton => self.phytoplankton,
            BiomeField::AquaticPlants => self.aquatic_plants,
            BiomeField::Zooplankton => self.zooplankton,
            BiomeField::SmallFish => self.small_fish,
            BiomeField::LargeFish => self.large_fish,
            BiomeField::Decomposers => self.decomposers,
        }
    }

    /// Write a field by tag. The value is clamped into range.
    pub fn set(&mut self, field: BiomeField, value: f64) {
        let value = clamp_field(value);
        let slot = match field {
            BiomeField::Nutrients => &mut self.nutrients,
            BiomeField::DissolvedOxygen => &mut self.dissolved_oxygen,
            BiomeField::WaterTurbidity => &mut self.water_turbidity,
            BiomeField::Phytoplankton => &mut self.phytoplankton,
            BiomeField::AquaticPlants => &mut self.aquatic_plants,
            BiomeField::Zooplankton => &mut self.zooplankton,
            BiomeField::SmallFish => &mut self.small_fish,
            BiomeField::LargeFish => &mut self.large_fish,
            BiomeField::Decomposers => &mut self.decomposers,
        };
        *slot = value;
    }

    /// Return a copy with `field` replaced (clamped).
    #[must_use]
    pub fn with(mut self, field: BiomeField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Whether every field lies in `[0, 100]`.
    pub fn is_in_bounds(&self) -> bool {
        BiomeField::ALL
            .into_iter()
            .map(|field| self.get(field))
            .all(|v| (FIELD_MIN..=FIELD_MAX).contains(&v))
    }
}

/// Persistent remediation toggles read by the rule engine every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EngineFlags {
    /// Mechanical aeration is running.
    pub aerator_active: bool,
    /// A riparian buffer strip intercepts runoff.
    pub buffer_active: bool,
}

/// A fired event, as appended to the session's event log.
///
/// Items are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventItem {
    /// Which event fired.
    pub key: EventKey,
    /// Presentation severity from the message catalogue.
    pub severity: Severity,
    /// Display text from the message catalogue.
    pub text: String,
    /// Tick at which the event fired.
    pub tick: u64,
}
