//! Enumeration types for the Pondlife simulation.
//!
//! Every enum here crosses the boundary to the UI layer, so the serde
//! representations are fixed: event keys and stages are
//! `SCREAMING_SNAKE_CASE`, themes and severities are lowercase, and biome
//! fields use the camelCase names the threshold configuration refers to.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Biome fields
// ---------------------------------------------------------------------------

/// One of the bounded scalar aggregates tracked in a [`BiomeState`].
///
/// This is the closed set of names a threshold condition may refer to.
/// The tick counter is not a field; conditions never compare against it.
///
/// [`BiomeState`]: crate::BiomeState
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum BiomeField {
    /// Dissolved nutrient load (nitrogen and phosphorus, aggregated).
    Nutrients,
    /// Dissolved oxygen available to fish and decomposers.
    DissolvedOxygen,
    /// Suspended particles clouding the water column.
    WaterTurbidity,
    /// Free-floating algae.
    Phytoplankton,
    /// Rooted and floating macrophytes.
    AquaticPlants,
    /// Grazers feeding on phytoplankton.
    Zooplankton,
    /// Forage fish feeding on zooplankton.
    SmallFish,
    /// Predatory fish feeding on small fish.
    LargeFish,
    /// Bacteria and detritivores recycling dead matter.
    Decomposers,
}

impl BiomeField {
    /// Every field, in the order they appear in a snapshot.
    pub const ALL: [Self; 9] = [
        Self::Nutrients,
        Self::DissolvedOxygen,
        Self::WaterTurbidity,
        Self::Phytoplankton,
        Self::AquaticPlants,
        Self::Zooplankton,
        Self::SmallFish,
        Self::LargeFish,
        Self::Decomposers,
    ];

    /// The camelCase name used in configuration keys (`dissolvedOxygenMax`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nutrients => "nutrients",
            Self::DissolvedOxygen => "dissolvedOxygen",
            Self::WaterTurbidity => "waterTurbidity",
            Self::Phytoplankton => "phytoplankton",
            Self::AquaticPlants => "aquaticPlants",
            Self::Zooplankton => "zooplankton",
            Self::SmallFish => "smallFish",
            Self::LargeFish => "largeFish",
            Self::Decomposers => "decomposers",
        }
    }

    /// Resolve a camelCase field name. Returns `None` for anything outside
    /// the closed set, including `"tick"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for BiomeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Identifier of a narrative or warning event.
///
/// Threshold and composite events are raised by the detector; the
/// intervention events are raised directly by the session when the
/// player acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum EventKey {
    /// Phytoplankton or nutrients crossed the bloom threshold.
    AlgaeBloom,
    /// The water column has become murky.
    TurbidityHigh,
    /// Dissolved oxygen is getting low.
    DoLow,
    /// Dissolved oxygen is at a lethal level.
    DoCritical,
    /// Aquatic plants are dying back.
    PlantsDieOff,
    /// The forage fish population has collapsed.
    SmallFishCollapse,
    /// Predatory fish have all but disappeared.
    LargeFishVanish,
    /// Conditions suggest the pond is recovering.
    RecoveryHint,
    /// A pulse of agricultural runoff entered the pond.
    RunoffIntroduced,
    /// The aerator was switched on.
    AeratorOn,
    /// The riparian buffer strip was planted.
    BufferOn,
}

impl EventKey {
    /// Every event key.
    pub const ALL: [Self; 11] = [
        Self::AlgaeBloom,
        Self::TurbidityHigh,
        Self::DoLow,
        Self::DoCritical,
        Self::PlantsDieOff,
        Self::SmallFishCollapse,
        Self::LargeFishVanish,
        Self::RecoveryHint,
        Self::RunoffIntroduced,
        Self::AeratorOn,
        Self::BufferOn,
    ];

    /// Keys evaluated by the event detector each tick, in evaluation order.
    pub const DETECTED: [Self; 8] = [
        Self::AlgaeBloom,
        Self::TurbidityHigh,
        Self::DoLow,
        Self::DoCritical,
        Self::PlantsDieOff,
        Self::SmallFishCollapse,
        Self::LargeFishVanish,
        Self::RecoveryHint,
    ];

    /// The wire name of this key (`"DO_LOW"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlgaeBloom => "ALGAE_BLOOM",
            Self::TurbidityHigh => "TURBIDITY_HIGH",
            Self::DoLow => "DO_LOW",
            Self::DoCritical => "DO_CRITICAL",
            Self::PlantsDieOff => "PLANTS_DIE_OFF",
            Self::SmallFishCollapse => "SMALL_FISH_COLLAPSE",
            Self::LargeFishVanish => "LARGE_FISH_VANISH",
            Self::RecoveryHint => "RECOVERY_HINT",
            Self::RunoffIntroduced => "RUNOFF_INTRODUCED",
            Self::AeratorOn => "AERATOR_ON",
            Self::BufferOn => "BUFFER_ON",
        }
    }

    /// Resolve a wire name. Returns `None` for unknown keys.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How loudly an event should be presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Narrative beat or neutral information.
    #[default]
    Event,
    /// Something is going wrong.
    Warn,
    /// Ecological disaster.
    Disaster,
}

impl Severity {
    /// The lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Warn => "warn",
            Self::Disaster => "disaster",
        }
    }

    /// Look up a severity by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Event, Self::Warn, Self::Disaster]
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

// ---------------------------------------------------------------------------
// Presentation and narrative state
// ---------------------------------------------------------------------------

/// Coarse health category derived from a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Theme {
    /// No collapse or pollution rule holds.
    #[default]
    Healthy,
    /// At least one pollution rule holds.
    Polluted,
    /// At least one collapse rule holds.
    Collapsed,
}

impl Theme {
    /// The lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Polluted => "polluted",
            Self::Collapsed => "collapsed",
        }
    }

    /// Look up a theme by wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Healthy, Self::Polluted, Self::Collapsed]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four-stage narrative progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum GameStage {
    /// Watch the untouched pond.
    #[default]
    Observing,
    /// Trigger the pollution event.
    Intervening,
    /// Fast-forward through the consequences.
    Witnessing,
    /// Apply remediation and watch recovery.
    Restoring,
}

/// Tick cadence selected by the player or the stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum SpeedMode {
    /// Regular interval.
    #[default]
    Normal,
    /// Accelerated interval.
    Fast,
}
