//! Configuration loading and typed config structures for the pond.
//!
//! The canonical configuration lives in `pondlife-config.yaml` at the
//! project root. The structs here mirror the YAML layout; every section is
//! optional and falls back to the values shipped in that file. Raw
//! threshold tables are then compiled once into [`Thresholds`], the form
//! the detector and theme classifier consume.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use pondlife_types::{EventKey, Theme};
use serde::Deserialize;
use serde_yml::Value;
use tracing::warn;

use crate::condition::{Condition, RawCondition};
use crate::events::{EventTrigger, Logic, TriggerRule};
use crate::theme::ThemeRule;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level pond configuration.
///
/// Mirrors the structure of `pondlife-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThresholdConfig {
    /// Tick pacing and the witness period.
    #[serde(default)]
    pub time: TimeConfig,

    /// History sampling.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Event triggers keyed by event name.
    #[serde(default = "default_events")]
    pub events: BTreeMap<String, EventRuleConfig>,

    /// Presentation rules.
    #[serde(default)]
    pub visuals: VisualsConfig,

    /// Run boundaries for the headless engine.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            time: TimeConfig::default(),
            history: HistoryConfig::default(),
            events: default_events(),
            visuals: VisualsConfig::default(),
            simulation: SimulationBoundsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ThresholdConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `PONDLIFE_TICK_MILLIS` overrides `time.tick_millis` when set to a
    /// valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.time.apply_env_overrides();
        Ok(config)
    }

    /// Compile the raw tables into typed triggers and theme rules.
    ///
    /// Event entries whose name is not a detected [`EventKey`] are skipped
    /// with a warning, as are theme rules naming an unknown theme.
    /// Malformed conditions compile to conditions that never hold.
    pub fn compile(&self) -> Thresholds {
        let mut events = BTreeMap::new();
        for (name, rule) in &self.events {
            match EventKey::from_name(name) {
                Some(key) if EventKey::DETECTED.contains(&key) => {
                    events.insert(key, rule.compile(name));
                }
                _ => warn!(event = name.as_str(), "no detector for configured event, skipped"),
            }
        }

        let theme_rules = self
            .visuals
            .theme_rules
            .iter()
            .filter_map(ThemeRuleConfig::compile)
            .collect();

        Thresholds {
            time: self.time.clone(),
            history: self.history.clone(),
            events,
            theme_rules,
        }
    }
}

/// Compiled thresholds, ready for detection and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Tick pacing and the witness period.
    pub time: TimeConfig,
    /// History sampling.
    pub history: HistoryConfig,
    /// Triggers for detected events.
    pub events: BTreeMap<EventKey, EventTrigger>,
    /// Theme rules in configured order.
    pub theme_rules: Vec<ThemeRule>,
}

impl Default for Thresholds {
    fn default() -> Self {
        ThresholdConfig::default().compile()
    }
}

/// Time configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConfig {
    /// Real-time milliseconds per tick at normal speed.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Real-time milliseconds per tick at fast speed.
    #[serde(default = "default_tick_millis_fast")]
    pub tick_millis_fast: u64,

    /// Ticks making up one simulated year.
    #[serde(default = "default_ticks_per_year")]
    pub ticks_per_year: u64,

    /// Simulated years the player witnesses before restoration.
    #[serde(default = "default_witness_years")]
    pub witness_years: u64,
}

impl TimeConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PONDLIFE_TICK_MILLIS") {
            match val.trim().parse() {
                Ok(ms) => self.tick_millis = ms,
                Err(_) => warn!(value = val.as_str(), "ignoring invalid PONDLIFE_TICK_MILLIS"),
            }
        }
    }

    /// Length of the witness period in ticks.
    pub const fn witness_ticks(&self) -> u64 {
        self.witness_years.saturating_mul(self.ticks_per_year)
    }

    /// Interval between ticks at normal speed.
    pub const fn normal_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Interval between ticks at fast speed.
    pub const fn fast_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis_fast)
    }
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            tick_millis_fast: default_tick_millis_fast(),
            ticks_per_year: default_ticks_per_year(),
            witness_years: default_witness_years(),
        }
    }
}

/// History sampling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Record every Nth tick. Zero is treated as one.
    #[serde(default = "default_sample_every_n_ticks")]
    pub sample_every_n_ticks: u64,

    /// Maximum retained snapshots; the oldest are dropped first.
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl HistoryConfig {
    /// The sampling stride, never zero.
    pub fn stride(&self) -> u64 {
        self.sample_every_n_ticks.max(1)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            sample_every_n_ticks: default_sample_every_n_ticks(),
            max_points: default_max_points(),
        }
    }
}

/// Raw trigger for one event.
///
/// Either a composite descriptor or a flat set of `<field>Min` /
/// `<field>Max` bounds combined with `logic`. Bound values are kept as raw
/// YAML so a non-numeric bound degrades that trigger instead of failing
/// the whole file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRuleConfig {
    /// Minimum ticks between two firings.
    #[serde(default)]
    pub cooldown_ticks: u64,

    /// How flat bounds combine: `AND` (default) or `OR`, any case.
    #[serde(default)]
    pub logic: Option<String>,

    /// Conjunctive composite condition; takes precedence over flat bounds.
    #[serde(default)]
    pub composite: Option<RawCondition>,

    /// Flat bounds.
    #[serde(flatten)]
    pub bounds: RawCondition,
}

impl EventRuleConfig {
    fn compile(&self, name: &str) -> EventTrigger {
        let rule = match &self.composite {
            Some(composite) => {
                if !self.bounds.is_empty() {
                    warn!(event = name, "composite trigger present, flat bounds ignored");
                }
                TriggerRule::Composite(Condition::compile(composite, name))
            }
            None => match self.logic.as_deref().map_or(Some(Logic::And), Logic::from_name) {
                Some(Logic::And) => TriggerRule::Bounds {
                    condition: Condition::compile(&self.bounds, name),
                    logic: Logic::And,
                },
                Some(Logic::Or) => TriggerRule::Bounds {
                    condition: Condition::compile_any(&self.bounds, name),
                    logic: Logic::Or,
                },
                None => {
                    warn!(
                        event = name,
                        logic = self.logic.as_deref().unwrap_or_default(),
                        "unknown logic, trigger disabled"
                    );
                    TriggerRule::Bounds {
                        condition: Condition::never(),
                        logic: Logic::And,
                    }
                }
            },
        };
        EventTrigger {
            rule,
            cooldown_ticks: self.cooldown_ticks,
        }
    }
}

/// Presentation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualsConfig {
    /// Ordered theme rules.
    #[serde(default = "default_theme_rules")]
    pub theme_rules: Vec<ThemeRuleConfig>,
}

impl Default for VisualsConfig {
    fn default() -> Self {
        Self {
            theme_rules: default_theme_rules(),
        }
    }
}

/// Raw theme rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeRuleConfig {
    /// The theme this rule votes for, by lowercase name.
    pub theme: String,

    /// Conditions, any of which selects the theme.
    #[serde(default)]
    pub any: Vec<RawCondition>,
}

impl ThemeRuleConfig {
    fn compile(&self) -> Option<ThemeRule> {
        let Some(theme) = Theme::from_name(&self.theme) else {
            warn!(theme = self.theme.as_str(), "unknown theme, rule skipped");
            return None;
        };
        Some(ThemeRule {
            theme,
            any: self
                .any
                .iter()
                .map(|raw| Condition::compile(raw, theme.as_str()))
                .collect(),
        })
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Stop after this many wall-clock seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_tick_millis() -> u64 {
    1000
}

const fn default_tick_millis_fast() -> u64 {
    100
}

const fn default_ticks_per_year() -> u64 {
    12
}

const fn default_witness_years() -> u64 {
    5
}

const fn default_sample_every_n_ticks() -> u64 {
    1
}

const fn default_max_points() -> usize {
    1200
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn raw(pairs: &[(&str, f64)]) -> RawCondition {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_owned(), Value::from(v)))
        .collect()
}

fn flat(pairs: &[(&str, f64)], logic: &str, cooldown_ticks: u64) -> EventRuleConfig {
    EventRuleConfig {
        cooldown_ticks,
        logic: Some(logic.to_owned()),
        composite: None,
        bounds: raw(pairs),
    }
}

fn default_events() -> BTreeMap<String, EventRuleConfig> {
    let mut events = BTreeMap::new();
    events.insert(
        EventKey::AlgaeBloom.as_str().to_owned(),
        flat(
            &[("phytoplanktonMin", 70.0), ("nutrientsMin", 60.0)],
            "OR",
            24,
        ),
    );
    events.insert(
        EventKey::TurbidityHigh.as_str().to_owned(),
        flat(&[("waterTurbidityMin", 60.0)], "AND", 24),
    );
    events.insert(
        EventKey::DoLow.as_str().to_owned(),
        flat(&[("dissolvedOxygenMax", 40.0)], "AND", 12),
    );
    events.insert(
        EventKey::DoCritical.as_str().to_owned(),
        flat(&[("dissolvedOxygenMax", 20.0)], "AND", 12),
    );
    events.insert(
        EventKey::PlantsDieOff.as_str().to_owned(),
        flat(&[("aquaticPlantsMax", 20.0)], "AND", 36),
    );
    events.insert(
        EventKey::SmallFishCollapse.as_str().to_owned(),
        flat(&[("smallFishMax", 15.0)], "AND", 36),
    );
    events.insert(
        EventKey::LargeFishVanish.as_str().to_owned(),
        flat(&[("largeFishMax", 5.0)], "AND", 36),
    );
    events.insert(
        EventKey::RecoveryHint.as_str().to_owned(),
        EventRuleConfig {
            cooldown_ticks: 48,
            logic: None,
            composite: Some(raw(&[
                ("dissolvedOxygenMin", 60.0),
                ("nutrientsMax", 40.0),
                ("waterTurbidityMax", 40.0),
            ])),
            bounds: RawCondition::new(),
        },
    );
    events
}

fn default_theme_rules() -> Vec<ThemeRuleConfig> {
    vec![
        ThemeRuleConfig {
            theme: Theme::Collapsed.as_str().to_owned(),
            any: vec![
                raw(&[("dissolvedOxygenMax", 15.0)]),
                raw(&[("smallFishMax", 5.0), ("largeFishMax", 2.0)]),
            ],
        },
        ThemeRuleConfig {
            theme: Theme::Polluted.as_str().to_owned(),
            any: vec![
                raw(&[("nutrientsMin", 60.0)]),
                raw(&[("waterTurbidityMin", 55.0)]),
                raw(&[("dissolvedOxygenMax", 40.0)]),
            ],
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pondlife_types::BiomeField;

    use super::*;
    use crate::rules::initial_state;
    use crate::theme::classify;

    #[test]
    fn default_config_is_valid() {
        let config = ThresholdConfig::default();
        assert_eq!(config.time.tick_millis, 1000);
        assert_eq!(config.time.tick_millis_fast, 100);
        assert_eq!(config.time.witness_ticks(), 60);
        assert_eq!(config.history.max_points, 1200);
        assert_eq!(config.events.len(), 8);
        assert_eq!(config.visuals.theme_rules.len(), 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn default_thresholds_compile_every_detector() {
        let thresholds = Thresholds::default();
        for key in EventKey::DETECTED {
            let trigger = thresholds.events.get(&key).unwrap();
            match &trigger.rule {
                TriggerRule::Bounds { condition, .. } | TriggerRule::Composite(condition) => {
                    assert!(condition.is_satisfiable(), "{key} does not compile");
                }
            }
        }
        assert!(matches!(
            thresholds.events.get(&EventKey::RecoveryHint).unwrap().rule,
            TriggerRule::Composite(_)
        ));
        assert_eq!(classify(&initial_state(), &thresholds.theme_rules), Theme::Healthy);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
time:
  tickMillis: 500
  tickMillisFast: 50
  ticksPerYear: 4
  witnessYears: 2

history:
  sampleEveryNTicks: 3
  maxPoints: 10

events:
  DO_LOW:
    dissolvedOxygenMax: 35
    cooldownTicks: 6
  ALGAE_BLOOM:
    phytoplanktonMin: 80
    nutrientsMin: 70
    logic: OR
    cooldownTicks: 10
  RECOVERY_HINT:
    cooldownTicks: 20
    composite:
      dissolvedOxygenMin: 70
      nutrientsMax: 30

visuals:
  themeRules:
    - theme: collapsed
      any:
        - dissolvedOxygenMax: 10
    - theme: polluted
      any:
        - nutrientsMin: 50

simulation:
  maxTicks: 100
  maxRealTimeSeconds: 30

logging:
  level: debug
";
        let config = ThresholdConfig::parse(yaml).unwrap();
        assert_eq!(config.time.tick_millis_fast, 50);
        assert_eq!(config.time.witness_ticks(), 8);
        assert_eq!(config.history.stride(), 3);
        assert_eq!(config.history.max_points, 10);
        assert_eq!(config.simulation.max_ticks, 100);
        assert_eq!(config.simulation.max_real_time_seconds, 30);
        assert_eq!(config.logging.level, "debug");

        let do_low = config.events.get("DO_LOW").unwrap();
        assert_eq!(do_low.cooldown_ticks, 6);
        assert_eq!(do_low.logic, None);
        assert_eq!(
            do_low.bounds.get("dissolvedOxygenMax").and_then(Value::as_f64),
            Some(35.0)
        );
        assert!(!do_low.bounds.contains_key("cooldownTicks"));

        let thresholds = config.compile();
        assert_eq!(thresholds.events.len(), 3);
        let bloom = thresholds.events.get(&EventKey::AlgaeBloom).unwrap();
        assert_eq!(bloom.cooldown_ticks, 10);
        assert!(bloom.is_triggered(&initial_state().with(BiomeField::Nutrients, 75.0)));
        assert!(!bloom.is_triggered(&initial_state().with(BiomeField::Nutrients, 65.0)));

        let hint = thresholds.events.get(&EventKey::RecoveryHint).unwrap();
        assert!(hint.is_triggered(&initial_state()));

        let polluted = initial_state().with(BiomeField::Nutrients, 55.0);
        assert_eq!(classify(&polluted, &thresholds.theme_rules), Theme::Polluted);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "history:\n  maxPoints: 5\n";
        let config = ThresholdConfig::parse(yaml).unwrap();

        // Overridden
        assert_eq!(config.history.max_points, 5);
        // Everything else uses defaults
        assert_eq!(config.history.sample_every_n_ticks, 1);
        assert_eq!(config.events, default_events());
        assert_eq!(config.visuals, VisualsConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = ThresholdConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            ThresholdConfig::parse("time: [1, 2"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn zero_stride_is_treated_as_one() {
        let config = ThresholdConfig::parse("history:\n  sampleEveryNTicks: 0\n").unwrap();
        assert_eq!(config.history.stride(), 1);
    }

    #[test]
    fn missing_cooldown_means_zero() {
        let config = ThresholdConfig::parse("events:\n  DO_LOW:\n    dissolvedOxygenMax: 40\n")
            .unwrap();
        let thresholds = config.compile();
        assert_eq!(
            thresholds.events.get(&EventKey::DoLow).unwrap().cooldown_ticks,
            0
        );
    }

    #[test]
    fn unknown_and_manual_event_keys_are_skipped() {
        let yaml = r"
events:
  FROG_CHORUS:
    nutrientsMin: 10
  AERATOR_ON:
    dissolvedOxygenMin: 10
  DO_LOW:
    dissolvedOxygenMax: 40
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let keys: Vec<EventKey> = thresholds.events.keys().copied().collect();
        assert_eq!(keys, vec![EventKey::DoLow]);
    }

    #[test]
    fn malformed_conditions_never_fire() {
        let yaml = r"
events:
  DO_LOW:
    dissolvedOxygenBelow: 40
  DO_CRITICAL:
    cooldownTicks: 3
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let empty = initial_state().with(BiomeField::DissolvedOxygen, 0.0);
        for key in [EventKey::DoLow, EventKey::DoCritical] {
            assert!(!thresholds.events.get(&key).unwrap().is_triggered(&empty));
        }
    }

    #[test]
    fn composite_takes_precedence_over_flat_bounds() {
        let yaml = r"
events:
  RECOVERY_HINT:
    nutrientsMin: 99
    composite:
      dissolvedOxygenMin: 60
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let hint = thresholds.events.get(&EventKey::RecoveryHint).unwrap();
        assert!(hint.is_triggered(&initial_state()));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("pondlife-config.yaml");
        if path.exists() {
            let config = ThresholdConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
            let mut config = config.unwrap();
            config.time.tick_millis = default_tick_millis();
            assert_eq!(config.compile(), Thresholds::default());
            assert_eq!(config.simulation, SimulationBoundsConfig::default());
            assert_eq!(config.logging, LoggingConfig::default());
        }
    }

    #[test]
    fn snake_case_time_keys_are_not_read() {
        let config = ThresholdConfig::parse("time:\n  tick_millis_fast: 7\n").unwrap();
        assert_eq!(config.time.tick_millis_fast, default_tick_millis_fast());
    }

    #[test]
    fn lowercase_or_logic_is_accepted() {
        let yaml = r"
events:
  ALGAE_BLOOM:
    phytoplanktonMin: 70
    nutrientsMin: 60
    logic: or
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let bloom = thresholds.events.get(&EventKey::AlgaeBloom).unwrap();
        assert!(bloom.is_triggered(&initial_state().with(BiomeField::Nutrients, 65.0)));
        assert!(!bloom.is_triggered(&initial_state()));
    }

    #[test]
    fn unknown_logic_disables_only_that_trigger() {
        let yaml = r"
events:
  ALGAE_BLOOM:
    nutrientsMin: 60
    logic: XOR
  DO_LOW:
    dissolvedOxygenMax: 40
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let state = initial_state()
            .with(BiomeField::Nutrients, 90.0)
            .with(BiomeField::DissolvedOxygen, 10.0);
        assert!(!thresholds.events.get(&EventKey::AlgaeBloom).unwrap().is_triggered(&state));
        assert!(thresholds.events.get(&EventKey::DoLow).unwrap().is_triggered(&state));
    }

    #[test]
    fn non_numeric_bound_disables_only_that_trigger() {
        let yaml = r"
events:
  DO_LOW:
    dissolvedOxygenMax: gasping
  DO_CRITICAL:
    dissolvedOxygenMax: 20
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let suffocating = initial_state().with(BiomeField::DissolvedOxygen, 0.0);
        assert!(!thresholds.events.get(&EventKey::DoLow).unwrap().is_triggered(&suffocating));
        assert!(thresholds.events.get(&EventKey::DoCritical).unwrap().is_triggered(&suffocating));
    }

    #[test]
    fn or_logic_ignores_unknown_keys() {
        let yaml = r"
events:
  ALGAE_BLOOM:
    nutrientsMin: 60
    froggishnessMin: 5
    logic: OR
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        let bloom = thresholds.events.get(&EventKey::AlgaeBloom).unwrap();
        assert!(bloom.is_triggered(&initial_state().with(BiomeField::Nutrients, 80.0)));
    }

    #[test]
    fn unknown_theme_rule_is_skipped() {
        let yaml = r"
visuals:
  themeRules:
    - theme: murky
      any:
        - waterTurbidityMin: 0
    - theme: Collapsed
      any:
        - dissolvedOxygenMax: 10
";
        let thresholds = ThresholdConfig::parse(yaml).unwrap().compile();
        assert_eq!(thresholds.theme_rules.len(), 1);
        let dead = initial_state().with(BiomeField::DissolvedOxygen, 5.0);
        assert_eq!(classify(&dead, &thresholds.theme_rules), Theme::Collapsed);
        assert_eq!(classify(&initial_state(), &thresholds.theme_rules), Theme::Healthy);
    }
}
