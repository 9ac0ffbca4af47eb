//! Event detection with per-key cooldowns.
//!
//! Each tick the session hands the freshly committed snapshot to
//! [`detect`]. Every key in [`EventKey::DETECTED`] with a configured
//! trigger is evaluated; a key whose trigger holds fires only when at
//! least `cooldown_ticks` have elapsed since it last fired. Fired events
//! are stamped with the current tick, decorated from the message
//! catalogue, and recorded in the caller-owned [`CooldownState`].
//!
//! Detection is purely observational: it never touches the snapshot.

use std::collections::BTreeMap;

use pondlife_types::{BiomeState, EventItem, EventKey};
use tracing::debug;

use crate::catalogue::EventCatalogue;
use crate::condition::Condition;

/// Last tick at which each event key fired. A missing key has never fired.
pub type CooldownState = BTreeMap<EventKey, u64>;

/// How the bounds of a plain trigger combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Logic {
    /// Every bound must hold.
    #[default]
    And,
    /// Any bound may hold.
    Or,
}

impl Logic {
    /// Parse `AND` / `OR`, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if name.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }
}

/// What makes an event fire.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerRule {
    /// Named bounds combined with [`Logic`].
    Bounds {
        /// The compiled bounds.
        condition: Condition,
        /// How they combine.
        logic: Logic,
    },
    /// A single composite descriptor, always a conjunction.
    Composite(Condition),
}

/// A configured trigger for one event key.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTrigger {
    /// The condition to evaluate.
    pub rule: TriggerRule,
    /// Minimum ticks between two firings of the same key.
    pub cooldown_ticks: u64,
}

impl EventTrigger {
    /// Whether the trigger condition holds for `state`, ignoring cooldown.
    pub fn is_triggered(&self, state: &BiomeState) -> bool {
        match &self.rule {
            TriggerRule::Bounds {
                condition,
                logic: Logic::And,
            }
            | TriggerRule::Composite(condition) => condition.all(state),
            TriggerRule::Bounds {
                condition,
                logic: Logic::Or,
            } => condition.any(state),
        }
    }
}

/// Whether `key` is out of cooldown at `current_tick`.
///
/// A key that never fired is always ready. A recorded tick later than
/// `current_tick` counts as zero elapsed ticks.
pub fn cooldown_elapsed(
    cooldowns: &CooldownState,
    key: EventKey,
    cooldown_ticks: u64,
    current_tick: u64,
) -> bool {
    cooldowns
        .get(&key)
        .is_none_or(|&last| current_tick.saturating_sub(last) >= cooldown_ticks)
}

/// Build an [`EventItem`] for `key` and record it as fired at `tick`.
pub fn emit(
    key: EventKey,
    tick: u64,
    catalogue: &EventCatalogue,
    cooldowns: &mut CooldownState,
) -> EventItem {
    let message = catalogue.lookup(key);
    cooldowns.insert(key, tick);
    EventItem {
        key,
        severity: message.severity,
        text: message.text.to_owned(),
        tick,
    }
}

/// Evaluate every detected event key against `state`.
///
/// Keys without a configured trigger never fire. `cooldowns` is updated
/// in place for each event returned.
pub fn detect(
    state: &BiomeState,
    triggers: &BTreeMap<EventKey, EventTrigger>,
    catalogue: &EventCatalogue,
    cooldowns: &mut CooldownState,
    current_tick: u64,
) -> Vec<EventItem> {
    let mut fired = Vec::new();
    for key in EventKey::DETECTED {
        let Some(trigger) = triggers.get(&key) else {
            continue;
        };
        if !trigger.is_triggered(state) {
            continue;
        }
        if !cooldown_elapsed(cooldowns, key, trigger.cooldown_ticks, current_tick) {
            debug!(event = %key, tick = current_tick, "event suppressed by cooldown");
            continue;
        }
        fired.push(emit(key, current_tick, catalogue, cooldowns));
    }
    fired
}
