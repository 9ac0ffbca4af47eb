//! Typed threshold conditions.
//!
//! Configuration expresses conditions as maps from `<field>Min` /
//! `<field>Max` keys to numeric bounds, e.g. `{ dissolvedOxygenMax: 40 }`.
//! Those maps are compiled once, at load time, into [`Condition`] values
//! whose bounds carry a [`BiomeField`] tag instead of a string. Evaluation
//! is then a plain accessor call per bound.
//!
//! Malformed input never errors. Under [`Condition::compile`] a key with an
//! unknown field or suffix, a non-numeric value, or a map with no keys at
//! all yields an unsatisfiable condition which evaluates to `false` under
//! both conjunction and disjunction. [`Condition::compile_any`] drops only
//! the malformed bound, since a disjunct that cannot hold does not falsify
//! the others.

use std::collections::BTreeMap;

use pondlife_types::{BiomeField, BiomeState};
use serde_yml::Value;
use tracing::warn;

/// A condition as written in configuration: `"<field>Min" | "<field>Max"`
/// mapped to a bound. Values stay untyped until compilation so that a
/// stray string degrades one condition instead of rejecting the file.
pub type RawCondition = BTreeMap<String, Value>;

/// Direction of a single bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// Satisfied when `field >= value`.
    Min,
    /// Satisfied when `field <= value`.
    Max,
}

/// One comparison against one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// The field being compared.
    pub field: BiomeField,
    /// Whether this is a lower or an upper bound.
    pub kind: BoundKind,
    /// The threshold value.
    pub value: f64,
}

impl Bound {
    /// Lower bound: `field >= value`.
    pub const fn min(field: BiomeField, value: f64) -> Self {
        Self {
            field,
            kind: BoundKind::Min,
            value,
        }
    }

    /// Upper bound: `field <= value`.
    pub const fn max(field: BiomeField, value: f64) -> Self {
        Self {
            field,
            kind: BoundKind::Max,
            value,
        }
    }

    /// Evaluate this bound against a snapshot.
    pub fn holds(&self, state: &BiomeState) -> bool {
        let v = state.get(self.field);
        match self.kind {
            BoundKind::Min => v >= self.value,
            BoundKind::Max => v <= self.value,
        }
    }
}

/// A compiled set of bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    bounds: Vec<Bound>,
    satisfiable: bool,
}

impl Condition {
    /// Build a condition from already-typed bounds.
    ///
    /// An empty bound list yields an unsatisfiable condition.
    pub fn from_bounds(bounds: Vec<Bound>) -> Self {
        let satisfiable = !bounds.is_empty();
        Self {
            bounds,
            satisfiable,
        }
    }

    /// A condition that never holds.
    pub const fn never() -> Self {
        Self {
            bounds: Vec::new(),
            satisfiable: false,
        }
    }

    /// Compile a raw configuration map meant as a conjunction.
    ///
    /// `context` names where the map came from and only appears in the
    /// warning logged for a malformed entry. Any malformed entry makes the
    /// whole condition unsatisfiable.
    pub fn compile(raw: &RawCondition, context: &str) -> Self {
        let mut bounds = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            match parse_entry(key, value, context) {
                Some(bound) => bounds.push(bound),
                None => return Self::never(),
            }
        }
        Self::from_bounds(bounds)
    }

    /// Compile a raw configuration map meant as a disjunction.
    ///
    /// Malformed entries are dropped with a warning; the rest still count.
    pub fn compile_any(raw: &RawCondition, context: &str) -> Self {
        let bounds = raw
            .iter()
            .filter_map(|(key, value)| parse_entry(key, value, context))
            .collect();
        Self::from_bounds(bounds)
    }

    /// Whether the condition can ever hold.
    pub const fn is_satisfiable(&self) -> bool {
        self.satisfiable
    }

    /// The compiled bounds.
    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Conjunction: every bound holds.
    pub fn all(&self, state: &BiomeState) -> bool {
        self.satisfiable && self.bounds.iter().all(|b| b.holds(state))
    }

    /// Disjunction: at least one bound holds.
    pub fn any(&self, state: &BiomeState) -> bool {
        self.satisfiable && self.bounds.iter().any(|b| b.holds(state))
    }
}

/// Compile one `key: value` entry, warning when it cannot hold.
fn parse_entry(key: &str, value: &Value, context: &str) -> Option<Bound> {
    let Some((field, kind)) = parse_key(key) else {
        warn!(context, key, "unknown condition key");
        return None;
    };
    let Some(value) = value.as_f64() else {
        warn!(context, key, "non-numeric condition bound");
        return None;
    };
    Some(Bound { field, kind, value })
}

/// Split `"dissolvedOxygenMax"` into `(DissolvedOxygen, Max)`.
fn parse_key(key: &str) -> Option<(BiomeField, BoundKind)> {
    if let Some(name) = key.strip_suffix("Min") {
        return BiomeField::from_name(name).map(|f| (f, BoundKind::Min));
    }
    if let Some(name) = key.strip_suffix("Max") {
        return BiomeField::from_name(name).map(|f| (f, BoundKind::Max));
    }
    None
}
