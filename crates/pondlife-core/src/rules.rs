//! Rule engine: the deterministic update law for one pond tick.
//!
//! [`transition`] maps a snapshot and the active remediation flags to the
//! next snapshot. It is a total function: every delta is added to the
//! previous value and the sum is clamped to `[0, 100]`, so no input can
//! produce an out-of-range or undefined result. The tick counter is
//! copied through unchanged; advancing it is the engine's job.
//!
//! # Update order
//!
//! Later stages read values already written earlier in the *same* tick:
//!
//! | Stage | Writes | Reads from this tick |
//! |-------|--------|----------------------|
//! | 1. Producers | phytoplankton, aquatic plants | -- |
//! | 2. Consumers | zooplankton, small fish, large fish | phytoplankton, zooplankton, small fish |
//! | 3. Decomposition | decomposers | -- |
//! | 4. Nutrients | nutrients | phytoplankton, plants, decomposers |
//! | 5. Oxygen | dissolved oxygen | phytoplankton, plants, decomposers |
//! | 6. Turbidity | turbidity | phytoplankton, plants, nutrients |
//! | 7. Remediation | oxygen (aerator), nutrients (buffer) | everything |
//!
//! Every other read (including all threshold tests and the oxygen-driven
//! fish penalties) uses the previous snapshot.

use pondlife_types::{BiomeState, EngineFlags, clamp_field};

/// Oxygen added per tick while the aerator runs.
pub const AERATOR_OXYGEN_BOOST: f64 = 8.0;

/// Nutrients intercepted per tick while the buffer strip is planted.
pub const BUFFER_NUTRIENT_UPTAKE: f64 = 4.0;

/// Nutrient pulse delivered by a single runoff event.
pub const RUNOFF_NUTRIENT_LOAD: f64 = 60.0;

/// The fixed starting snapshot: a clear, well-oxygenated pond.
pub const fn initial_state() -> BiomeState {
    BiomeState {
        tick: 0,
        nutrients: 20.0,
        dissolved_oxygen: 80.0,
        water_turbidity: 15.0,
        phytoplankton: 25.0,
        aquatic_plants: 60.0,
        zooplankton: 30.0,
        small_fish: 50.0,
        large_fish: 20.0,
        decomposers: 40.0,
    }
}

/// Compute the next snapshot from `prev` and the active remediation flags.
pub fn transition(prev: &BiomeState, flags: EngineFlags) -> BiomeState {
    // 1. Producers
    let phytoplankton = clamp_field(prev.phytoplankton + phytoplankton_growth(prev));
    let aquatic_plants = clamp_field(prev.aquatic_plants + plant_growth(prev));

    // 2. Consumers: fresh producer values, previous consumer values
    let zooplankton = clamp_field(
        prev.zooplankton + 0.06 * phytoplankton
            - 0.07 * prev.small_fish
            - 0.02 * prev.zooplankton,
    );
    let small_fish = clamp_field(
        prev.small_fish + 0.05 * zooplankton
            - 0.06 * prev.large_fish
            - 0.01 * prev.small_fish
            - small_fish_hypoxia_penalty(prev.dissolved_oxygen),
    );
    let large_fish = clamp_field(
        prev.large_fish + 0.03 * small_fish
            - 1.2
            - 0.005 * prev.large_fish
            - large_fish_hypoxia_penalty(prev.dissolved_oxygen),
    );

    // 3. Decomposition
    let decomposers = clamp_field(
        prev.decomposers + 0.08 * dead_organic_matter(prev) - 0.02 * prev.decomposers,
    );

    // 4. Nutrients: recycled by decomposers, taken up by producers, slight outflow
    let nutrients = clamp_field(
        prev.nutrients + 0.07 * decomposers
            - (0.015 * phytoplankton + 0.01 * aquatic_plants)
            - 0.3,
    );

    // 5. Oxygen: photosynthesis against decomposition
    let dissolved_oxygen = clamp_field(
        prev.dissolved_oxygen + 0.09 * aquatic_plants + 0.05 * phytoplankton
            - 0.06 * decomposers,
    );

    // 6. Turbidity: algae and nutrients cloud, plants clarify
    let water_turbidity = clamp_field(
        prev.water_turbidity + 0.06 * phytoplankton + 0.03 * nutrients
            - 0.05 * aquatic_plants,
    );

    let mut next = BiomeState {
        tick: prev.tick,
        nutrients,
        dissolved_oxygen,
        water_turbidity,
        phytoplankton,
        aquatic_plants,
        zooplankton,
        small_fish,
        large_fish,
        decomposers,
    };

    // 7. Remediation
    apply_remediation(&mut next, flags);
    next
}

/// One-shot nutrient pulse. Only `nutrients` changes; `tick` included,
/// every other field is carried over.
pub fn apply_runoff(state: &BiomeState) -> BiomeState {
    BiomeState {
        nutrients: clamp_field(state.nutrients + RUNOFF_NUTRIENT_LOAD),
        ..*state
    }
}

/// Composite water-quality score from the previous snapshot (0-100).
pub fn health_score(state: &BiomeState) -> f64 {
    0.5 * state.dissolved_oxygen
        + 0.25 * (100.0 - state.nutrients)
        + 0.25 * (100.0 - state.water_turbidity)
}

fn phytoplankton_growth(prev: &BiomeState) -> f64 {
    let mut growth = 2.0;
    if prev.nutrients > 40.0 {
        growth += 2.0;
    }
    if prev.nutrients > 70.0 {
        growth += 4.0;
    }
    // Macrophytes shade out algae.
    if prev.aquatic_plants > 60.0 {
        growth -= 2.0;
    }
    growth - prev.phytoplankton * 0.02
}

fn plant_growth(prev: &BiomeState) -> f64 {
    let mut growth = 1.8;
    if prev.nutrients > 30.0 {
        growth += 1.5;
    }
    if prev.water_turbidity > 50.0 {
        growth -= 3.0;
    }
    if prev.dissolved_oxygen > 60.0 {
        growth += 0.5;
    }
    growth - prev.aquatic_plants * 0.01
}

fn small_fish_hypoxia_penalty(dissolved_oxygen: f64) -> f64 {
    let mut penalty = 0.0;
    if dissolved_oxygen < 40.0 {
        penalty += 3.0;
    }
    if dissolved_oxygen < 20.0 {
        penalty += 10.0;
    }
    penalty
}

fn large_fish_hypoxia_penalty(dissolved_oxygen: f64) -> f64 {
    if dissolved_oxygen < 30.0 { 5.0 } else { 0.0 }
}

fn dead_organic_matter(prev: &BiomeState) -> f64 {
    (100.0 - health_score(prev)) / 6.0
}

fn apply_remediation(state: &mut BiomeState, flags: EngineFlags) {
    if flags.aerator_active {
        state.dissolved_oxygen = clamp_field(state.dissolved_oxygen + AERATOR_OXYGEN_BOOST);
    }
    if flags.buffer_active {
        state.nutrients = clamp_field(state.nutrients - BUFFER_NUTRIENT_UPTAKE);
    }
}

#[cfg(test)]
mod tests {
    use pondlife_types::BiomeField;

    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    const NO_FLAGS: EngineFlags = EngineFlags {
        aerator_active: false,
        buffer_active: false,
    };

    /// Every combination of the field extremes plus a mid-range sweep.
    fn corner_states() -> Vec<BiomeState> {
        let mut out = Vec::new();
        for mask in 0_u32..512 {
            let mut s = initial_state();
            for (bit, field) in BiomeField::ALL.into_iter().enumerate() {
                let on = (mask >> bit) & 1 == 1;
                s.set(field, if on { 100.0 } else { 0.0 });
            }
            out.push(s);
        }
        for step in 0_u32..=20 {
            let v = f64::from(step) * 5.0;
            let mut s = initial_state();
            for field in BiomeField::ALL {
                s.set(field, v);
            }
            out.push(s);
        }
        out
    }

    #[test]
    fn initial_snapshot_matches_documented_values() {
        let s = initial_state();
        assert_eq!(s.tick, 0);
        assert!(close(s.nutrients, 20.0));
        assert!(close(s.dissolved_oxygen, 80.0));
        assert!(close(s.water_turbidity, 15.0));
        assert!(close(s.phytoplankton, 25.0));
        assert!(close(s.aquatic_plants, 60.0));
        assert!(close(s.zooplankton, 30.0));
        assert!(close(s.small_fish, 50.0));
        assert!(close(s.large_fish, 20.0));
        assert!(close(s.decomposers, 40.0));
    }

    #[test]
    fn first_tick_from_initial_state() {
        let next = transition(&initial_state(), NO_FLAGS);
        assert!(close(next.phytoplankton, 26.5));
        assert!(close(next.aquatic_plants, 61.7));
        assert!(close(next.zooplankton, 27.49));
        assert!(close(next.small_fish, 49.6745));
        assert!(close(next.large_fish, 20.190_235));
        assert!(close(next.decomposers, 39.45));
        assert!(close(next.nutrients, 21.447));
        assert!(close(next.dissolved_oxygen, 84.511));
        assert!(close(next.water_turbidity, 14.148_41));
        assert_eq!(next.tick, 0, "transition leaves the tick to the caller");
    }

    #[test]
    fn every_field_stays_in_range() {
        let flag_sets = [
            NO_FLAGS,
            EngineFlags { aerator_active: true, buffer_active: false },
            EngineFlags { aerator_active: false, buffer_active: true },
            EngineFlags { aerator_active: true, buffer_active: true },
        ];
        for start in corner_states() {
            for flags in flag_sets {
                let mut s = start;
                for _ in 0..50 {
                    s = transition(&s, flags);
                    assert!(s.is_in_bounds(), "out of range from {start:?} with {flags:?}: {s:?}");
                }
            }
        }
    }

    #[test]
    fn transition_is_deterministic() {
        for start in corner_states() {
            let flags = EngineFlags { aerator_active: true, buffer_active: false };
            assert_eq!(transition(&start, flags), transition(&start, flags));
        }
    }

    #[test]
    fn aerator_adds_exactly_eight_oxygen() {
        let s = initial_state();
        let without = transition(&s, NO_FLAGS);
        let with = transition(&s, EngineFlags { aerator_active: true, buffer_active: false });
        assert!(close(with.dissolved_oxygen - without.dissolved_oxygen, AERATOR_OXYGEN_BOOST));
        assert!(close(with.nutrients, without.nutrients));
    }

    #[test]
    fn aerator_boost_is_clamped() {
        let s = initial_state().with(BiomeField::DissolvedOxygen, 100.0);
        let with = transition(&s, EngineFlags { aerator_active: true, buffer_active: false });
        assert!(close(with.dissolved_oxygen, 100.0));
    }

    #[test]
    fn buffer_removes_four_nutrients() {
        let s = initial_state();
        let without = transition(&s, NO_FLAGS);
        let with = transition(&s, EngineFlags { aerator_active: false, buffer_active: true });
        assert!(close(without.nutrients - with.nutrients, BUFFER_NUTRIENT_UPTAKE));
        // Turbidity is computed before remediation and does not see the uptake.
        assert!(close(with.water_turbidity, without.water_turbidity));
    }

    #[test]
    fn nutrient_thresholds_boost_algae() {
        let base = initial_state().with(BiomeField::AquaticPlants, 50.0);
        let low = transition(&base.with(BiomeField::Nutrients, 30.0), NO_FLAGS);
        let mid = transition(&base.with(BiomeField::Nutrients, 50.0), NO_FLAGS);
        let high = transition(&base.with(BiomeField::Nutrients, 80.0), NO_FLAGS);
        // 25 + 2 - 0.5, then +2, then +4 more
        assert!(close(low.phytoplankton, 26.5));
        assert!(close(mid.phytoplankton, 28.5));
        assert!(close(high.phytoplankton, 32.5));
    }

    #[test]
    fn hypoxia_penalises_fish_from_previous_oxygen() {
        assert!(close(small_fish_hypoxia_penalty(45.0), 0.0));
        assert!(close(small_fish_hypoxia_penalty(35.0), 3.0));
        assert!(close(small_fish_hypoxia_penalty(15.0), 13.0));
        assert!(close(large_fish_hypoxia_penalty(29.9), 5.0));
        assert!(close(large_fish_hypoxia_penalty(30.0), 0.0));

        let healthy = transition(&initial_state(), NO_FLAGS);
        let choking = transition(
            &initial_state().with(BiomeField::DissolvedOxygen, 15.0),
            NO_FLAGS,
        );
        assert!(choking.small_fish < healthy.small_fish);
        assert!(choking.large_fish < healthy.large_fish);
    }

    #[test]
    fn health_score_weights() {
        assert!(close(health_score(&initial_state()), 0.5 * 80.0 + 0.25 * 80.0 + 0.25 * 85.0));
    }

    #[test]
    fn runoff_only_touches_nutrients() {
        let s = BiomeState { tick: 17, ..initial_state() };
        let r = apply_runoff(&s);
        assert!(close(r.nutrients, 80.0));
        assert_eq!(r.tick, 17);
        for field in BiomeField::ALL {
            if field != BiomeField::Nutrients {
                assert!(close(r.get(field), s.get(field)), "{field} changed");
            }
        }
        let again = apply_runoff(&r);
        assert!(close(again.nutrients, 100.0));
    }

    #[test]
    fn tick_after_runoff_stays_in_range() {
        let polluted = apply_runoff(&initial_state());
        assert!(close(polluted.nutrients, 80.0));
        let next = transition(&polluted, NO_FLAGS);
        assert!(next.is_in_bounds());
        assert!((0.0..=100.0).contains(&next.dissolved_oxygen));
    }
}
