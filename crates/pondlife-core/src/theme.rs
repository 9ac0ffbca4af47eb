//! Theme classification: a coarse health category for presentation.
//!
//! Rules come from configuration as an ordered list, each tagging a
//! [`Theme`] with a disjunction of [`Condition`]s. Priority is fixed and
//! independent of list order: every collapse rule is tried first, then
//! every pollution rule, and a pond matching neither is healthy. Rules
//! tagged `healthy` are accepted but never consulted.

use pondlife_types::{BiomeState, Theme};

use crate::condition::Condition;

/// One configured theme rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRule {
    /// The theme this rule votes for.
    pub theme: Theme,
    /// The rule holds when any of these conditions holds (each condition
    /// being a conjunction of its bounds).
    pub any: Vec<Condition>,
}

impl ThemeRule {
    /// Whether any of the rule's conditions holds for `state`.
    pub fn matches(&self, state: &BiomeState) -> bool {
        self.any.iter().any(|c| c.all(state))
    }
}

/// Classify `state` against `rules`: collapsed, then polluted, then healthy.
pub fn classify(state: &BiomeState, rules: &[ThemeRule]) -> Theme {
    for tier in [Theme::Collapsed, Theme::Polluted] {
        if rules
            .iter()
            .filter(|rule| rule.theme == tier)
            .any(|rule| rule.matches(state))
        {
            return tier;
        }
    }
    Theme::Healthy
}

#[cfg(test)]
mod tests {
    use pondlife_types::BiomeField;

    use super::*;
    use crate::condition::Bound;
    use crate::rules::initial_state;

    fn rule(theme: Theme, any: Vec<Vec<Bound>>) -> ThemeRule {
        ThemeRule {
            theme,
            any: any.into_iter().map(Condition::from_bounds).collect(),
        }
    }

    fn sample_rules() -> Vec<ThemeRule> {
        vec![
            rule(
                Theme::Polluted,
                vec![
                    vec![Bound::min(BiomeField::Nutrients, 60.0)],
                    vec![Bound::min(BiomeField::WaterTurbidity, 55.0)],
                ],
            ),
            rule(
                Theme::Collapsed,
                vec![
                    vec![Bound::max(BiomeField::DissolvedOxygen, 15.0)],
                    vec![
                        Bound::max(BiomeField::SmallFish, 5.0),
                        Bound::max(BiomeField::LargeFish, 2.0),
                    ],
                ],
            ),
        ]
    }

    #[test]
    fn initial_pond_is_healthy() {
        assert_eq!(classify(&initial_state(), &sample_rules()), Theme::Healthy);
    }

    #[test]
    fn nutrient_load_is_polluted() {
        let s = initial_state().with(BiomeField::Nutrients, 80.0);
        assert_eq!(classify(&s, &sample_rules()), Theme::Polluted);
    }

    #[test]
    fn collapse_beats_pollution_regardless_of_order() {
        let s = initial_state()
            .with(BiomeField::Nutrients, 95.0)
            .with(BiomeField::DissolvedOxygen, 10.0);
        let rules = sample_rules();
        assert_eq!(classify(&s, &rules), Theme::Collapsed);

        let mut reversed = rules;
        reversed.reverse();
        assert_eq!(classify(&s, &reversed), Theme::Collapsed);
    }

    #[test]
    fn conjunctive_condition_needs_every_bound() {
        let rules = sample_rules();
        let only_small = initial_state().with(BiomeField::SmallFish, 3.0);
        assert_eq!(classify(&only_small, &rules), Theme::Healthy);
        let both = only_small.with(BiomeField::LargeFish, 1.0);
        assert_eq!(classify(&both, &rules), Theme::Collapsed);
    }

    #[test]
    fn unsatisfiable_conditions_are_ignored() {
        let rules = vec![ThemeRule {
            theme: Theme::Collapsed,
            any: vec![Condition::never()],
        }];
        assert_eq!(classify(&initial_state(), &rules), Theme::Healthy);
    }

    #[test]
    fn healthy_rules_are_never_consulted() {
        let rules = vec![rule(
            Theme::Healthy,
            vec![vec![Bound::min(BiomeField::Nutrients, 0.0)]],
        )];
        let s = initial_state().with(BiomeField::Nutrients, 99.0);
        assert_eq!(classify(&s, &rules), Theme::Healthy);
        assert_eq!(classify(&s, &[]), Theme::Healthy);
    }
}
