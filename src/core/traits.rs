//! Trait map merging.
//!
//! A trait map associates a trait name with an integer weight. Persisted
//! maps only ever hold weights > 0; a delta map may carry any signed
//! adjustment. Merging adds deltas onto a previous map and prunes every
//! entry that lands at or below zero.

use std::collections::BTreeMap;

/// Mapping from trait name to integer weight.
///
/// Deterministic iteration order keeps serialized records and rendered
/// output stable across runs.
pub type TraitMap = BTreeMap<String, i32>;

/// Merge a delta map onto a previous trait map.
///
/// For every key in either map the result holds `previous + delta`;
/// entries ≤ 0 are pruned. Keys untouched by the delta pass through.
/// Pure and deterministic — applying the same delta twice accumulates,
/// so callers must not double-apply.
pub fn merge(previous: &TraitMap, deltas: &TraitMap) -> TraitMap {
    let mut merged = previous.clone();

    for (name, delta) in deltas {
        let value = merged.get(name).copied().unwrap_or(0) + delta;
        if value > 0 {
            merged.insert(name.clone(), value);
        } else {
            merged.remove(name);
        }
    }

    merged
}

/// Classification of one round of applied deltas, kept for display.
///
/// The raw delta map itself is the "last update" record; this report
/// splits it into the three buckets the UI shows after a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Positive deltas, `(name, +delta)`.
    pub strengthened: Vec<(String, i32)>,
    /// Negative deltas whose trait survived the merge, `(name, -delta)`.
    pub weakened: Vec<(String, i32)>,
    /// Delta keys absent from the merged map.
    pub removed: Vec<String>,
}

impl MergeReport {
    /// Classify a delta map against the merge result it produced.
    pub fn classify(deltas: &TraitMap, merged: &TraitMap) -> Self {
        let mut report = Self::default();

        for (name, delta) in deltas {
            if !merged.contains_key(name) {
                report.removed.push(name.clone());
            } else if *delta > 0 {
                report.strengthened.push((name.clone(), *delta));
            } else if *delta < 0 {
                report.weakened.push((name.clone(), *delta));
            }
        }

        report
    }

    pub fn is_empty(&self) -> bool {
        self.strengthened.is_empty() && self.weakened.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(entries: &[(&str, i32)]) -> TraitMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_merge_empty_delta_is_identity() {
        let previous = map(&[("curious", 3), ("guarded", 2)]);
        assert_eq!(merge(&previous, &TraitMap::new()), previous);
    }

    #[test]
    fn test_merge_into_empty_filters_positives() {
        let deltas = map(&[("bold", 2), ("timid", -1), ("flat", 0)]);
        assert_eq!(merge(&TraitMap::new(), &deltas), map(&[("bold", 2)]));
    }

    #[test]
    fn test_merge_prunes_at_zero_and_below() {
        let previous = map(&[("curious", 3), ("guarded", 2)]);
        let deltas = map(&[("curious", -3), ("guarded", -5)]);
        assert!(merge(&previous, &deltas).is_empty());
    }

    #[test]
    fn test_merge_untouched_keys_pass_through() {
        let previous = map(&[("curious", 3), ("guarded", 2)]);
        let deltas = map(&[("curious", 1)]);
        let merged = merge(&previous, &deltas);
        assert_eq!(merged.get("guarded"), Some(&2));
        assert_eq!(merged.get("curious"), Some(&4));
    }

    #[test]
    fn test_merge_two_round_scenario() {
        // Mara: empty → {curious:3, guarded:2} → curious dropped, bold added
        let round1 = merge(&TraitMap::new(), &map(&[("curious", 3), ("guarded", 2)]));
        assert_eq!(round1, map(&[("curious", 3), ("guarded", 2)]));

        let round2 = merge(&round1, &map(&[("curious", -4), ("bold", 1)]));
        assert_eq!(round2, map(&[("guarded", 2), ("bold", 1)]));
    }

    #[test]
    fn test_merge_is_not_idempotent() {
        let deltas = map(&[("curious", 2)]);
        let once = merge(&TraitMap::new(), &deltas);
        let twice = merge(&once, &deltas);
        assert_eq!(twice.get("curious"), Some(&4));
    }

    #[test]
    fn test_report_classifies_all_three_buckets() {
        let previous = map(&[("curious", 3), ("guarded", 2)]);
        let deltas = map(&[("curious", -4), ("guarded", -1), ("bold", 1)]);
        let merged = merge(&previous, &deltas);

        let report = MergeReport::classify(&deltas, &merged);
        assert_eq!(report.strengthened, vec![("bold".to_string(), 1)]);
        assert_eq!(report.weakened, vec![("guarded".to_string(), -1)]);
        assert_eq!(report.removed, vec!["curious".to_string()]);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_report_zero_delta_is_unclassified() {
        let previous = map(&[("steady", 2)]);
        let deltas = map(&[("steady", 0)]);
        let merged = merge(&previous, &deltas);
        let report = MergeReport::classify(&deltas, &merged);
        assert!(report.is_empty());
    }

    proptest! {
        /// No merge result ever contains a non-positive weight.
        #[test]
        fn prop_merge_never_yields_nonpositive(
            previous in proptest::collection::btree_map("[a-z]{1,8}", 1i32..50, 0..12),
            deltas in proptest::collection::btree_map("[a-z]{1,8}", -50i32..50, 0..12),
        ) {
            let merged = merge(&previous, &deltas);
            for (name, weight) in &merged {
                prop_assert!(*weight > 0, "{name} has weight {weight}");
            }
        }

        /// Every merged value is exactly previous + delta.
        #[test]
        fn prop_merge_is_pointwise_sum(
            previous in proptest::collection::btree_map("[a-z]{1,8}", 1i32..50, 0..12),
            deltas in proptest::collection::btree_map("[a-z]{1,8}", -50i32..50, 0..12),
        ) {
            let merged = merge(&previous, &deltas);
            for name in previous.keys().chain(deltas.keys()) {
                let expected = previous.get(name).copied().unwrap_or(0)
                    + deltas.get(name).copied().unwrap_or(0);
                match merged.get(name) {
                    Some(v) => prop_assert_eq!(*v, expected),
                    None => prop_assert!(expected <= 0),
                }
            }
        }
    }
}
