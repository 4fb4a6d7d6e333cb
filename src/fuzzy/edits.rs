// File: src/fuzzy/edits.rs
//! Symmetric reduced forms used as index keys.
//!
//! A reduced form is what remains after deleting contiguous spans of 1, 2 or 3
//! chars, repeatedly, while the summed span weights fit the budget. Terms and
//! queries are reduced with the same budget, so two strings within the
//! configured distance meet on at least one shared key.

use crate::config::{IndexConfig, OperationWeight};
use std::collections::{BTreeSet, HashMap};

const WEIGHT_EPS: f64 = 1e-9;

/// Reduced form reached by the tracking generator: cheapest weight plus every
/// input-length delta (input len − term len) the operations on some path imply.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEdit {
    pub weight: f64,
    pub length_deltas: BTreeSet<i32>,
}

#[derive(Debug, Clone)]
pub struct EditSetGenerator {
    weights: Vec<OperationWeight>,
    max_weight: f64,
    min_spanning_len: usize,
}

impl EditSetGenerator {
    pub fn new(weights: Vec<OperationWeight>, max_weight: f64, min_spanning_len: usize) -> Self {
        Self {
            weights,
            max_weight,
            min_spanning_len,
        }
    }

    /// Generator for index keys of terms and queries.
    pub fn plain(config: &IndexConfig) -> Self {
        Self::new(
            config.operation_weights.clone(),
            config.max_weight(),
            config.min_spanning_len,
        )
    }

    /// Generator for the affects table; also models an extra input char.
    pub fn tracking(config: &IndexConfig) -> Self {
        Self::new(
            config.tracking_weights(),
            config.max_weight(),
            config.min_spanning_len,
        )
    }

    /// Every reduced form of `term` with the minimum weight over all paths to it.
    /// The term itself is not included.
    pub fn edits(&self, term: &str) -> HashMap<String, f64> {
        let chars: Vec<char> = term.chars().collect();
        let mut edits = HashMap::new();
        self.collect(&chars, 0.0, &mut edits);
        edits
    }

    /// Like [`edits`](Self::edits) but carrying the input-length deltas of
    /// every path. Deltas reaching the same form are unioned.
    pub fn tracking_edits(&self, term: &str) -> HashMap<String, TrackedEdit> {
        let chars: Vec<char> = term.chars().collect();
        let mut edits = HashMap::new();
        self.collect_tracking(&chars, 0.0, &BTreeSet::new(), &mut edits);
        edits
    }

    fn admits(&self, len: usize, op: &OperationWeight, weight: f64) -> bool {
        len >= op.span + self.min_spanning_len && weight <= self.max_weight + WEIGHT_EPS
    }

    fn collect(&self, chars: &[char], used: f64, edits: &mut HashMap<String, f64>) {
        for op in &self.weights {
            let weight = used + op.weight;
            if !self.admits(chars.len(), op, weight) {
                continue;
            }
            for start in starts(chars.len(), op.span) {
                let reduced = splice(chars, start, op.span);
                let key: String = reduced.iter().collect();
                let improved = match edits.get_mut(&key) {
                    Some(existing) if *existing <= weight + WEIGHT_EPS => false,
                    Some(existing) => {
                        *existing = weight;
                        true
                    }
                    None => {
                        edits.insert(key, weight);
                        true
                    }
                };
                // A cheaper arrival can reach everything a dearer one could.
                if improved {
                    self.collect(&reduced, weight, edits);
                }
            }
        }
    }

    fn collect_tracking(
        &self,
        chars: &[char],
        used: f64,
        used_deltas: &BTreeSet<i32>,
        edits: &mut HashMap<String, TrackedEdit>,
    ) {
        for op in &self.weights {
            let weight = used + op.weight;
            if !self.admits(chars.len(), op, weight) {
                continue;
            }
            let deltas = combine_deltas(&op.length_deltas, used_deltas);
            for start in starts(chars.len(), op.span) {
                let reduced = splice(chars, start, op.span);
                let key: String = reduced.iter().collect();
                let changed = match edits.get_mut(&key) {
                    Some(existing) => {
                        let mut changed = false;
                        if weight + WEIGHT_EPS < existing.weight {
                            existing.weight = weight;
                            changed = true;
                        }
                        for delta in &deltas {
                            changed |= existing.length_deltas.insert(*delta);
                        }
                        changed
                    }
                    None => {
                        edits.insert(
                            key,
                            TrackedEdit {
                                weight,
                                length_deltas: deltas.clone(),
                            },
                        );
                        true
                    }
                };
                if changed {
                    self.collect_tracking(&reduced, weight, &deltas, edits);
                }
            }
        }
    }
}

/// Start positions of a span deletion; a zero span has a single (no-op) position.
fn starts(len: usize, span: usize) -> std::ops::RangeInclusive<usize> {
    if span == 0 {
        0..=0
    } else {
        0..=len - span
    }
}

fn splice(chars: &[char], start: usize, span: usize) -> Vec<char> {
    chars[..start]
        .iter()
        .chain(&chars[start + span..])
        .copied()
        .collect()
}

fn combine_deltas(op_deltas: &[i32], used_deltas: &BTreeSet<i32>) -> BTreeSet<i32> {
    if used_deltas.is_empty() {
        return op_deltas.iter().copied().collect();
    }
    op_deltas
        .iter()
        .flat_map(|l1| used_deltas.iter().map(move |l2| l1 + l2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_four_letter_term_only_drops_single_chars() {
        let generator = EditSetGenerator::plain(&IndexConfig::default());
        let edits = generator.edits("abcd");
        let mut keys: Vec<_> = edits.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["abc", "abd", "acd", "bcd"]);
        assert!(edits.values().all(|w| approx(*w, 0.8)));
    }

    #[test]
    fn test_cheapest_path_wins() {
        let generator = EditSetGenerator::plain(&IndexConfig::default());
        let edits = generator.edits("abcdef");
        // one span-2 deletion beats two single deletions
        assert!(approx(edits["abcd"], 1.1));
        assert!(approx(edits["bcdf"], 1.6));
        assert!(approx(edits["abc"], 1.9));
        assert!(approx(edits["bcdef"], 0.8));
        assert!(!edits.contains_key("abcdef"));
    }

    #[test]
    fn test_short_term_has_no_edits() {
        let generator = EditSetGenerator::plain(&IndexConfig::default());
        assert!(generator.edits("abc").is_empty());
        assert!(generator.edits("").is_empty());
    }

    #[test]
    fn test_tracking_unions_length_deltas() {
        let generator = EditSetGenerator::tracking(&IndexConfig::default());
        let edits = generator.tracking_edits("abcd");

        let itself = &edits["abcd"];
        assert!(approx(itself.weight, 0.8));
        assert!(itself.length_deltas.contains(&1));

        let reduced = &edits["abc"];
        assert!(approx(reduced.weight, 0.8));
        assert_eq!(
            reduced.length_deltas.iter().copied().collect::<Vec<_>>(),
            vec![-1, 0, 1]
        );
    }

    /// Exhaustive reference: every path, no pruning.
    fn brute_force(
        chars: &[char],
        used: f64,
        generator: &EditSetGenerator,
        out: &mut HashMap<String, f64>,
    ) {
        for op in &generator.weights {
            let weight = used + op.weight;
            if !generator.admits(chars.len(), op, weight) {
                continue;
            }
            for start in starts(chars.len(), op.span) {
                let reduced = splice(chars, start, op.span);
                let key: String = reduced.iter().collect();
                let entry = out.entry(key).or_insert(f64::INFINITY);
                if weight < *entry {
                    *entry = weight;
                }
                brute_force(&reduced, weight, generator, out);
            }
        }
    }

    proptest! {
        #[test]
        fn reduced_forms_respect_spanning_len(term in "[a-f]{0,9}", min_spanning in 1usize..4) {
            let config = IndexConfig { min_spanning_len: min_spanning, ..IndexConfig::default() };
            let generator = EditSetGenerator::plain(&config);
            for key in generator.edits(&term).keys() {
                prop_assert!(key.chars().count() >= min_spanning);
                prop_assert!(key.chars().count() < term.chars().count());
            }
        }

        #[test]
        fn recorded_weight_is_minimum_over_paths(term in "[a-e]{1,7}") {
            let config = IndexConfig { min_spanning_len: 1, ..IndexConfig::default() };
            let generator = EditSetGenerator::plain(&config);
            let edits = generator.edits(&term);

            let chars: Vec<char> = term.chars().collect();
            let mut reference = HashMap::new();
            brute_force(&chars, 0.0, &generator, &mut reference);

            prop_assert_eq!(edits.len(), reference.len());
            for (key, weight) in &edits {
                prop_assert!(approx(*weight, reference[key]));
            }
        }
    }
}
