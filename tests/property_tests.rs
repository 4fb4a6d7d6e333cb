//! Property tests for distance, reduced forms and index lookups.

use proptest::prelude::*;
use spell_core::core::distance::DistanceMeasurer;
use spell_core::{IndexConfig, TermIndex};

/// A term plus a query one typo away from it.
fn term_and_typo() -> impl Strategy<Value = (String, String)> {
    ("[a-h]{5,9}", any::<prop::sample::Index>(), 0..4usize, "[a-h]").prop_map(
        |(term, position, kind, c)| {
            let chars: Vec<char> = term.chars().collect();
            let k = position.index(chars.len() - 1);
            let mut query = chars.clone();
            match kind {
                0 => query[k] = c.chars().next().unwrap_or('a'),
                1 => {
                    query.remove(k);
                }
                2 => query.insert(k, c.chars().next().unwrap_or('a')),
                _ => query.swap(k, k + 1),
            }
            (term, query.into_iter().collect())
        },
    )
}

proptest! {
    #[test]
    fn distance_to_itself_is_zero(s in "\\PC{0,12}") {
        let (distance, prescription) = DistanceMeasurer::new().distance(&s, &s, true);
        prop_assert_eq!(distance, 0);
        let prescription = prescription.unwrap();
        prop_assert!(prescription.is_identity());
        prop_assert_eq!(prescription.len(), s.chars().count());
    }

    #[test]
    fn distance_bounded_by_longer_length(a in "[a-d]{0,8}", b in "[a-d]{0,8}") {
        let distance = DistanceMeasurer::new().measure(&a, &b);
        prop_assert!(distance <= a.len().max(b.len()));
    }

    #[test]
    fn prescription_spells_both_strings(a in "[a-e]{0,8}", b in "[a-e]{0,8}") {
        let (_, prescription) = DistanceMeasurer::new().distance(&a, &b, true);
        let prescription = prescription.unwrap();
        let steps = prescription.steps();

        // multi-slot steps list their pairs in reading order too
        let from: String = steps.iter().filter_map(|s| s.from).collect();
        let to: String = steps.iter().filter_map(|s| s.to).collect();
        prop_assert_eq!(from, a);
        prop_assert_eq!(to, b);
    }

    #[test]
    fn exact_match_always_reported(terms in prop::collection::vec("[a-f]{4,8}", 1..6)) {
        let mut index = TermIndex::default().with_pool_size(1);
        index.train(&terms);
        for term in &terms {
            let suggestions = index.raw_suggestions(term, true);
            prop_assert_eq!(suggestions[term.as_str()].distance, 0);
            prop_assert!(suggestions[term.as_str()].prescription.is_none());
        }
    }

    #[test]
    fn single_typo_is_found((term, query) in term_and_typo()) {
        let mut index = TermIndex::default().with_pool_size(1);
        index.add_term(&term, 1.0);
        let suggestions = index.raw_suggestions(&query, false);
        let expected = DistanceMeasurer::new().measure(&term, &query);
        prop_assert_eq!(suggestions.get(term.as_str()).map(|s| s.distance), Some(expected));
    }

    #[test]
    fn suggestions_never_exceed_depth(
        terms in prop::collection::vec("[a-d]{4,7}", 1..8),
        query in "[a-d]{3,8}",
        depth in 1usize..3,
    ) {
        let config = IndexConfig { depth, ..IndexConfig::default() };
        let mut index = TermIndex::new(config).unwrap().with_pool_size(1);
        index.train(&terms);
        let mut measurer = DistanceMeasurer::new();
        for suggestion in index.raw_suggestions(&query, false).values() {
            prop_assert!(suggestion.distance <= depth);
            prop_assert_eq!(suggestion.distance, measurer.measure(&suggestion.term, &query));
        }
    }

    #[test]
    fn repeated_training_accumulates(term in "[a-z]{4,10}", times in 1usize..5) {
        let mut index = TermIndex::default().with_pool_size(1);
        for _ in 0..times {
            index.add_term(&term, 2.0);
        }
        prop_assert_eq!(index.len(), 1);
        prop_assert_eq!(index.term_count(&term), Some(2.0 * times as f64));
    }
}
