// File: src/scoring/vectorizer.rs
//! Maps a prescription onto a fixed set of edit-type counters.

use crate::core::prescription::{EditAction, EditorialPrescription};
use crate::scoring::vector::{FeatureVector, EPS};

pub const R_FIRST: usize = 0;
pub const R_CONSONANT: usize = 1;
pub const R_DISTANCE_1: usize = 2;
pub const R_DISTANCE_2: usize = 3;
pub const R_DISTANCE_3: usize = 4;
pub const R_DISTANCE_4: usize = 5;
pub const R_DISTANCE_OTHER: usize = 6;
pub const D_FIRST: usize = 7;
pub const D_LAST: usize = 8;
pub const D_MIDDLE: usize = 9;
pub const I_FIRST: usize = 10;
pub const I_MIDDLE: usize = 11;
pub const TRANSPOSITION: usize = 12;
pub const MISS_DOUBLE: usize = 13;
pub const DUPLICATE: usize = 14;
pub const TRIPLET: usize = 15;

/// Sound-alike pairs; matched in either direction.
const CONSONANT_PAIRS: [(char, char); 7] = [
    ('d', 't'),
    ('u', 'y'),
    ('u', 'a'),
    ('v', 'w'),
    ('j', 'g'),
    ('c', 'k'),
    ('s', 'z'),
];

const KEY_ROWS: [(&str, f64, f64); 4] = [
    ("0123456789", 0.0, 0.0),
    ("qwertyuiop", 0.5, 1.0),
    ("asdfghjkl", 0.9, 2.0),
    ("zxcvbnm", 1.3, 3.0),
];

/// Position of a key on a staggered QWERTY layout, in key widths.
fn key_location(c: char) -> Option<(f64, f64)> {
    KEY_ROWS.iter().find_map(|(row, offset, y)| {
        row.chars()
            .position(|key| key == c)
            .map(|x| (x as f64 + offset, *y))
    })
}

fn is_consonant_pair(from: char, to: char) -> bool {
    CONSONANT_PAIRS
        .iter()
        .any(|&(a, b)| (from == a && to == b) || (from == b && to == a))
}

/// Manhattan distance between two keys, `None` when either is off the layout.
pub fn qwerty_distance(from: char, to: char) -> Option<f64> {
    let (fx, fy) = key_location(from)?;
    let (tx, ty) = key_location(to)?;
    Some((tx - fx).abs() + (ty - fy).abs())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrescriptionVectorizer;

impl PrescriptionVectorizer {
    pub fn new() -> Self {
        Self
    }

    pub fn vectorize(&self, prescription: &EditorialPrescription) -> FeatureVector {
        let steps = prescription.steps();
        let mut features = FeatureVector::zero();
        let mut i = 0;
        while i < steps.len() {
            let step = &steps[i];
            match step.action {
                EditAction::Replace => {
                    if let Some(slot) = replace_slot(i, step.from, step.to) {
                        features[slot] += 1.0;
                    }
                }
                EditAction::Delete => {
                    let slot = if i == 0 {
                        D_FIRST
                    } else if i == steps.len() - 1 {
                        D_LAST
                    } else {
                        D_MIDDLE
                    };
                    features[slot] += 1.0;
                }
                EditAction::Insert => {
                    features[if i == 0 { I_FIRST } else { I_MIDDLE }] += 1.0;
                }
                EditAction::Transposition => features[TRANSPOSITION] += 1.0,
                EditAction::MissDouble => features[MISS_DOUBLE] += 1.0,
                EditAction::Duplicate => features[DUPLICATE] += 1.0,
                EditAction::Triplet => features[TRIPLET] += 1.0,
                EditAction::Match => {}
            }
            i += step.action.slots();
        }
        features
    }
}

fn replace_slot(position: usize, from: Option<char>, to: Option<char>) -> Option<usize> {
    if position == 0 {
        return Some(R_FIRST);
    }
    let (from, to) = (from?, to?);
    if is_consonant_pair(from, to) {
        return Some(R_CONSONANT);
    }
    let distance = qwerty_distance(from, to)?;
    Some(if distance <= 1.0 + EPS {
        R_DISTANCE_1
    } else if distance <= 2.0 + EPS {
        R_DISTANCE_2
    } else if distance <= 3.0 + EPS {
        R_DISTANCE_3
    } else if distance <= 4.0 + EPS {
        R_DISTANCE_4
    } else {
        R_DISTANCE_OTHER
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::DistanceMeasurer;
    use crate::core::prescription::EditStep;
    use pretty_assertions::assert_eq;

    fn vectorize(term: &str, input: &str) -> FeatureVector {
        let (_, prescription) = DistanceMeasurer::new().distance(term, input, true);
        PrescriptionVectorizer::new().vectorize(&prescription.unwrap())
    }

    fn only(slot: usize) -> FeatureVector {
        let mut v = FeatureVector::zero();
        v[slot] = 1.0;
        v
    }

    #[test]
    fn test_qwerty_distance() {
        assert_eq!(qwerty_distance('q', 'w'), Some(1.0));
        assert!((qwerty_distance('q', 'a').unwrap() - 1.4).abs() < 1e-9);
        assert_eq!(qwerty_distance('a', 'é'), None);
        assert_eq!(qwerty_distance('e', 'e'), Some(0.0));
    }

    #[test]
    fn test_replace_bands() {
        assert_eq!(vectorize("cat", "bat"), only(R_FIRST));
        assert_eq!(vectorize("dot", "dod"), only(R_CONSONANT));
        assert_eq!(vectorize("dod", "dot"), only(R_CONSONANT));
        // e -> r are neighbours on the top row
        assert_eq!(vectorize("bet", "brt"), only(R_DISTANCE_1));
        assert_eq!(vectorize("bet", "bpt"), only(R_DISTANCE_OTHER));
    }

    #[test]
    fn test_off_layout_replace_is_uncounted() {
        assert!(vectorize("aé", "aè").is_zero());
    }

    #[test]
    fn test_delete_and_insert_positions() {
        // term "xcat" -> input "cat" drops the first char
        assert_eq!(vectorize("xcat", "cat"), only(D_FIRST));
        assert_eq!(vectorize("catx", "cat"), only(D_LAST));
        assert_eq!(vectorize("caxt", "cat"), only(D_MIDDLE));
        assert_eq!(vectorize("cat", "xcat"), only(I_FIRST));
        assert_eq!(vectorize("cat", "caxt"), only(I_MIDDLE));
    }

    #[test]
    fn test_compound_operations_count_once() {
        assert_eq!(vectorize("receive", "recieve"), only(TRANSPOSITION));
        assert_eq!(vectorize("letter", "leter"), only(MISS_DOUBLE));
        assert_eq!(vectorize("leter", "letter"), only(DUPLICATE));
        assert_eq!(vectorize("xabcx", "xbcax"), only(TRIPLET));
    }

    #[test]
    fn test_hand_built_prescription() {
        let prescription = EditorialPrescription::from_steps(vec![
            EditStep::new(EditAction::Replace, Some('a'), Some('s')),
            EditStep::new(EditAction::Match, Some('b'), Some('b')),
            EditStep::new(EditAction::Replace, Some('s'), Some('z')),
            EditStep::new(EditAction::Delete, Some('c'), None),
        ]);
        let features = PrescriptionVectorizer::new().vectorize(&prescription);
        assert_eq!(features[R_FIRST], 1.0);
        assert_eq!(features[R_CONSONANT], 1.0);
        assert_eq!(features[D_LAST], 1.0);
        assert_eq!(features.sum(), 3.0);
    }
}
