// File: src/scoring/linear.rs
use crate::core::types::Suggestion;
use crate::scoring::vector::FeatureVector;
use crate::scoring::vectorizer::PrescriptionVectorizer;
use crate::scoring::Ranker;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scores a suggestion as the dot product of its feature vector with the
/// learned weights. Suggestions without a prescription never rank first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearScorer {
    weights: Option<FeatureVector>,
    #[serde(skip)]
    vectorizer: PrescriptionVectorizer,
}

impl LinearScorer {
    pub fn new(weights: Option<FeatureVector>) -> Self {
        Self {
            weights,
            vectorizer: PrescriptionVectorizer::new(),
        }
    }

    pub fn weights(&self) -> Option<&FeatureVector> {
        self.weights.as_ref()
    }

    /// Whether `a` outranks `b` under the learned weights, decided on the
    /// feature difference rather than on two separate scores.
    pub fn prefers(&self, a: &Suggestion, b: &Suggestion) -> bool {
        let (Some(weights), Some(pa), Some(pb)) = (&self.weights, &a.prescription, &b.prescription)
        else {
            return self.score(a) > self.score(b);
        };
        let diff = self.vectorizer.vectorize(pa) - self.vectorizer.vectorize(pb);
        diff.dot(weights) > 0.0
    }
}

impl Ranker for LinearScorer {
    fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    fn score(&self, suggestion: &Suggestion) -> f64 {
        match (&self.weights, &suggestion.prescription) {
            (Some(weights), Some(prescription)) => {
                self.vectorizer.vectorize(prescription).dot(weights)
            }
            _ => f64::NEG_INFINITY,
        }
    }

    fn compare(&self, a: &Suggestion, b: &Suggestion) -> Ordering {
        if self.prefers(a, b) {
            Ordering::Less
        } else if self.prefers(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::DistanceMeasurer;
    use crate::scoring::vectorizer::{R_DISTANCE_OTHER, TRANSPOSITION};

    fn suggestion(term: &str, input: &str) -> Suggestion {
        let (distance, prescription) = DistanceMeasurer::new().distance(term, input, true);
        Suggestion::new(term, distance, prescription, 1.0)
    }

    fn weights() -> FeatureVector {
        let mut w = FeatureVector::zero();
        w[TRANSPOSITION] = -0.1;
        w[R_DISTANCE_OTHER] = -0.9;
        w
    }

    #[test]
    fn test_higher_dot_product_ranks_first() {
        let scorer = LinearScorer::new(Some(weights()));
        // transposition is cheap, a far replace is expensive
        let mut suggestions = vec![
            suggestion("recieqe", "recieve"),
            suggestion("receive", "recieve"),
        ];
        scorer.rank(&mut suggestions).unwrap();
        assert_eq!(suggestions[0].term, "receive");
        assert!((suggestions[0].score + 0.1).abs() < 1e-9);
        assert_eq!(scorer.compare(&suggestions[0], &suggestions[1]), Ordering::Less);
    }

    #[test]
    fn test_missing_prescription_never_first() {
        let scorer = LinearScorer::new(Some(weights()));
        let exact = Suggestion::new("recieve", 0, None, 5.0);
        let mut suggestions = vec![exact, suggestion("receive", "recieve")];
        scorer.rank(&mut suggestions).unwrap();
        assert_eq!(suggestions[0].term, "receive");
        assert_eq!(suggestions[1].score, f64::NEG_INFINITY);
    }

    #[test]
    fn test_untrained_scorer_refuses_to_rank() {
        let scorer = LinearScorer::new(None);
        let mut suggestions = vec![suggestion("receive", "recieve")];
        assert!(matches!(
            scorer.rank(&mut suggestions),
            Err(crate::error::SpellError::UntrainedScorer)
        ));
    }

    #[test]
    fn test_ties_keep_retrieval_order() {
        let scorer = LinearScorer::new(Some(FeatureVector::zero()));
        let mut suggestions = vec![suggestion("abcd", "abce"), suggestion("abce", "abcf")];
        scorer.rank(&mut suggestions).unwrap();
        assert_eq!(suggestions[0].term, "abcd");
        assert_eq!(scorer.compare(&suggestions[0], &suggestions[1]), Ordering::Equal);
    }
}
