// File: src/scoring/probabilistic.rs
use crate::core::types::Suggestion;
use crate::scoring::vector::{FeatureVector, EPS, FEATURE_LEN};
use crate::scoring::vectorizer::PrescriptionVectorizer;
use crate::scoring::Ranker;
use serde::{Deserialize, Serialize};

/// Treats each learned weight as the probability of one edit type and scores a
/// suggestion as `count × ∏ wᵢ^xᵢ` over the edit types it uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticScorer {
    weights: Option<FeatureVector>,
    #[serde(skip)]
    vectorizer: PrescriptionVectorizer,
}

impl ProbabilisticScorer {
    pub fn new(weights: Option<FeatureVector>) -> Self {
        Self {
            weights,
            vectorizer: PrescriptionVectorizer::new(),
        }
    }

    pub fn weights(&self) -> Option<&FeatureVector> {
        self.weights.as_ref()
    }

    /// Probability of the edit types in `features`; exact matches get 1.
    fn likelihood(weights: &FeatureVector, features: &FeatureVector) -> f64 {
        (0..FEATURE_LEN)
            .filter(|&i| features[i].abs() > EPS)
            .map(|i| weights[i].powf(features[i]))
            .product()
    }
}

impl Ranker for ProbabilisticScorer {
    fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    fn score(&self, suggestion: &Suggestion) -> f64 {
        let Some(weights) = &self.weights else {
            return f64::NEG_INFINITY;
        };
        let likelihood = suggestion.prescription.as_ref().map_or(1.0, |prescription| {
            Self::likelihood(weights, &self.vectorizer.vectorize(prescription))
        });
        suggestion.count * likelihood
    }
}
