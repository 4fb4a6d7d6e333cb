// File: src/learning/probabilistic.rs
use crate::core::types::LearningExample;
use crate::learning::Learner;
use crate::scoring::vector::{FeatureVector, EPS};
use crate::scoring::vectorizer::PrescriptionVectorizer;
use crate::scoring::ProbabilisticScorer;
use tracing::info;

/// Closed-form learner: the weight of an edit type is its share of all edits
/// seen between misspellings and their correct terms.
#[derive(Debug, Clone, Default)]
pub struct ProbabilisticLearner {
    vectorizer: PrescriptionVectorizer,
}

impl ProbabilisticLearner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weights(&self, examples: &[LearningExample]) -> Option<FeatureVector> {
        let mut sum: Option<FeatureVector> = None;
        for example in examples {
            let Some(prescription) = example
                .correct_suggestion()
                .and_then(|s| s.prescription.as_ref())
            else {
                continue;
            };
            let features = self.vectorizer.vectorize(prescription);
            sum = Some(sum.map_or(features, |acc| acc + features));
        }

        let sum = sum?;
        let total = sum.sum();
        if total.abs() <= EPS {
            return None;
        }
        Some(sum.scale(1.0 / total))
    }
}

impl Learner for ProbabilisticLearner {
    type Scorer = ProbabilisticScorer;

    fn learn(&self, examples: &[LearningExample]) -> ProbabilisticScorer {
        let weights = self.weights(examples);
        info!(
            examples = examples.len(),
            trained = weights.is_some(),
            "learned edit probabilities"
        );
        ProbabilisticScorer::new(weights)
    }
}
