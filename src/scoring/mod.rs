// File: src/scoring/mod.rs
//! Ranking of candidate corrections by learned edit-type weights.

pub mod linear;
pub mod probabilistic;
pub mod vector;
pub mod vectorizer;

use crate::core::types::Suggestion;
use crate::error::{Result, SpellError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use linear::LinearScorer;
pub use probabilistic::ProbabilisticScorer;
pub use vector::FeatureVector;
pub use vectorizer::PrescriptionVectorizer;

/// A ranking strategy. Higher scores rank first for every implementation;
/// `compare` returns `Less` when `a` should be listed before `b`.
pub trait Ranker {
    /// `false` when no weights were learned; such a ranker must not be used.
    fn is_trained(&self) -> bool;

    fn score(&self, suggestion: &Suggestion) -> f64;

    fn compare(&self, a: &Suggestion, b: &Suggestion) -> Ordering {
        self.score(b).total_cmp(&self.score(a))
    }

    /// Scores every suggestion and stable-sorts them with [`compare`](Self::compare),
    /// so ties keep their retrieval order.
    fn rank(&self, suggestions: &mut [Suggestion]) -> Result<()> {
        if !self.is_trained() {
            return Err(SpellError::UntrainedScorer);
        }
        for suggestion in suggestions.iter_mut() {
            suggestion.score = self.score(suggestion);
        }
        suggestions.sort_by(|a, b| self.compare(a, b));
        Ok(())
    }
}

/// A learned scorer of either kind, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrainedScorer {
    Linear(LinearScorer),
    Probabilistic(ProbabilisticScorer),
}

impl TrainedScorer {
    pub fn kind(&self) -> &'static str {
        match self {
            TrainedScorer::Linear(_) => "linear",
            TrainedScorer::Probabilistic(_) => "probabilistic",
        }
    }

    pub fn weights(&self) -> Option<&FeatureVector> {
        match self {
            TrainedScorer::Linear(scorer) => scorer.weights(),
            TrainedScorer::Probabilistic(scorer) => scorer.weights(),
        }
    }
}

impl Ranker for TrainedScorer {
    fn is_trained(&self) -> bool {
        match self {
            TrainedScorer::Linear(scorer) => scorer.is_trained(),
            TrainedScorer::Probabilistic(scorer) => scorer.is_trained(),
        }
    }

    fn score(&self, suggestion: &Suggestion) -> f64 {
        match self {
            TrainedScorer::Linear(scorer) => scorer.score(suggestion),
            TrainedScorer::Probabilistic(scorer) => scorer.score(suggestion),
        }
    }

    fn compare(&self, a: &Suggestion, b: &Suggestion) -> Ordering {
        match self {
            TrainedScorer::Linear(scorer) => scorer.compare(a, b),
            TrainedScorer::Probabilistic(scorer) => scorer.compare(a, b),
        }
    }
}

impl From<LinearScorer> for TrainedScorer {
    fn from(scorer: LinearScorer) -> Self {
        TrainedScorer::Linear(scorer)
    }
}

impl From<ProbabilisticScorer> for TrainedScorer {
    fn from(scorer: ProbabilisticScorer) -> Self {
        TrainedScorer::Probabilistic(scorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Scores by count but lists terms alphabetically.
    struct Alphabetical;

    impl Ranker for Alphabetical {
        fn is_trained(&self) -> bool {
            true
        }

        fn score(&self, suggestion: &Suggestion) -> f64 {
            suggestion.count
        }

        fn compare(&self, a: &Suggestion, b: &Suggestion) -> Ordering {
            a.term.cmp(&b.term)
        }
    }

    #[test]
    fn test_rank_orders_by_compare() {
        let mut suggestions = vec![
            Suggestion::new("relieve", 1, None, 9.0),
            Suggestion::new("deceive", 1, None, 1.0),
            Suggestion::new("receive", 1, None, 5.0),
        ];
        Alphabetical.rank(&mut suggestions).unwrap();

        let terms: Vec<&str> = suggestions.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, ["deceive", "receive", "relieve"]);
        assert_eq!(suggestions[0].score, 1.0);
    }
}
