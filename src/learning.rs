// File: src/learning.rs
pub mod local_search;
pub mod probabilistic;
pub mod vector_system;

use crate::core::distance::DistanceMeasurer;
use crate::core::types::LearningExample;
use crate::fuzzy::symspell::TermIndex;
use crate::misspell::MisspellBlock;
use crate::scoring::{Ranker, TrainedScorer};
use tracing::{debug, info};

pub use local_search::LocalSearchLearner;
pub use probabilistic::ProbabilisticLearner;
pub use vector_system::VectorSystem;

/// Turns labeled examples into a ranker. A learner that finds nothing to learn
/// from returns a scorer whose `is_trained()` is `false`.
pub trait Learner {
    type Scorer: Ranker + Into<TrainedScorer>;

    fn learn(&self, examples: &[LearningExample]) -> Self::Scorer;
}

/// Builds learning examples from labeled misspellings.
///
/// Variants farther than `depth` from their term are dropped, and terms the
/// index does not know yet are added with count 1 so the index can offer them.
pub fn collect_examples(index: &mut TermIndex, blocks: &[MisspellBlock]) -> Vec<LearningExample> {
    let depth = index.config().depth;
    let mut measurer = DistanceMeasurer::new();

    let mut kept: Vec<(String, Vec<String>)> = Vec::with_capacity(blocks.len());
    for block in blocks {
        let term = block.term.to_lowercase();
        let misspells: Vec<String> = block
            .misspells
            .iter()
            .map(|m| m.to_lowercase())
            .filter(|m| measurer.measure(m, &term) <= depth)
            .collect();
        if !index.has_term(&term) {
            index.add_term(&term, 1.0);
        }
        kept.push((term, misspells));
    }

    let mut examples = Vec::new();
    for (term, misspells) in &kept {
        for misspell in misspells {
            if let Some(example) = learning_example(index, term, misspell) {
                examples.push(example);
            }
        }
    }
    info!(
        blocks = blocks.len(),
        examples = examples.len(),
        "collected learning examples"
    );
    examples
}

/// Candidates the index offers for `misspell`, minus the misspelling itself and
/// anything without a prescription. `None` if the term is unknown or nothing
/// remains.
pub fn learning_example(index: &TermIndex, term: &str, misspell: &str) -> Option<LearningExample> {
    if !index.has_term(term) {
        return None;
    }
    let term = term.to_lowercase();
    let misspell = misspell.to_lowercase();
    let suggestions: Vec<_> = index
        .raw_suggestions(&misspell, true)
        .into_values()
        .filter(|s| s.term != misspell && s.prescription.is_some())
        .collect();
    if suggestions.is_empty() {
        debug!(term = %term, misspell = %misspell, "no usable candidates");
        return None;
    }
    Some(LearningExample {
        term,
        misspell,
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks() -> Vec<MisspellBlock> {
        vec![
            MisspellBlock {
                term: "Receive".to_string(),
                misspells: vec!["recieve".to_string(), "rxxxxxe".to_string()],
            },
            MisspellBlock {
                term: "letter".to_string(),
                misspells: vec!["leter".to_string()],
            },
        ]
    }

    #[test]
    fn test_collect_examples() {
        let mut index = TermIndex::default().with_pool_size(1);
        index.train(["receive", "deceive", "relieve"]);

        let examples = collect_examples(&mut index, &blocks());
        // "letter" was unknown and gets added
        assert!(index.has_term("letter"));
        assert_eq!(index.term_count("letter"), Some(1.0));

        let pairs: Vec<_> = examples
            .iter()
            .map(|e| (e.term.as_str(), e.misspell.as_str()))
            .collect();
        assert_eq!(pairs, vec![("receive", "recieve"), ("letter", "leter")]);

        let receive = &examples[0];
        assert!(receive.correct_suggestion().is_some());
        assert!(receive.suggestions.iter().all(|s| s.prescription.is_some()));
        assert!(receive.suggestions.iter().any(|s| s.term == "deceive"));
    }

    #[test]
    fn test_unknown_term_gives_no_example() {
        let index = TermIndex::default().with_pool_size(1);
        assert!(learning_example(&index, "receive", "recieve").is_none());
    }
}
