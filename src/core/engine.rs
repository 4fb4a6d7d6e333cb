// File: src/core/engine.rs
use crate::config::SpellConfig;
use crate::core::types::{LearningExample, Suggestion};
use crate::error::Result;
use crate::fuzzy::symspell::TermIndex;
use crate::learning::{collect_examples, Learner};
use crate::misspell::MisspellBlock;
use crate::persistence::{load_index, save_index};
use crate::scoring::{Ranker, TrainedScorer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One labeled misspelling the top-ranked suggestion got wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Miss {
    pub misspell: String,
    pub expected: String,
    pub got: Option<String>,
}

/// Top-1 accuracy over a set of learning examples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
    pub misses: Vec<Miss>,
}

impl EvaluationReport {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

/// Facade over a [`TermIndex`]: training, ranked lookups and evaluation.
pub struct SpellEngine {
    index: TermIndex,
}

impl Default for SpellEngine {
    fn default() -> Self {
        Self::from_index(TermIndex::default())
    }
}

impl SpellEngine {
    /// Fails when the index section of `config` is invalid.
    pub fn new(config: SpellConfig) -> Result<Self> {
        Ok(Self::from_index(TermIndex::new(config.index)?))
    }

    pub fn from_index(index: TermIndex) -> Self {
        Self { index }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_index(load_index(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_index(&self.index, path)
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut TermIndex {
        &mut self.index
    }

    pub fn into_index(self) -> TermIndex {
        self.index
    }

    pub fn add_term(&mut self, term: &str, count: f64) -> bool {
        self.index.add_term(term, count)
    }

    pub fn train<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.index.train(terms)
    }

    pub fn train_text(&mut self, text: &str) -> usize {
        self.index.train_text(text)
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.index.has_term(term)
    }

    /// Unranked candidates within the configured depth.
    pub fn raw_suggestions(&self, query: &str, want_prescription: bool) -> Vec<Suggestion> {
        self.index
            .raw_suggestions(query, want_prescription)
            .into_values()
            .collect()
    }

    /// Candidates for `query`, best first. Fails only for an untrained ranker.
    pub fn suggestions<R: Ranker + ?Sized>(
        &self,
        query: &str,
        ranker: &R,
        want_prescription: bool,
    ) -> Result<Vec<Suggestion>> {
        let mut suggestions = self.raw_suggestions(query, want_prescription);
        ranker.rank(&mut suggestions)?;
        debug!(query, candidates = suggestions.len(), "ranked suggestions");
        Ok(suggestions)
    }

    /// Looks up every query on the rayon pool; results keep query order.
    pub fn suggest_batch<R, S>(
        &self,
        queries: &[S],
        ranker: &R,
        want_prescription: bool,
    ) -> Result<Vec<Vec<Suggestion>>>
    where
        R: Ranker + Sync + ?Sized,
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.suggestions(query.as_ref(), ranker, want_prescription))
            .collect()
    }

    /// Harvests learning examples from labeled misspellings; unknown correct
    /// terms are added to the index.
    pub fn collect_examples(&mut self, blocks: &[MisspellBlock]) -> Vec<LearningExample> {
        collect_examples(&mut self.index, blocks)
    }

    pub fn learn<L: Learner>(&self, learner: &L, examples: &[LearningExample]) -> TrainedScorer {
        learner.learn(examples).into()
    }

    /// Ranks each example's misspelling and checks the top suggestion.
    pub fn evaluate<R: Ranker + Sync + ?Sized>(
        &self,
        examples: &[LearningExample],
        ranker: &R,
    ) -> Result<EvaluationReport> {
        let ranked: Vec<Vec<Suggestion>> = examples
            .par_iter()
            .map(|example| self.suggestions(&example.misspell, ranker, true))
            .collect::<Result<_>>()?;

        let mut report = EvaluationReport::default();
        for (example, suggestions) in examples.iter().zip(ranked) {
            if !self.index.has_term(&example.term) {
                continue;
            }
            report.total += 1;
            let top = suggestions.into_iter().next().map(|s| s.term);
            if top.as_deref() == Some(example.term.as_str()) {
                report.correct += 1;
            } else {
                report.misses.push(Miss {
                    misspell: example.misspell.clone(),
                    expected: example.term.clone(),
                    got: top,
                });
            }
        }
        info!(
            total = report.total,
            correct = report.correct,
            accuracy = report.accuracy(),
            "evaluation finished"
        );
        Ok(report)
    }
}
