// src/core/types.rs
use crate::core::prescription::EditorialPrescription;
use serde::{Deserialize, Serialize};

/// Stable identifier of a vocabulary term: its insertion position.
pub type TermId = usize;

/// A candidate correction for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub term: String,
    pub distance: usize,
    /// Steps turning `term` into the query; `None` for exact matches or
    /// when the lookup did not ask for prescriptions.
    pub prescription: Option<EditorialPrescription>,
    /// Filled in by a ranker.
    pub score: f64,
    /// Accumulated frequency of `term` in the training data.
    pub count: f64,
}

impl Suggestion {
    pub fn new(
        term: impl Into<String>,
        distance: usize,
        prescription: Option<EditorialPrescription>,
        count: f64,
    ) -> Self {
        Self {
            term: term.into(),
            distance,
            prescription,
            score: 0.0,
            count,
        }
    }
}

/// A labeled misspelling together with the candidates the index offered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningExample {
    /// The intended term.
    pub term: String,
    /// What was actually typed.
    pub misspell: String,
    pub suggestions: Vec<Suggestion>,
}

impl LearningExample {
    /// The candidate equal to the intended term, if the index offered it.
    pub fn correct_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.term == self.term)
    }
}
