// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod learning;
pub mod misspell;
pub mod persistence;
pub mod scoring;

pub use crate::config::{IndexConfig, LearnerConfig, SpellConfig};
pub use crate::core::engine::{EvaluationReport, SpellEngine};
pub use crate::core::prescription::{EditAction, EditorialPrescription};
pub use crate::core::types::{LearningExample, Suggestion};
pub use crate::error::{Result, SpellError};
pub use crate::fuzzy::symspell::TermIndex;
pub use crate::learning::{Learner, LocalSearchLearner, ProbabilisticLearner};
pub use crate::scoring::{LinearScorer, ProbabilisticScorer, Ranker, TrainedScorer};
