// File: src/config.rs
//! Tunables for the index and the weight learners.
//!
//! Every struct has sensible defaults and can be overridden from a TOML file:
//!
//! ```toml
//! [index]
//! depth = 2
//! index_split_len = 5
//!
//! [learner]
//! restarts = 50
//! seed = 7
//! ```

use crate::error::{Result, SpellError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cost of deleting a contiguous span of `span` characters while generating
/// reduced forms, together with the input-length deltas such a deletion can
/// stand for (a deleted char may have been replaced or dropped in the input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationWeight {
    pub span: usize,
    pub weight: f64,
    pub length_deltas: Vec<i32>,
}

impl OperationWeight {
    pub fn new(span: usize, weight: f64, length_deltas: &[i32]) -> Self {
        Self {
            span,
            weight,
            length_deltas: length_deltas.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Maximum edit distance accepted as a correction.
    pub depth: usize,
    /// Edit keys longer than this are split into an indexed head and a verified tail.
    pub index_split_len: usize,
    /// Terms shorter than this are never indexed.
    pub min_term_len: usize,
    /// Reduced forms never get shorter than this.
    pub min_spanning_len: usize,
    /// Corpus training keeps only terms seen at least this often.
    pub min_term_count: f64,
    /// Span deletions, cheapest first.
    pub operation_weights: Vec<OperationWeight>,
    /// Zero-span step used only when tracking input-length deltas (an extra input char).
    pub insertion_weight: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            index_split_len: 5,
            min_term_len: 4,
            min_spanning_len: 3,
            min_term_count: 10.0,
            operation_weights: vec![
                OperationWeight::new(1, 0.8, &[0, -1]),
                OperationWeight::new(2, 1.1, &[0]),
                OperationWeight::new(3, 1.9, &[0]),
            ],
            insertion_weight: 0.8,
        }
    }
}

impl IndexConfig {
    /// Weight budget shared by indexed terms and queries.
    pub fn max_weight(&self) -> f64 {
        self.depth as f64
    }

    /// Rejects values the index cannot work with: an empty minimum term
    /// length, zero-width span deletions and non-positive weights (a free
    /// step lets edit generation recurse without bound).
    pub fn validate(&self) -> Result<()> {
        if self.min_term_len == 0 {
            return Err(invalid("min_term_len must be at least 1"));
        }
        for op in &self.operation_weights {
            if op.span == 0 {
                return Err(invalid("operation_weights spans must be at least 1"));
            }
            if !(op.weight > 0.0 && op.weight.is_finite()) {
                return Err(invalid(format!(
                    "operation weight for span {} must be positive, got {}",
                    op.span, op.weight
                )));
            }
        }
        if !(self.insertion_weight > 0.0 && self.insertion_weight.is_finite()) {
            return Err(invalid(format!(
                "insertion_weight must be positive, got {}",
                self.insertion_weight
            )));
        }
        Ok(())
    }

    /// Operation table for the tracking generator: the zero-span insertion
    /// step followed by the ordinary span deletions.
    pub fn tracking_weights(&self) -> Vec<OperationWeight> {
        let mut weights = Vec::with_capacity(self.operation_weights.len() + 1);
        weights.push(OperationWeight::new(0, self.insertion_weight, &[1]));
        weights.extend(self.operation_weights.iter().cloned());
        weights
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Random restarts of the local search.
    pub restarts: usize,
    /// Stop after this many consecutive restarts without a better best score.
    pub max_stale_restarts: usize,
    /// Cap on hill-climbing iterations within one restart.
    pub max_iterations: usize,
    /// Per-dimension perturbation.
    pub step: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            restarts: 100,
            max_stale_restarts: 10,
            max_iterations: 1000,
            step: 0.1,
            min_weight: 0.0,
            max_weight: 1.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    pub index: IndexConfig,
    pub learner: LearnerConfig,
}

impl SpellConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SpellConfig = toml::from_str(text)?;
        config.index.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

fn invalid(message: impl Into<String>) -> SpellError {
    SpellError::InvalidConfig(message.into())
}
