// File: src/fuzzy/symspell.rs
use crate::config::IndexConfig;
use crate::core::pool::MeasurerPool;
use crate::core::types::{Suggestion, TermId};
use crate::corpus::count_terms;
use crate::error::Result;
use crate::fuzzy::edits::EditSetGenerator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Suggestions keyed by term, in retrieval order.
pub type SuggestionSet = IndexMap<String, Suggestion>;

/// Vocabulary plus a symmetric reduced-form index over it.
///
/// Every term is reduced with [`EditSetGenerator`]; each reduced form (split
/// into a bounded head and a verified tail) maps to the ids of the terms that
/// produce it, bucketed by term length. A query is reduced the same way and the
/// affects table narrows each probe to the term lengths that can actually lie
/// within `depth` of a query of that length. Survivors are verified with an
/// exact distance computation.
///
/// Everything only grows: ids are never reused, buckets and the affects table
/// are append-only. Mutation takes `&mut self`, so it is serialized against
/// itself and against lookups by the borrow checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermIndex {
    config: IndexConfig,
    terms: Vec<String>,
    term_ids: HashMap<String, TermId>,
    counts: Vec<f64>,
    total_terms: f64,
    /// head -> [term len - 1] -> term ids in increasing order
    index: HashMap<String, Vec<Vec<TermId>>>,
    /// tail -> heads it was seen with
    index_tail: HashMap<String, HashSet<String>>,
    /// [input len - 1][edit len - 1] -> sorted term lengths
    affects: Vec<Vec<Vec<usize>>>,
    /// [term len - 1] -> affects already merged for this length
    known_affects: Vec<bool>,
    #[serde(skip)]
    measurers: MeasurerPool,
}

impl Default for TermIndex {
    fn default() -> Self {
        Self::unchecked(IndexConfig::default())
    }
}

impl TermIndex {
    /// Fails with [`SpellError::InvalidConfig`](crate::error::SpellError::InvalidConfig)
    /// when `config` does not pass [`IndexConfig::validate`].
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::unchecked(config))
    }

    fn unchecked(config: IndexConfig) -> Self {
        Self {
            config,
            terms: Vec::new(),
            term_ids: HashMap::new(),
            counts: Vec::new(),
            total_terms: 0.0,
            index: HashMap::new(),
            index_tail: HashMap::new(),
            affects: Vec::new(),
            known_affects: Vec::new(),
            measurers: MeasurerPool::default(),
        }
    }

    /// Replaces the distance measurer pool, e.g. to bound lookup parallelism.
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.measurers = MeasurerPool::new(size);
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in id order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn total_terms(&self) -> f64 {
        self.total_terms
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.term_ids.contains_key(&term.to_lowercase())
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.term_ids.get(&term.to_lowercase()).copied()
    }

    /// Accumulated frequency of a known term.
    pub fn term_count(&self, term: &str) -> Option<f64> {
        self.term_id(term).map(|id| self.counts[id])
    }

    /// Adds each term once with count 1; known terms just accumulate.
    pub fn train<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref(), 1.0);
        }
    }

    /// Tokenizes raw text and adds every term seen at least `min_term_count` times.
    /// Terms are added in lexicographic order so ids do not depend on hashing.
    pub fn train_text(&mut self, text: &str) -> usize {
        let counts = count_terms(text, self.config.min_term_len);
        let mut frequent: Vec<(String, f64)> = counts
            .into_iter()
            .filter(|(_, count)| *count >= self.config.min_term_count)
            .collect();
        frequent.sort_by(|a, b| a.0.cmp(&b.0));

        let added = frequent.len();
        for (term, count) in frequent {
            self.add_term(&term, count);
        }
        debug!(added, vocabulary = self.terms.len(), "trained on text");
        added
    }

    /// Adds `term` (lowercased) with `count`. Returns `false` when the term is
    /// too short to index. A known term only accumulates its count.
    pub fn add_term(&mut self, term: &str, count: f64) -> bool {
        let term = term.to_lowercase();
        let term_len = term.chars().count();
        if term_len < self.config.min_term_len {
            trace!(term = %term, "term below minimum length, skipped");
            return false;
        }

        self.total_terms += count;
        if let Some(&id) = self.term_ids.get(&term) {
            self.counts[id] += count;
            return true;
        }

        let id = self.terms.len();
        self.terms.push(term.clone());
        self.counts.push(count);
        self.term_ids.insert(term.clone(), id);

        let edits = EditSetGenerator::plain(&self.config).edits(&term);
        for edit in edits.keys() {
            let (head, tail) = self.split_edit(edit);
            if let Some(tail) = tail {
                self.index_tail
                    .entry(tail)
                    .or_default()
                    .insert(head.clone());
            }

            let buckets = self.index.entry(head).or_default();
            if buckets.len() < term_len {
                buckets.resize_with(term_len, Vec::new);
            }
            let bucket = &mut buckets[term_len - 1];
            // ids arrive in increasing order, so a duplicate can only be the last one
            if bucket.last() != Some(&id) {
                bucket.push(id);
            }
        }

        if self.known_affects.len() < term_len {
            self.known_affects.resize(term_len, false);
        }
        if !self.known_affects[term_len - 1] {
            self.merge_affects(&term, term_len);
            self.known_affects[term_len - 1] = true;
        }
        true
    }

    fn merge_affects(&mut self, term: &str, term_len: usize) {
        let tracked = EditSetGenerator::tracking(&self.config).tracking_edits(term);
        for (edit, tracked_edit) in &tracked {
            let edit_len = edit.chars().count();
            if edit_len == 0 {
                continue;
            }
            for delta in &tracked_edit.length_deltas {
                let input_len = term_len as i64 + i64::from(*delta);
                if input_len < 1 {
                    continue;
                }
                let input_len = input_len as usize;
                if self.affects.len() < input_len {
                    self.affects.resize_with(input_len, Vec::new);
                }
                let by_edit_len = &mut self.affects[input_len - 1];
                if by_edit_len.len() < edit_len {
                    by_edit_len.resize_with(edit_len, Vec::new);
                }
                let term_lens = &mut by_edit_len[edit_len - 1];
                if let Err(position) = term_lens.binary_search(&term_len) {
                    term_lens.insert(position, term_len);
                }
            }
        }
        debug!(term_len, edits = tracked.len(), "merged affects for new term length");
    }

    /// Candidate corrections for `query` within `depth`, each verified by an
    /// exact distance computation. An exact match is always included at
    /// distance 0 (without a prescription).
    pub fn raw_suggestions(&self, query: &str, want_prescription: bool) -> SuggestionSet {
        let query = query.to_lowercase();
        let mut result = SuggestionSet::new();

        if let Some(&id) = self.term_ids.get(&query) {
            result.insert(
                query.clone(),
                Suggestion::new(query.clone(), 0, None, self.counts[id]),
            );
        }

        let query_len = query.chars().count();
        let Some(input_affects) = query_len
            .checked_sub(1)
            .and_then(|i| self.affects.get(i))
            .filter(|by_edit_len| !by_edit_len.is_empty())
        else {
            return result;
        };

        let mut edits: Vec<String> = EditSetGenerator::plain(&self.config)
            .edits(&query)
            .into_keys()
            .collect();
        edits.sort_unstable();

        let mut evaluated: HashSet<TermId> = HashSet::new();
        for edit in &edits {
            let Some(buckets) = self.lookup_key(edit) else {
                continue;
            };

            let edit_len = edit.chars().count();
            let Some(term_lens) = edit_len.checked_sub(1).and_then(|i| input_affects.get(i)) else {
                continue;
            };

            for &term_len in term_lens {
                let Some(ids) = buckets.get(term_len - 1) else {
                    continue;
                };
                for &id in ids {
                    // The distance depends only on (term, query), so the first
                    // evaluation of a term is final.
                    if !evaluated.insert(id) {
                        continue;
                    }
                    let term = &self.terms[id];
                    let (distance, prescription) =
                        self.measurers
                            .acquire()
                            .distance(term, &query, want_prescription);
                    if distance > self.config.depth {
                        continue;
                    }
                    result.entry(term.clone()).or_insert_with(|| {
                        Suggestion::new(term.clone(), distance, prescription, self.counts[id])
                    });
                }
            }
        }

        trace!(
            query = %query,
            probes = edits.len(),
            evaluated = evaluated.len(),
            kept = result.len(),
            "raw suggestions"
        );
        result
    }

    /// Length buckets for a reduced form. A long form only matches when its
    /// tail was registered together with its head.
    fn lookup_key(&self, edit: &str) -> Option<&Vec<Vec<TermId>>> {
        let (head, tail) = self.split_edit(edit);
        let buckets = self.index.get(&head)?;
        if let Some(tail) = &tail {
            let known = self
                .index_tail
                .get(tail)
                .is_some_and(|heads| heads.contains(&head));
            if !known {
                return None;
            }
        }
        Some(buckets)
    }

    fn split_edit(&self, edit: &str) -> (String, Option<String>) {
        let split = self.config.index_split_len;
        match edit.char_indices().nth(split) {
            Some((byte_pos, _)) => (
                edit[..byte_pos].to_string(),
                Some(edit[byte_pos..].to_string()),
            ),
            None => (edit.to_string(), None),
        }
    }
}
