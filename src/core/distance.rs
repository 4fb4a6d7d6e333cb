// File: src/core/distance.rs
use crate::core::prescription::{EditAction, EditStep, EditorialPrescription};

/// Weighted edit distance over chars with a typo-oriented operation set:
/// insert, delete, replace, duplicate, miss-double, adjacent transposition
/// and rotation of three distinct chars, all at unit cost.
///
/// The cost and action matrices are flat row-major buffers that only grow,
/// so one measurer can be reused for any number of sequential calls. It is
/// not shareable between concurrent calls; see [`crate::core::pool`].
///
/// Rows walk the input, columns walk the term. Complexity: O(n·m).
#[derive(Debug, Default)]
pub struct DistanceMeasurer {
    term: Vec<char>,
    input: Vec<char>,
    costs: Vec<usize>,
    actions: Vec<EditAction>,
}

impl DistanceMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance only.
    pub fn measure(&mut self, term: &str, input: &str) -> usize {
        self.distance(term, input, false).0
    }

    /// Distance from `term` to `input`, plus the backtraced prescription when asked.
    pub fn distance(
        &mut self,
        term: &str,
        input: &str,
        want_prescription: bool,
    ) -> (usize, Option<EditorialPrescription>) {
        self.term.clear();
        self.term.extend(term.chars());
        self.input.clear();
        self.input.extend(input.chars());

        let cols = self.term.len() + 1;
        let rows = self.input.len() + 1;
        self.ensure_size(rows * cols);

        let a = &self.term;
        let b = &self.input;
        let p = &mut self.costs;
        let e = &mut self.actions;
        let at = |i: usize, j: usize| i * cols + j;

        for i in 0..rows {
            p[at(i, 0)] = i;
            e[at(i, 0)] = EditAction::Insert;
        }
        for j in 0..cols {
            p[at(0, j)] = j;
            e[at(0, j)] = EditAction::Delete;
        }

        let unreachable = rows + cols;
        for i in 1..rows {
            for j in 1..cols {
                let delete = p[at(i, j - 1)] + 1;
                let insert = p[at(i - 1, j)] + 1;
                let replace = p[at(i - 1, j - 1)] + 1;

                let matched = if b[i - 1] == a[j - 1] {
                    p[at(i - 1, j - 1)]
                } else {
                    unreachable
                };

                let transposition = if i >= 2
                    && j >= 2
                    && b[i - 1] == a[j - 2]
                    && b[i - 2] == a[j - 1]
                {
                    p[at(i - 2, j - 2)] + 1
                } else {
                    unreachable
                };

                let duplicate = if i >= 2 && a[j - 1] == b[i - 1] && a[j - 1] == b[i - 2] {
                    p[at(i - 1, j)] + 1
                } else {
                    unreachable
                };

                let miss_double = if j >= 2 && a[j - 1] == b[i - 1] && a[j - 2] == b[i - 1] {
                    p[at(i, j - 1)] + 1
                } else {
                    unreachable
                };

                let triplet = if i >= 3
                    && j >= 3
                    && a[j - 3] != a[j - 2]
                    && a[j - 3] != a[j - 1]
                    && a[j - 2] != a[j - 1]
                    && ((a[j - 3] == b[i - 1] && a[j - 2] == b[i - 3] && a[j - 1] == b[i - 2])
                        || (a[j - 3] == b[i - 2] && a[j - 2] == b[i - 1] && a[j - 1] == b[i - 3]))
                {
                    p[at(i - 3, j - 3)] + 1
                } else {
                    unreachable
                };

                // Tie order matters for stable backtraces: insert and replace
                // must be strictly cheaper, every other candidate wins ties.
                let mut min = delete;
                let mut action = EditAction::Delete;
                if insert < min {
                    min = insert;
                    action = EditAction::Insert;
                }
                if matched <= min {
                    min = matched;
                    action = EditAction::Match;
                }
                if replace < min {
                    min = replace;
                    action = EditAction::Replace;
                }
                if duplicate <= min {
                    min = duplicate;
                    action = EditAction::Duplicate;
                }
                if miss_double <= min {
                    min = miss_double;
                    action = EditAction::MissDouble;
                }
                if transposition <= min {
                    min = transposition;
                    action = EditAction::Transposition;
                }
                if triplet <= min {
                    min = triplet;
                    action = EditAction::Triplet;
                }
                p[at(i, j)] = min;
                e[at(i, j)] = action;
            }
        }

        let distance = p[at(rows - 1, cols - 1)];
        let prescription = want_prescription.then(|| self.backtrace(rows, cols));
        (distance, prescription)
    }

    fn backtrace(&self, rows: usize, cols: usize) -> EditorialPrescription {
        let a = &self.term;
        let b = &self.input;
        let mut i = rows - 1;
        let mut j = cols - 1;
        let mut steps = Vec::with_capacity(i + j);

        while i > 0 || j > 0 {
            let action = self.actions[i * cols + j];
            match action {
                EditAction::Delete | EditAction::MissDouble => {
                    steps.push(EditStep::new(action, Some(a[j - 1]), None));
                    j -= 1;
                }
                EditAction::Insert | EditAction::Duplicate => {
                    steps.push(EditStep::new(action, None, Some(b[i - 1])));
                    i -= 1;
                }
                EditAction::Match | EditAction::Replace => {
                    steps.push(EditStep::new(action, Some(a[j - 1]), Some(b[i - 1])));
                    i -= 1;
                    j -= 1;
                }
                EditAction::Transposition | EditAction::Triplet => {
                    for k in 1..=action.slots() {
                        steps.push(EditStep::new(action, Some(a[j - k]), Some(b[i - k])));
                    }
                    i -= action.slots();
                    j -= action.slots();
                }
            }
        }

        steps.reverse();
        EditorialPrescription::from_steps(steps)
    }

    fn ensure_size(&mut self, cells: usize) {
        if cells > self.costs.len() {
            self.costs.resize(cells, 0);
            self.actions.resize(cells, EditAction::Delete);
        }
    }
}
