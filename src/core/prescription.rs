// File: src/core/prescription.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One atomic operation of the typo model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditAction {
    Insert,
    Delete,
    Replace,
    Match,
    Transposition,
    /// The input repeats the previous character once more.
    Duplicate,
    /// The input drops one character of a doubled pair.
    MissDouble,
    /// Rotation of three pairwise-distinct characters.
    Triplet,
}

impl EditAction {
    /// Single-letter mnemonic used when rendering a prescription.
    pub fn letter(self) -> char {
        match self {
            EditAction::Insert => 'I',
            EditAction::Delete => 'D',
            EditAction::Replace => 'R',
            EditAction::Match => 'M',
            EditAction::Transposition => 'T',
            EditAction::MissDouble => 'U',
            EditAction::Duplicate => 'P',
            EditAction::Triplet => 'J',
        }
    }

    /// Number of consecutive steps the operation occupies in a prescription.
    pub fn slots(self) -> usize {
        match self {
            EditAction::Transposition => 2,
            EditAction::Triplet => 3,
            _ => 1,
        }
    }
}

/// A single step: `from` is the term-side char, `to` the input-side char.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStep {
    pub action: EditAction,
    pub from: Option<char>,
    pub to: Option<char>,
}

impl EditStep {
    pub fn new(action: EditAction, from: Option<char>, to: Option<char>) -> Self {
        Self { action, from, to }
    }
}

/// Ordered edit steps turning a term into the input, recovered by backtrace.
/// Transposition and triplet steps repeat their action over 2 and 3 slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorialPrescription {
    steps: Vec<EditStep>,
}

impl EditorialPrescription {
    pub fn from_steps(steps: Vec<EditStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[EditStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = EditAction> + '_ {
        self.steps.iter().map(|step| step.action)
    }

    /// True when every step is a match, i.e. the two strings are equal.
    pub fn is_identity(&self) -> bool {
        self.actions().all(|action| action == EditAction::Match)
    }

    /// Steps that change something, in order.
    pub fn edits(&self) -> impl Iterator<Item = &EditStep> + '_ {
        self.steps
            .iter()
            .filter(|step| step.action != EditAction::Match)
    }
}

fn slot(c: Option<char>) -> char {
    c.unwrap_or('-')
}

impl fmt::Display for EditorialPrescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actions: Vec<String> = self.actions().map(|a| a.letter().to_string()).collect();
        let froms: Vec<String> = self.steps.iter().map(|s| slot(s.from).to_string()).collect();
        let tos: Vec<String> = self.steps.iter().map(|s| slot(s.to).to_string()).collect();
        writeln!(f, "{}", actions.join(" "))?;
        writeln!(f, "{}", froms.join(" "))?;
        write!(f, "{}", tos.join(" "))
    }
}
