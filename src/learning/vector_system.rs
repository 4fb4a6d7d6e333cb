// File: src/learning/vector_system.rs
use crate::core::types::LearningExample;
use crate::scoring::vector::FeatureVector;
use crate::scoring::vectorizer::PrescriptionVectorizer;
use serde::{Deserialize, Serialize};

/// Constraints one labeled example puts on linear weights.
///
/// Each constraint is `wrong − correct` in feature space and is satisfied when
/// its dot product with the weights is strictly negative, i.e. the correct
/// term outscores that wrong candidate. Zero and duplicate constraints are
/// dropped on insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSystem {
    constraints: Vec<FeatureVector>,
}

impl VectorSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the example has no correct candidate with a prescription
    /// or no wrong candidate that tells it apart.
    pub fn from_example(
        example: &LearningExample,
        vectorizer: &PrescriptionVectorizer,
    ) -> Option<Self> {
        let base = example
            .correct_suggestion()
            .and_then(|s| s.prescription.as_ref())
            .map(|p| vectorizer.vectorize(p))?;

        let mut system = Self::new();
        for suggestion in &example.suggestions {
            if suggestion.term == example.term || suggestion.term == example.misspell {
                continue;
            }
            if let Some(prescription) = &suggestion.prescription {
                system.add(vectorizer.vectorize(prescription) - base);
            }
        }
        (!system.is_empty()).then_some(system)
    }

    /// Returns `false` when the constraint was zero or already present.
    pub fn add(&mut self, constraint: FeatureVector) -> bool {
        if constraint.is_zero() || self.constraints.iter().any(|c| c.approx_eq(&constraint)) {
            return false;
        }
        self.constraints.push(constraint);
        true
    }

    pub fn constraints(&self) -> &[FeatureVector] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn is_satisfied(&self, weights: &FeatureVector) -> bool {
        self.constraints.iter().all(|c| c.dot(weights) < 0.0)
    }
}

/// Number of systems fully satisfied by `weights`.
pub fn satisfied_count(systems: &[VectorSystem], weights: &FeatureVector) -> usize {
    systems.iter().filter(|s| s.is_satisfied(weights)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::DistanceMeasurer;
    use crate::core::types::Suggestion;
    use crate::scoring::vectorizer::{MISS_DOUBLE, R_DISTANCE_OTHER, TRANSPOSITION};

    fn suggestion(term: &str, input: &str) -> Suggestion {
        let (distance, prescription) = DistanceMeasurer::new().distance(term, input, true);
        Suggestion::new(term, distance, prescription, 1.0)
    }

    #[test]
    fn test_prunes_zero_and_duplicates() {
        let mut system = VectorSystem::new();
        let mut v = FeatureVector::zero();
        v[3] = 1.0;
        assert!(!system.add(FeatureVector::zero()));
        assert!(system.add(v));
        assert!(!system.add(v));
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_from_example() {
        let example = LearningExample {
            term: "receive".to_string(),
            misspell: "recieve".to_string(),
            suggestions: vec![
                suggestion("receive", "recieve"),
                suggestion("recieve", "recieve"),
                suggestion("relieve", "recieve"),
            ],
        };
        let system = VectorSystem::from_example(&example, &PrescriptionVectorizer::new()).unwrap();
        assert_eq!(system.len(), 1);
        // relieve -> recieve is one replace, receive -> recieve one transposition
        let constraint = system.constraints()[0];
        assert_eq!(constraint[TRANSPOSITION], -1.0);
        assert_eq!(constraint.sum(), 0.0);

        let mut favours_transposition = FeatureVector::zero();
        favours_transposition[TRANSPOSITION] = 1.0;
        assert!(system.is_satisfied(&favours_transposition));
        assert!(!system.is_satisfied(&FeatureVector::zero()));
        let mut favours_replace = FeatureVector::zero();
        favours_replace[R_DISTANCE_OTHER] = 1.0;
        assert!(!system.is_satisfied(&favours_replace));
    }

    #[test]
    fn test_no_correct_candidate() {
        let example = LearningExample {
            term: "letter".to_string(),
            misspell: "leter".to_string(),
            suggestions: vec![suggestion("later", "leter")],
        };
        assert!(VectorSystem::from_example(&example, &PrescriptionVectorizer::new()).is_none());
    }

    #[test]
    fn test_satisfied_count() {
        let mut a = VectorSystem::new();
        let mut da = FeatureVector::zero();
        da[MISS_DOUBLE] = -1.0;
        a.add(da);
        let mut b = VectorSystem::new();
        let mut db = FeatureVector::zero();
        db[MISS_DOUBLE] = 1.0;
        b.add(db);

        let mut w = FeatureVector::zero();
        w[MISS_DOUBLE] = 0.5;
        assert_eq!(satisfied_count(&[a, b], &w), 1);
    }
}
