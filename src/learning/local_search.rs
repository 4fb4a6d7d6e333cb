// File: src/learning/local_search.rs
use crate::config::LearnerConfig;
use crate::core::types::LearningExample;
use crate::learning::vector_system::{satisfied_count, VectorSystem};
use crate::learning::Learner;
use crate::scoring::vector::FeatureVector;
use crate::scoring::vectorizer::PrescriptionVectorizer;
use crate::scoring::LinearScorer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Learns linear weights by hill climbing on the number of fully satisfied
/// vector systems, restarted from random points in the unit cube.
#[derive(Debug, Clone, Default)]
pub struct LocalSearchLearner {
    config: LearnerConfig,
    vectorizer: PrescriptionVectorizer,
}

impl LocalSearchLearner {
    pub fn new(config: LearnerConfig) -> Self {
        Self {
            config,
            vectorizer: PrescriptionVectorizer::new(),
        }
    }

    pub fn vector_systems(&self, examples: &[LearningExample]) -> Vec<VectorSystem> {
        examples
            .iter()
            .filter_map(|example| VectorSystem::from_example(example, &self.vectorizer))
            .collect()
    }

    /// Best weights found, or `None` when there is nothing to satisfy.
    pub fn search(&self, systems: &[VectorSystem]) -> Option<FeatureVector> {
        if systems.is_empty() {
            return None;
        }
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut best: Option<(FeatureVector, usize)> = None;
        let mut stale = 0;
        for restart in 0..self.config.restarts {
            let (weights, score) = self.climb(FeatureVector::random(&mut rng), systems);
            debug!(restart, score, "restart finished");

            match best {
                Some((_, best_score)) if score <= best_score => {
                    stale += 1;
                    if stale >= self.config.max_stale_restarts {
                        debug!(restart, "no improvement, stopping");
                        break;
                    }
                }
                _ => {
                    best = Some((weights, score));
                    stale = 0;
                }
            }
            if score == systems.len() {
                break;
            }
        }

        best.map(|(weights, score)| {
            info!(satisfied = score, systems = systems.len(), "local search done");
            weights
        })
    }

    fn climb(&self, start: FeatureVector, systems: &[VectorSystem]) -> (FeatureVector, usize) {
        let LearnerConfig {
            min_weight,
            max_weight,
            step,
            ..
        } = self.config;

        let mut current = start;
        let mut score = satisfied_count(systems, &current);
        for _ in 0..self.config.max_iterations {
            let improving: Vec<(FeatureVector, usize)> = current
                .variations(min_weight, max_weight, step)
                .into_iter()
                .map(|v| {
                    let s = satisfied_count(systems, &v);
                    (v, s)
                })
                .filter(|(_, s)| *s > score)
                .collect();
            let Some(&(top, top_score)) = improving.iter().max_by_key(|(_, s)| *s) else {
                break;
            };

            let mut blended = current;
            for (v, s) in &improving {
                blended = blended.move_toward(v, *s as f64 / top_score as f64);
            }
            let blended_score = satisfied_count(systems, &blended);
            // Fall back to the best single step when blending loses ground.
            if blended_score >= top_score {
                current = blended;
                score = blended_score;
            } else {
                current = top;
                score = top_score;
            }
            if score == systems.len() {
                break;
            }
        }
        (current, score)
    }
}

impl Learner for LocalSearchLearner {
    type Scorer = LinearScorer;

    fn learn(&self, examples: &[LearningExample]) -> LinearScorer {
        let systems = self.vector_systems(examples);
        info!(
            examples = examples.len(),
            systems = systems.len(),
            "learning linear weights"
        );
        LinearScorer::new(self.search(&systems))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::vectorizer::{D_MIDDLE, R_FIRST, TRANSPOSITION};

    fn seeded() -> LocalSearchLearner {
        LocalSearchLearner::new(LearnerConfig {
            seed: Some(11),
            max_stale_restarts: 100,
            ..LearnerConfig::default()
        })
    }

    fn constraint(positive: usize, negative: usize) -> VectorSystem {
        let mut d = FeatureVector::zero();
        d[positive] = 1.0;
        d[negative] = -1.0;
        let mut system = VectorSystem::new();
        system.add(d);
        system
    }

    #[test]
    fn test_no_systems_leaves_weights_unset() {
        assert!(seeded().search(&[]).is_none());
        assert!(seeded().learn(&[]).weights().is_none());
    }

    #[test]
    fn test_single_constraint_is_satisfied() {
        let systems = vec![constraint(R_FIRST, TRANSPOSITION)];
        let weights = seeded().search(&systems).unwrap();
        assert!(systems[0].is_satisfied(&weights));
        assert!(weights.as_slice().iter().all(|w| (0.0..=1.0).contains(w)));
    }

    #[test]
    fn test_consistent_systems_all_satisfied() {
        let systems = vec![
            constraint(R_FIRST, TRANSPOSITION),
            constraint(D_MIDDLE, TRANSPOSITION),
            constraint(R_FIRST, D_MIDDLE),
        ];
        let weights = seeded().search(&systems).unwrap();
        assert_eq!(satisfied_count(&systems, &weights), 3);
    }

    #[test]
    fn test_contradictory_systems_satisfy_one() {
        let systems = vec![
            constraint(R_FIRST, TRANSPOSITION),
            constraint(TRANSPOSITION, R_FIRST),
        ];
        let weights = seeded().search(&systems).unwrap();
        assert_eq!(satisfied_count(&systems, &weights), 1);
    }

    #[test]
    fn test_seed_makes_runs_reproducible() {
        let systems = vec![constraint(R_FIRST, TRANSPOSITION), constraint(D_MIDDLE, R_FIRST)];
        assert_eq!(seeded().search(&systems), seeded().search(&systems));
    }
}
