// File: src/scoring/vector.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

/// Tolerance for zero and equality checks on feature vectors.
pub const EPS: f64 = 1e-6;

/// Number of feature slots produced by the vectorizer.
pub const FEATURE_LEN: usize = 16;

/// Fixed-length vector of edit-type counts, also used for learned weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    xs: [f64; FEATURE_LEN],
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl FeatureVector {
    pub fn zero() -> Self {
        Self {
            xs: [0.0; FEATURE_LEN],
        }
    }

    pub fn from_array(xs: [f64; FEATURE_LEN]) -> Self {
        Self { xs }
    }

    /// Every slot drawn uniformly from `[0, 1)`.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut xs = [0.0; FEATURE_LEN];
        for x in &mut xs {
            *x = rng.gen::<f64>();
        }
        Self { xs }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.xs
    }

    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.xs.iter().zip(&other.xs).map(|(a, b)| a * b).sum()
    }

    pub fn sum(&self) -> f64 {
        self.xs.iter().sum()
    }

    pub fn scale(&self, factor: f64) -> FeatureVector {
        let mut xs = self.xs;
        for x in &mut xs {
            *x *= factor;
        }
        Self { xs }
    }

    pub fn is_zero(&self) -> bool {
        self.xs.iter().all(|x| x.abs() <= EPS)
    }

    pub fn approx_eq(&self, other: &FeatureVector) -> bool {
        self.xs
            .iter()
            .zip(&other.xs)
            .all(|(a, b)| (a - b).abs() <= EPS)
    }

    /// Neighbours at `±step` along each axis that stay inside `[min, max]`.
    pub fn variations(&self, min: f64, max: f64, step: f64) -> Vec<FeatureVector> {
        let mut result = Vec::with_capacity(2 * FEATURE_LEN);
        for i in 0..FEATURE_LEN {
            let mut up = *self;
            up.xs[i] += step;
            if up.xs[i] <= max {
                result.push(up);
            }
            let mut down = *self;
            down.xs[i] -= step;
            if down.xs[i] >= min {
                result.push(down);
            }
        }
        result
    }

    /// Point `fraction` of the way from `self` to `target`.
    pub fn move_toward(&self, target: &FeatureVector, fraction: f64) -> FeatureVector {
        let mut xs = self.xs;
        for (x, t) in xs.iter_mut().zip(&target.xs) {
            *x += fraction * (t - *x);
        }
        Self { xs }
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, slot: usize) -> &f64 {
        &self.xs[slot]
    }
}

impl IndexMut<usize> for FeatureVector {
    fn index_mut(&mut self, slot: usize) -> &mut f64 {
        &mut self.xs[slot]
    }
}

impl Add for FeatureVector {
    type Output = FeatureVector;

    fn add(mut self, rhs: FeatureVector) -> FeatureVector {
        for (a, b) in self.xs.iter_mut().zip(&rhs.xs) {
            *a += b;
        }
        self
    }
}

impl Sub for FeatureVector {
    type Output = FeatureVector;

    fn sub(mut self, rhs: FeatureVector) -> FeatureVector {
        for (a, b) in self.xs.iter_mut().zip(&rhs.xs) {
            *a -= b;
        }
        self
    }
}

/// Renders the nonzero terms as `0.5*x3 - 1.0*x7`.
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, x) in self.xs.iter().enumerate() {
            if x.abs() <= EPS {
                continue;
            }
            let sign = if *x < 0.0 { "-" } else { "+" };
            if first {
                if *x < 0.0 {
                    write!(f, "- ")?;
                }
            } else {
                write!(f, " {sign} ")?;
            }
            write!(f, "{:.1}*x{}", x.abs(), i)?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
