//! Dense embedding vectors and the pure arithmetic the explorers build on.
//!
//! The free functions work on slices and return `None` when the operation is
//! meaningless (length mismatch). Callers turn `None` into an explicit
//! [`Error::InvalidDimension`](crate::Error::InvalidDimension); a silent wrong
//! answer is never produced.

use serde::{Deserialize, Serialize};

/// Cosine similarity of two equal-length slices.
///
/// Returns `None` on length mismatch and `Some(0.0)` when either norm is
/// exactly zero. The two cases are kept distinct: a mismatch is meaningless,
/// a zero vector is a valid degenerate input.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let dot = dot_product(a, b);
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return Some(0.0);
    }

    Some(dot / (norm_a * norm_b))
}

/// Euclidean (L2) distance, `None` on length mismatch.
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }

    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Some(sum.sqrt())
}

/// Elementwise average of two vectors.
#[inline]
pub fn midpoint(a: &[f32], b: &[f32]) -> Option<Vec<f32>> {
    if a.len() != b.len() {
        return None;
    }

    Some(a.iter().zip(b.iter()).map(|(x, y)| (x + y) / 2.0).collect())
}

/// `b - a + c`: the vector completing "a is to b as c is to ?".
#[inline]
pub fn analogy_vector(a: &[f32], b: &[f32], c: &[f32]) -> Option<Vec<f32>> {
    if a.len() != b.len() || b.len() != c.len() {
        return None;
    }

    Some(
        a.iter()
            .zip(b.iter())
            .zip(c.iter())
            .map(|((x, y), z)| y - x + z)
            .collect(),
    )
}

/// `a + t * (b - a)`
#[inline]
pub fn lerp(a: &[f32], b: &[f32], t: f32) -> Option<Vec<f32>> {
    if a.len() != b.len() {
        return None;
    }

    Some(a.iter().zip(b.iter()).map(|(x, y)| x + t * (y - x)).collect())
}

/// Dot product with two accumulators for better pipelining.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let mut sum0 = 0.0f32;
    let mut sum1 = 0.0f32;
    let mut i = 0;
    while i + 1 < n {
        sum0 += a[i] * b[i];
        sum1 += a[i + 1] * b[i + 1];
        i += 2;
    }
    if i < n {
        sum0 += a[i] * b[i];
    }
    sum0 + sum1
}

#[inline]
pub fn norm(a: &[f32]) -> f32 {
    dot_product(a, a).sqrt()
}

/// An embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> Option<f32> {
        cosine_similarity(&self.data, &other.data)
    }

    #[inline]
    pub fn euclidean_distance(&self, other: &Vector) -> Option<f32> {
        euclidean_distance(&self.data, &other.data)
    }

    #[inline]
    pub fn midpoint(&self, other: &Vector) -> Option<Vector> {
        midpoint(&self.data, &other.data).map(Vector::new)
    }

    #[inline]
    pub fn lerp(&self, other: &Vector, t: f32) -> Option<Vector> {
        lerp(&self.data, &other.data, t).map(Vector::new)
    }

    /// `b - a + c` with `self` as `a`.
    #[inline]
    pub fn analogy(&self, b: &Vector, c: &Vector) -> Option<Vector> {
        analogy_vector(&self.data, &b.data, &c.data).map(Vector::new)
    }

    /// Human-readable preview: the first five components and the dimension.
    pub fn truncated_view(&self) -> String {
        const SHOWN: usize = 5;
        let head: Vec<String> = self
            .data
            .iter()
            .take(SHOWN)
            .map(|x| format!("{:.4}", x))
            .collect();
        if self.data.len() > SHOWN {
            format!("[{}, ... ({} dims)]", head.join(", "), self.data.len())
        } else {
            format!("[{}]", head.join(", "))
        }
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
