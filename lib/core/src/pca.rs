//! Memory-bounded PCA by power iteration.
//!
//! The covariance operator is applied implicitly in two passes (project every
//! centered row onto the current direction, then accumulate the weighted rows
//! back), so memory stays O(N + D) and a D x D matrix is never built.
//!
//! The result is approximate. With random initialization it differs run to
//! run, and when the top eigenvalues are nearly degenerate the recovered axes
//! may rotate within their shared subspace. Sign and order of the axes are
//! unspecified; seed the projector when exact coordinates are needed.

use crate::{Error, Result, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_ITERATIONS: usize = 8;

const EPSILON: f64 = 1e-12;

/// Clamp a requested output dimensionality to the supported set {2, 3}
pub fn clamp_dimensions(requested: usize) -> usize {
    match requested {
        2 | 3 => requested,
        _ => 2,
    }
}

#[derive(Debug, Clone)]
pub struct Projector {
    dimensions: usize,
    iterations: usize,
    seed: Option<u64>,
}

impl Projector {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: clamp_dimensions(dimensions),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }

    /// Fix the random source so projections are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Project `vectors` to `dimensions` coordinates each, index-aligned with
    /// the input.
    pub fn project(&self, vectors: &[Vector]) -> Result<Vec<Vec<f32>>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.project_with_rng(vectors, &mut rng)
    }

    pub fn project_with_rng<R: Rng>(
        &self,
        vectors: &[Vector],
        rng: &mut R,
    ) -> Result<Vec<Vec<f32>>> {
        let Some(first) = vectors.first() else {
            return Ok(Vec::new());
        };
        let dim = first.dim();
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.dim(),
            });
        }

        let mean = mean_vector(vectors, dim);
        let mut components: Vec<Vec<f64>> = Vec::with_capacity(self.dimensions);

        for _ in 0..self.dimensions {
            let mut direction: Vec<f64> = (0..dim).map(|_| rng.random::<f64>() - 0.5).collect();
            orthogonalize(&mut direction, &components);
            normalize(&mut direction);

            for _ in 0..self.iterations {
                let mut next = covariance_apply(vectors, &mean, &direction);
                orthogonalize(&mut next, &components);
                // Centered data with no variance left along any free axis
                if !normalize(&mut next) {
                    break;
                }
                direction = next;
            }
            components.push(direction);
        }

        Ok(vectors
            .iter()
            .map(|v| {
                components
                    .iter()
                    .map(|c| {
                        v.as_slice()
                            .iter()
                            .zip(mean.iter())
                            .zip(c.iter())
                            .map(|((x, m), w)| (*x as f64 - m) * w)
                            .sum::<f64>() as f32
                    })
                    .collect()
            })
            .collect())
    }
}

fn mean_vector(vectors: &[Vector], dim: usize) -> Vec<f64> {
    let mut mean = vec![0.0f64; dim];
    for v in vectors {
        for (m, x) in mean.iter_mut().zip(v.as_slice()) {
            *m += *x as f64;
        }
    }
    let n = vectors.len() as f64;
    for m in &mut mean {
        *m /= n;
    }
    mean
}

/// `sum_i (x_i . v) x_i` over the centered rows `x_i`
fn covariance_apply(vectors: &[Vector], mean: &[f64], direction: &[f64]) -> Vec<f64> {
    let projections: Vec<f64> = vectors
        .iter()
        .map(|v| {
            v.as_slice()
                .iter()
                .zip(mean.iter())
                .zip(direction.iter())
                .map(|((x, m), d)| (*x as f64 - m) * d)
                .sum()
        })
        .collect();

    let mut result = vec![0.0f64; mean.len()];
    for (v, p) in vectors.iter().zip(projections) {
        for ((r, x), m) in result.iter_mut().zip(v.as_slice()).zip(mean.iter()) {
            *r += p * (*x as f64 - m);
        }
    }
    result
}

/// Gram-Schmidt against already accepted unit components
fn orthogonalize(v: &mut [f64], components: &[Vec<f64>]) {
    for c in components {
        let dot: f64 = v.iter().zip(c.iter()).map(|(a, b)| a * b).sum();
        for (x, y) in v.iter_mut().zip(c.iter()) {
            *x -= dot * y;
        }
    }
}

/// Scale to unit length. Returns false, leaving `v` untouched, for a zero vector.
fn normalize(v: &mut [f64]) -> bool {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm <= EPSILON {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize, dim: usize) -> Vec<Vector> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..n)
            .map(|_| Vector::new((0..dim).map(|_| rng.random_range(-1.0f32..1.0)).collect()))
            .collect()
    }

    #[test]
    fn test_shape_matches_input() {
        let vectors = sample(12, 64);
        for dims in [2, 3] {
            let coords = Projector::new(dims).project(&vectors).unwrap();
            assert_eq!(coords.len(), vectors.len());
            assert!(coords.iter().all(|row| row.len() == dims));
        }
    }

    #[test]
    fn test_dimensions_clamp() {
        assert_eq!(Projector::new(7).dimensions(), 2);
        assert_eq!(Projector::new(0).dimensions(), 2);
        assert_eq!(Projector::new(3).dimensions(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(Projector::new(2).project(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_identical_vectors_project_together() {
        let v = Vector::new(vec![0.3, -0.2, 0.9, 1.5]);
        let vectors = vec![v.clone(), v.clone(), v];
        let coords = Projector::new(3).project(&vectors).unwrap();
        for row in &coords {
            for (a, b) in row.iter().zip(coords[0].iter()) {
                assert!((a - b).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_seeded_projection_is_reproducible() {
        let vectors = sample(20, 32);
        let a = Projector::new(2).with_seed(42).project(&vectors).unwrap();
        let b = Projector::new(2).with_seed(42).project(&vectors).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recovers_dominant_axes() {
        // Uncorrelated grid: wide along x, narrow along y, flat along z
        let mut vectors = Vec::new();
        for x in [-3.0f32, -1.0, 1.0, 3.0] {
            for y in [-0.5f32, 0.5] {
                vectors.push(Vector::new(vec![x, y, 0.0]));
            }
        }
        let coords = Projector::new(2).with_seed(1).project(&vectors).unwrap();

        // Axes come back up to sign
        for (row, v) in coords.iter().zip(vectors.iter()) {
            assert!((row[0].abs() - v.as_slice()[0].abs()).abs() < 1e-3);
            assert!((row[1].abs() - v.as_slice()[1].abs()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let vectors = vec![Vector::new(vec![1.0, 2.0]), Vector::new(vec![1.0])];
        assert_eq!(
            Projector::new(2).project(&vectors),
            Err(Error::InvalidDimension { expected: 2, actual: 1 })
        );
    }
}
