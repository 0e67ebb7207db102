//! Distance metrics between relative-frequency vectors.

use serde::{Deserialize, Serialize};

/// Pairwise distance used to build the dissimilarity matrix.
///
/// All metrics return finite, non-negative values for finite input. For the
/// angle-based metrics a zero-norm (or zero-variance) vector has no direction;
/// its distance is 0 to an identical vector and 1 to anything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// L2 distance.
    #[default]
    Euclidean,
    /// L1 (Manhattan) distance.
    Cityblock,
    /// L∞ distance.
    Chebyshev,
    /// One minus cosine similarity.
    Cosine,
    /// One minus Pearson correlation.
    Correlation,
}

impl Metric {
    /// Distance between two equal-length vectors.
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
            Metric::Cityblock => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Metric::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
            Metric::Cosine => angular(a, b, a, b),
            Metric::Correlation => {
                let ca = centered(a);
                let cb = centered(b);
                angular(&ca, &cb, a, b)
            }
        }
    }

    /// Condensed upper-triangle distance matrix (row-major, length n·(n−1)/2).
    pub fn condensed(self, points: &[&[f64]]) -> Vec<f64> {
        let n = points.len();
        let mut condensed = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for row in 0..n.saturating_sub(1) {
            for col in (row + 1)..n {
                condensed.push(self.distance(points[row], points[col]));
            }
        }
        condensed
    }
}

fn centered(v: &[f64]) -> Vec<f64> {
    let mean = v.iter().sum::<f64>() / v.len().max(1) as f64;
    v.iter().map(|x| x - mean).collect()
}

/// `1 - cos(u, v)`, with `a`/`b` the original vectors for the degenerate case.
fn angular(u: &[f64], v: &[f64], a: &[f64], b: &[f64]) -> f64 {
    let nu = u.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nv = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if nu == 0.0 || nv == 0.0 {
        return if a == b { 0.0 } else { 1.0 };
    }
    let dot: f64 = u.iter().zip(v).map(|(x, y)| x * y).sum();
    (1.0 - dot / (nu * nv)).clamp(0.0, 2.0)
}
