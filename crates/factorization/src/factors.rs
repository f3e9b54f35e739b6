//! Dense row-major factor matrices.

use rand::Rng;

/// A `(rows x rank)` matrix of latent factors stored row-major in one `Vec`.
///
/// Row `i` is the embedding of the entity with dense index `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorMatrix {
    rows: usize,
    rank: usize,
    data: Vec<f32>,
}

impl FactorMatrix {
    pub fn zeros(rows: usize, rank: usize) -> Self {
        Self {
            rows,
            rank,
            data: vec![0.0; rows * rank],
        }
    }

    /// Every entry drawn uniformly from `[-scale, scale]`
    pub fn random<R: Rng>(rows: usize, rank: usize, scale: f32, rng: &mut R) -> Self {
        if scale == 0.0 {
            return Self::zeros(rows, rank);
        }
        let data = (0..rows * rank)
            .map(|_| rng.random_range(-scale..=scale))
            .collect();
        Self { rows, rank, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, the embedding dimensionality
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Row `index`; panics if out of bounds, like slice indexing
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.rank..(index + 1) * self.rank]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.data[index * self.rank..(index + 1) * self.rank]
    }

    /// Row `index`, or `None` if out of bounds
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        (index < self.rows).then(|| self.row(index))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.rank)
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// Dot product of two equal-length vectors
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
