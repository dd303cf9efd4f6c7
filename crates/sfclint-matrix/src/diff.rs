//! Elementwise comparison of a path matrix against base connectivity.

use crate::SquareMatrix;
use nalgebra::DMatrix;

/// `connectivity - path`, elementwise. Operands are 0/1 adjacency matrices
/// over the same ordering, so every entry lands in {-1, 0, 1}.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffMatrix {
    inner: DMatrix<i64>,
}

impl DiffMatrix {
    pub fn between(connectivity: &SquareMatrix, path: &SquareMatrix) -> DiffMatrix {
        debug_assert_eq!(connectivity.n(), path.n());
        let n = connectivity.n();
        let mut inner = DMatrix::<i64>::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                inner[(i, j)] = as_count(connectivity.get(i, j)) - as_count(path.get(i, j));
            }
        }
        DiffMatrix { inner }
    }

    pub fn n(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.inner[(row, col)]
    }

    /// `(from, to)` pairs the path traverses without a declared link
    /// (entry -1). These are the connectivity problems.
    pub fn missing(&self) -> Vec<(usize, usize)> {
        self.entries_equal(-1)
    }

    /// `(from, to)` pairs with a declared link no path edge uses (entry +1).
    /// Informational only.
    pub fn unused(&self) -> Vec<(usize, usize)> {
        self.entries_equal(1)
    }

    fn entries_equal(&self, value: i64) -> Vec<(usize, usize)> {
        let n = self.n();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.inner[(i, j)] == value)
            .collect()
    }
}

fn as_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
