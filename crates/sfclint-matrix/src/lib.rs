//! Square adjacency matrices over a canonical name ordering, used by `sfclint`.
//!
//! Entries are walk counts (`u64`). Builders only ever write 0 or 1; larger
//! values appear through powering, and only zero vs non-zero is significant
//! downstream, so products saturate instead of wrapping.

use nalgebra::DMatrix;
use rustc_hash::FxHashMap;

pub mod diff;
pub mod loops;

pub use diff::DiffMatrix;
pub use loops::LoopFinding;

/// Canonical row/column assignment for one analysis run: names sorted
/// ascending, each holding its position for as long as the run lives. Every
/// matrix derived from the same template must be built over the same
/// `Ordering`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordering {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Ordering {
    /// Sorts (and deduplicates) the given names into the canonical order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        names.dedup();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self { names, index }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Row/column index of `name`, if it is part of this ordering.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }
}

/// N×N matrix of walk counts over one [`Ordering`].
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    inner: DMatrix<u64>,
}

impl SquareMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: DMatrix::<u64>::zeros(n, n),
        }
    }

    /// Number of rows (equal to the number of columns).
    pub fn n(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.inner[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u64) {
        self.inner[(row, col)] = value;
    }

    pub fn is_zero(&self) -> bool {
        self.inner.iter().all(|v| *v == 0)
    }

    /// Indices whose diagonal entry is non-zero.
    pub fn diagonal_nonzero(&self) -> Vec<usize> {
        (0..self.n()).filter(|&i| self.inner[(i, i)] != 0).collect()
    }

    /// Standard matrix product with saturating arithmetic. Walk counts can
    /// exceed `u64::MAX` for large powers; saturation keeps every true
    /// non-zero entry non-zero, which is all the loop check reads.
    pub fn saturating_mul(&self, rhs: &SquareMatrix) -> SquareMatrix {
        debug_assert_eq!(self.n(), rhs.n());
        let n = self.n();
        let mut out = SquareMatrix::zeros(n);
        for i in 0..n {
            for j in 0..n {
                let mut sum: u64 = 0;
                for k in 0..n {
                    sum = sum.saturating_add(self.inner[(i, k)].saturating_mul(rhs.inner[(k, j)]));
                }
                out.inner[(i, j)] = sum;
            }
        }
        out
    }

    /// Row-major copy of the entries, for presentation and serialization.
    pub fn rows(&self) -> Vec<Vec<u64>> {
        (0..self.n())
            .map(|i| (0..self.n()).map(|j| self.inner[(i, j)]).collect())
            .collect()
    }
}
