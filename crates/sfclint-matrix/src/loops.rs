//! Loop detection by successive matrix powers.
//!
//! A directed adjacency matrix `M` has a closed walk of length `x` exactly
//! when `M^x` carries a non-zero diagonal entry. Any cycle in a sub-graph of
//! `n` distinct nodes has length at most `n`, so powering up to `n` decides
//! loop presence without enumerating cycles.

use crate::SquareMatrix;

/// Evidence for the shortest closed walk found in a path matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopFinding {
    /// Smallest exponent with a non-zero diagonal entry, i.e. the shortest
    /// cycle length.
    pub length: usize,
    /// Row indices whose diagonal entry of the powered matrix is non-zero.
    /// When several cycles coexist this can include nodes on cycles longer
    /// than `length`; it is a participation hint, not an exact enumeration.
    pub nodes: Vec<usize>,
    /// The powered matrix `M^length` that exhibited the loop.
    pub powered: SquareMatrix,
}

/// Searches exponents `1..=total_nodes` for the first power of `matrix` with
/// a non-zero diagonal. `total_nodes` is the number of distinct nodes the
/// path actually touches, the tight upper bound on its cycle lengths.
///
/// Returns `None` when no exponent qualifies, when `total_nodes` is zero, or
/// immediately when the matrix has no edges at all.
pub fn find_loop(matrix: &SquareMatrix, total_nodes: usize) -> Option<LoopFinding> {
    if total_nodes == 0 || matrix.is_zero() {
        return None;
    }
    let mut powered = matrix.clone();
    for length in 1..=total_nodes {
        let nodes = powered.diagonal_nonzero();
        if !nodes.is_empty() {
            return Some(LoopFinding {
                length,
                nodes,
                powered,
            });
        }
        if length < total_nodes {
            powered = powered.saturating_mul(matrix);
        }
    }
    None
}
