//! Per-forwarding-path directed traversal matrices over the shared ordering.

use indexmap::IndexSet;
use sfclint_matrix::{Ordering, SquareMatrix};

use crate::error::{Error, Result};
use crate::template::NodeTemplate;

/// One forwarding path's extracted traversal graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardingPath {
    pub name: String,
    /// Directed 0/1 matrix over the run's ordering; `(i, j)` set when the
    /// path traverses from point i to point j.
    pub matrix: SquareMatrix,
    /// Connection points referenced by at least one edge, in first-use
    /// order.
    pub touched: Vec<String>,
}

impl ForwardingPath {
    /// Number of distinct connection points the path uses. This bounds the
    /// loop search: a cycle cannot be longer than the set of points it
    /// revisits.
    pub fn total_cps(&self) -> usize {
        self.touched.len()
    }
}

/// Builds the traversal matrix for one forwarding-path node.
///
/// Every forwarder requirement contributes the edge
/// `capability -> relationship`. A name missing from the ordering fails the
/// whole path with [`Error::UnknownConnectionPoint`]; callers report that
/// path and keep analyzing the others.
pub fn build(node: &NodeTemplate, ordering: &Ordering) -> Result<ForwardingPath> {
    let mut matrix = SquareMatrix::zeros(ordering.len());
    let mut touched: IndexSet<String> = IndexSet::new();
    for (capability, relationship) in node.forwarder_edges() {
        let from = position(ordering, &node.name, capability)?;
        let to = position(ordering, &node.name, relationship)?;
        matrix.set(from, to, 1);
        touched.insert(capability.to_string());
        touched.insert(relationship.to_string());
    }
    tracing::debug!(
        path = %node.name,
        touched = touched.len(),
        "forwarding-path matrix built"
    );
    Ok(ForwardingPath {
        name: node.name.clone(),
        matrix,
        touched: touched.into_iter().collect(),
    })
}

fn position(ordering: &Ordering, path: &str, name: &str) -> Result<usize> {
    ordering
        .position(name)
        .ok_or_else(|| Error::UnknownConnectionPoint {
            path: path.to_string(),
            name: name.to_string(),
        })
}
