//! Base connectivity: the canonical connection-point ordering and the
//! symmetric same-link adjacency matrix.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sfclint_matrix::{Ordering, SquareMatrix};

use crate::template::{NodeClass, ServiceTemplate, TypeTags};

/// A connection point admitted to the canonical ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPoint {
    pub name: String,
    /// Declared virtual-link identifier; empty when the template declares
    /// none.
    pub virtual_link: String,
}

/// Output of the connectivity build, fixed for the rest of the run. `points`
/// is aligned with `ordering`: index i describes row/column i of `matrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connectivity {
    pub points: Vec<ConnectionPoint>,
    pub ordering: Ordering,
    pub matrix: SquareMatrix,
}

/// Builds the canonical ordering and the same-link adjacency matrix.
///
/// Connection points are collected by type tag; each contributes the target
/// of its first `virtualLink` requirement, or the empty string. Duplicate
/// names keep the last declaration. Names are then sorted to fix the
/// ordering, and two points become adjacent exactly when they declare the
/// same non-empty link; an empty link matches nothing, so undeclared points
/// never pair up with each other. The diagonal stays zero.
pub fn build(template: &ServiceTemplate, tags: &TypeTags) -> Connectivity {
    let mut links: IndexMap<String, String> = IndexMap::new();
    for node in &template.nodes {
        if node.classify(tags) != NodeClass::ConnectionPoint {
            continue;
        }
        let link = node.first_virtual_link().unwrap_or("").to_string();
        links.insert(node.name.clone(), link);
    }

    let mut entries: Vec<(String, String)> = links.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let ordering = Ordering::from_names(entries.iter().map(|(name, _)| name.clone()));
    let points: Vec<ConnectionPoint> = entries
        .into_iter()
        .map(|(name, virtual_link)| ConnectionPoint { name, virtual_link })
        .collect();

    let n = ordering.len();
    let mut matrix = SquareMatrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let link = &points[i].virtual_link;
            if !link.is_empty() && link == &points[j].virtual_link {
                matrix.set(i, j, 1);
            }
        }
    }

    tracing::debug!(connection_points = n, "connectivity matrix built");
    Connectivity {
        points,
        ordering,
        matrix,
    }
}
