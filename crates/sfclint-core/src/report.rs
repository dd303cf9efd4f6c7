//! Serializable analysis results handed to presentation.
//!
//! Everything here is plain data: name lists, 0/1 matrices as nested arrays,
//! and per-path findings. Rendering (tables, warnings, colors) is the
//! caller's business.

use serde::{Deserialize, Serialize};
use sfclint_matrix::{LoopFinding, Ordering, SquareMatrix};

use crate::analysis::ConnectionPoint;

/// A matrix together with the names labelling its rows and columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixView {
    pub names: Vec<String>,
    pub rows: Vec<Vec<u64>>,
}

impl MatrixView {
    pub(crate) fn new(ordering: &Ordering, matrix: &SquareMatrix) -> Self {
        Self {
            names: ordering.names().to_vec(),
            rows: matrix.rows(),
        }
    }
}

/// One directed pair of connection points, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPair {
    pub from: String,
    pub to: String,
}

impl LinkPair {
    pub(crate) fn from_indices(ordering: &Ordering, from: usize, to: usize) -> Self {
        Self {
            from: ordering.name(from).unwrap_or_default().to_string(),
            to: ordering.name(to).unwrap_or_default().to_string(),
        }
    }
}

/// Cycle evidence for one forwarding path, names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopReport {
    /// Shortest cycle length found.
    pub length: usize,
    /// Connection points whose diagonal entry was non-zero at that power.
    /// With several coexisting cycles this can include points on longer
    /// ones; it is a participation hint, not an exact enumeration.
    pub nodes: Vec<String>,
    /// The powered matrix that exhibited the loop.
    pub powered: MatrixView,
}

impl LoopReport {
    pub(crate) fn from_finding(ordering: &Ordering, finding: LoopFinding) -> Self {
        Self {
            length: finding.length,
            nodes: finding
                .nodes
                .iter()
                .filter_map(|&i| ordering.name(i))
                .map(str::to_string)
                .collect(),
            powered: MatrixView::new(ordering, &finding.powered),
        }
    }
}

/// What happened to one forwarding path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PathOutcome {
    #[serde(rename_all = "camelCase")]
    Analyzed {
        matrix: MatrixView,
        /// Distinct connection points the path uses; the bound applied to
        /// the loop search.
        total_cps: usize,
        touched: Vec<String>,
        loop_finding: Option<LoopReport>,
        /// Edges the path traverses that connectivity does not provide.
        missing_links: Vec<LinkPair>,
        /// Declared links no edge of this path uses. Informational.
        unused_links: Vec<LinkPair>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: PathOutcome,
}

/// One-line verdict for a path. A looping path with missing links reports
/// the loop; the full detail stays in the outcome either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSummary {
    Clean,
    LoopFound,
    ConnectivityProblem,
    Failed,
}

impl PathReport {
    pub fn summary(&self) -> PathSummary {
        match &self.outcome {
            PathOutcome::Failed { .. } => PathSummary::Failed,
            PathOutcome::Analyzed {
                loop_finding: Some(_),
                ..
            } => PathSummary::LoopFound,
            PathOutcome::Analyzed { missing_links, .. } if !missing_links.is_empty() => {
                PathSummary::ConnectivityProblem
            }
            PathOutcome::Analyzed { .. } => PathSummary::Clean,
        }
    }
}

/// Full result of analyzing one service template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The canonical ordering with each point's declared link.
    pub connection_points: Vec<ConnectionPoint>,
    /// Symmetric same-link matrix over the ordering.
    pub connectivity: MatrixView,
    /// One report per forwarding path, in template order.
    pub paths: Vec<PathReport>,
}

impl Analysis {
    /// True when any path failed, loops, or traverses links connectivity
    /// does not provide.
    pub fn has_findings(&self) -> bool {
        self.paths.iter().any(|p| p.summary() != PathSummary::Clean)
    }
}
