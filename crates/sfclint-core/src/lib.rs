#![forbid(unsafe_code)]

//! NFV service-template analysis: link connectivity and forwarding-path
//! loops (headless).
//!
//! Design goals:
//! - read the node-template slice of a TOSCA NFV service template, nothing
//!   more (no schema validation, no full parser)
//! - deterministic, testable outputs: plain matrices and findings, rendering
//!   left to callers
//! - failures stay local: one bad forwarding path never hides findings in
//!   the others

pub mod analysis;
pub mod error;
pub mod report;
pub mod template;

pub use analysis::{ConnectionPoint, Connectivity, ForwardingPath};
pub use error::{Error, Result};
pub use report::{
    Analysis, LinkPair, LoopReport, MatrixView, PathOutcome, PathReport, PathSummary,
};
pub use template::{NodeTemplate, Requirement, ServiceTemplate, TypeTags, load_template};

use sfclint_matrix::{DiffMatrix, loops};
use template::NodeClass;

/// Entry point for one-shot template analysis. Stateless apart from the
/// type tags used to classify node templates.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    tags: TypeTags,
}

impl Analyzer {
    fn analyze_timing_enabled() -> bool {
        static ENABLED: std::sync::OnceLock<bool> = std::sync::OnceLock::new();
        *ENABLED.get_or_init(
            || match std::env::var("SFCLINT_ANALYZE_TIMING").as_deref() {
                Ok("1") | Ok("true") => true,
                _ => false,
            },
        )
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the node type tags used to pick out connection points and
    /// forwarding paths. Defaults are the TOSCA NFV profile constants.
    pub fn with_tags(mut self, tags: TypeTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn tags(&self) -> &TypeTags {
        &self.tags
    }

    /// Loads a YAML service template and analyzes it.
    ///
    /// `Ok(None)` means the document has no node templates: nothing to
    /// analyze. Set `SFCLINT_ANALYZE_TIMING=1` to print phase timings to
    /// stderr.
    pub fn analyze(&self, text: &str) -> Result<Option<Analysis>> {
        let timing_enabled = Self::analyze_timing_enabled();
        let total_start = timing_enabled.then(std::time::Instant::now);

        let load_start = timing_enabled.then(std::time::Instant::now);
        let Some(template) = template::load_template(text)? else {
            return Ok(None);
        };
        let load = load_start.map(|s| s.elapsed());

        let analysis = self.analyze_template(&template);

        if let Some(start) = total_start {
            eprintln!(
                "[analyze-timing] total={:?} load={:?} connection_points={} paths={} input_bytes={}",
                start.elapsed(),
                load.unwrap_or_default(),
                analysis.connection_points.len(),
                analysis.paths.len(),
                text.len(),
            );
        }
        Ok(Some(analysis))
    }

    /// Analyzes an already-loaded template. Infallible: per-path problems
    /// land in that path's report instead of failing the run.
    pub fn analyze_template(&self, template: &ServiceTemplate) -> Analysis {
        let connectivity = analysis::connectivity::build(template, &self.tags);

        let mut paths = Vec::new();
        for node in &template.nodes {
            if node.classify(&self.tags) != NodeClass::ForwardingPath {
                continue;
            }
            paths.push(self.analyze_path(node, &connectivity));
        }

        Analysis {
            connection_points: connectivity.points.clone(),
            connectivity: MatrixView::new(&connectivity.ordering, &connectivity.matrix),
            paths,
        }
    }

    fn analyze_path(&self, node: &NodeTemplate, connectivity: &Connectivity) -> PathReport {
        let path = match analysis::paths::build(node, &connectivity.ordering) {
            Ok(path) => path,
            Err(err) => {
                return PathReport {
                    name: node.name.clone(),
                    outcome: PathOutcome::Failed {
                        error: err.to_string(),
                    },
                };
            }
        };

        let total_cps = path.total_cps();
        let loop_finding = loops::find_loop(&path.matrix, total_cps)
            .map(|finding| LoopReport::from_finding(&connectivity.ordering, finding));

        let diff = DiffMatrix::between(&connectivity.matrix, &path.matrix);
        let missing_links = diff
            .missing()
            .into_iter()
            .map(|(i, j)| LinkPair::from_indices(&connectivity.ordering, i, j))
            .collect();
        let unused_links = diff
            .unused()
            .into_iter()
            .map(|(i, j)| LinkPair::from_indices(&connectivity.ordering, i, j))
            .collect();
        let matrix = MatrixView::new(&connectivity.ordering, &path.matrix);

        PathReport {
            name: path.name,
            outcome: PathOutcome::Analyzed {
                matrix,
                total_cps,
                touched: path.touched,
                loop_finding,
                missing_links,
                unused_links,
            },
        }
    }
}

#[cfg(test)]
mod tests;
