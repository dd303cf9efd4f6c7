use crate::*;
use serde_json::json;

#[test]
fn analysis_serializes_to_plain_json() {
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    CP2:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    Forwarding_path1:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP2}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    assert_eq!(
        serde_json::to_value(&analysis).unwrap(),
        json!({
            "connectionPoints": [
                {"name": "CP1", "virtualLink": "VL1"},
                {"name": "CP2", "virtualLink": "VL1"},
            ],
            "connectivity": {
                "names": ["CP1", "CP2"],
                "rows": [[0, 1], [1, 0]],
            },
            "paths": [{
                "name": "Forwarding_path1",
                "status": "analyzed",
                "matrix": {
                    "names": ["CP1", "CP2"],
                    "rows": [[0, 1], [0, 0]],
                },
                "totalCps": 2,
                "touched": ["CP1", "CP2"],
                "loopFinding": null,
                "missingLinks": [],
                "unusedLinks": [{"from": "CP2", "to": "CP1"}],
            }],
        })
    );
}

#[test]
fn analysis_roundtrips_through_json() {
    let text = r#"
topology_template:
  node_templates:
    A:
      type: tosca.nodes.nfv.CP
    ring:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: A, relationship: A}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    let encoded = serde_json::to_string(&analysis).unwrap();
    let decoded: Analysis = serde_json::from_str(&encoded).unwrap();
    assert_eq!(analysis, decoded);
}

#[test]
fn analysis_is_idempotent() {
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    CP2:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL2
    hop:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP2}
        - forwarder: {capability: CP2, relationship: CP1}
"#;
    let first = Analyzer::new().analyze(text).unwrap().unwrap();
    let second = Analyzer::new().analyze(text).unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_link_is_flagged_and_summarized() {
    // CP1 and CP2 share a link; the path also jumps to CP3, which shares
    // nothing with CP2.
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    CP2:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    CP3:
      type: tosca.nodes.nfv.CP
    leap:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP2}
        - forwarder: {capability: CP2, relationship: CP3}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    assert_eq!(analysis.paths[0].summary(), PathSummary::ConnectivityProblem);
    assert!(analysis.has_findings());
    let PathOutcome::Analyzed { missing_links, .. } = &analysis.paths[0].outcome else {
        panic!("leap should analyze");
    };
    assert_eq!(
        missing_links,
        &[LinkPair {
            from: "CP2".to_string(),
            to: "CP3".to_string(),
        }]
    );
}

#[test]
fn summary_prefers_loop_over_missing_links() {
    // A self-loop on an unlinked point: both a loop and a missing link.
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
    knot:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP1}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    let report = &analysis.paths[0];
    assert_eq!(report.summary(), PathSummary::LoopFound);
    let PathOutcome::Analyzed {
        loop_finding,
        missing_links,
        ..
    } = &report.outcome
    else {
        panic!("knot should analyze");
    };
    assert!(loop_finding.is_some());
    assert_eq!(missing_links.len(), 1);
}

#[test]
fn clean_analysis_has_no_findings() {
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    CP2:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    hop:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP2}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    assert_eq!(analysis.paths[0].summary(), PathSummary::Clean);
    assert!(!analysis.has_findings());
}

#[test]
fn failed_path_counts_as_finding() {
    let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
    ghost:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: nowhere}
"#;
    let analysis = Analyzer::new().analyze(text).unwrap().unwrap();
    assert_eq!(analysis.paths[0].summary(), PathSummary::Failed);
    assert!(analysis.has_findings());
}
