//! Service-template ingestion: YAML text into typed node descriptors.
//!
//! Only the slice of a TOSCA service template that the analysis reads is
//! modeled: `topology_template.node_templates`, each entry's `type` tag and
//! its `requirements` list. Everything else in the document is ignored, and
//! no schema validation happens here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node type tag of a connection point in the TOSCA NFV profile.
pub const CONNECTION_POINT_TYPE: &str = "tosca.nodes.nfv.CP";
/// Node type tag of a forwarding path in the TOSCA NFV profile.
pub const FORWARDING_PATH_TYPE: &str = "tosca.nodes.nfv.FP";

/// Type tags used to classify node templates. The defaults are the TOSCA NFV
/// profile constants; deployments with vendored type hierarchies can swap
/// them without touching the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTags {
    pub connection_point: String,
    pub forwarding_path: String,
}

impl Default for TypeTags {
    fn default() -> Self {
        Self {
            connection_point: CONNECTION_POINT_TYPE.to_string(),
            forwarding_path: FORWARDING_PATH_TYPE.to_string(),
        }
    }
}

/// What a node template is to the analysis, decided purely by its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    ConnectionPoint,
    ForwardingPath,
    Other,
}

/// One entry of a node template's `requirements` list.
///
/// The YAML shape is a sequence of single-key mappings; each key selects the
/// variant. Entries whose payload does not match the expected shape are
/// dropped during ingestion (the link or edge is simply absent), so a
/// malformed requirement never fails a whole template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Requirement {
    /// `- virtualLink: <link id>`
    VirtualLink(String),
    /// `- forwarder: {capability: <source cp>, relationship: <target cp>}`
    #[serde(rename_all = "camelCase")]
    Forwarder {
        capability: String,
        relationship: String,
    },
    /// Any other single-key entry; kept by key name, never analyzed.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    /// The declared `type` string; empty when the template carries none.
    #[serde(rename = "type")]
    pub type_name: String,
    pub requirements: Vec<Requirement>,
}

impl NodeTemplate {
    pub fn classify(&self, tags: &TypeTags) -> NodeClass {
        if self.type_name == tags.connection_point {
            NodeClass::ConnectionPoint
        } else if self.type_name == tags.forwarding_path {
            NodeClass::ForwardingPath
        } else {
            NodeClass::Other
        }
    }

    /// Target of the first `virtualLink` requirement, if any.
    pub fn first_virtual_link(&self) -> Option<&str> {
        self.requirements.iter().find_map(|r| match r {
            Requirement::VirtualLink(target) => Some(target.as_str()),
            _ => None,
        })
    }

    /// `(capability, relationship)` pairs of every forwarder requirement, in
    /// declaration order.
    pub fn forwarder_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.requirements.iter().filter_map(|r| match r {
            Requirement::Forwarder {
                capability,
                relationship,
            } => Some((capability.as_str(), relationship.as_str())),
            _ => None,
        })
    }
}

/// The node templates of one service template, in authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub nodes: Vec<NodeTemplate>,
}

/// Reads the node templates out of a YAML service template.
///
/// Returns `Ok(None)` when the document has no
/// `topology_template.node_templates` section: there is nothing to analyze,
/// which is not a failure. Unparseable YAML and a non-mapping
/// `node_templates` value are errors.
pub fn load_template(text: &str) -> Result<Option<ServiceTemplate>> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| Error::TemplateYaml {
        message: e.to_string(),
    })?;
    let doc = serde_json::to_value(&yaml).map_err(|e| Error::TemplateYaml {
        message: e.to_string(),
    })?;

    let Some(raw) = doc
        .get("topology_template")
        .and_then(|t| t.get("node_templates"))
    else {
        return Ok(None);
    };
    let Some(entries) = raw.as_object() else {
        return Err(Error::NodeTemplates {
            message: "node_templates is not a mapping".to_string(),
        });
    };

    let mut nodes = Vec::with_capacity(entries.len());
    for (name, descriptor) in entries {
        nodes.push(node_from_value(name, descriptor));
    }
    Ok(Some(ServiceTemplate { nodes }))
}

fn node_from_value(name: &str, descriptor: &serde_json::Value) -> NodeTemplate {
    let type_name = descriptor
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();
    let requirements = descriptor
        .get("requirements")
        .and_then(serde_json::Value::as_array)
        .map(|entries| entries.iter().filter_map(requirement_from_value).collect())
        .unwrap_or_default();
    NodeTemplate {
        name: name.to_string(),
        type_name,
        requirements,
    }
}

/// Maps one requirement entry to its tagged variant; `None` drops a
/// malformed entry (not a single-key mapping, or a payload without the
/// fields its key requires).
fn requirement_from_value(value: &serde_json::Value) -> Option<Requirement> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let (key, payload) = map.iter().next()?;
    match key.as_str() {
        "virtualLink" => Some(Requirement::VirtualLink(payload.as_str()?.to_string())),
        "forwarder" => {
            let capability = payload.get("capability")?.as_str()?.to_string();
            let relationship = payload.get("relationship")?.as_str()?.to_string();
            Some(Requirement::Forwarder {
                capability,
                relationship,
            })
        }
        other => Some(Requirement::Other(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_nodes_with_requirements() {
        let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: VL1
    Forwarding_path1:
      type: tosca.nodes.nfv.FP
      requirements:
        - forwarder: {capability: CP1, relationship: CP2}
"#;
        let template = load_template(text).unwrap().unwrap();
        assert_eq!(template.nodes.len(), 2);
        assert_eq!(template.nodes[0].name, "CP1");
        assert_eq!(template.nodes[0].type_name, "tosca.nodes.nfv.CP");
        assert_eq!(
            template.nodes[0].requirements,
            vec![Requirement::VirtualLink("VL1".to_string())]
        );
        assert_eq!(
            template.nodes[1].requirements,
            vec![Requirement::Forwarder {
                capability: "CP1".to_string(),
                relationship: "CP2".to_string(),
            }]
        );
    }

    #[test]
    fn missing_node_templates_is_not_applicable() {
        assert_eq!(load_template("").unwrap(), None);
        assert_eq!(load_template("tosca_definitions_version: x\n").unwrap(), None);
        assert_eq!(
            load_template("topology_template:\n  inputs: {}\n").unwrap(),
            None
        );
    }

    #[test]
    fn unparseable_yaml_is_an_error() {
        let err = load_template("topology_template: [unclosed").unwrap_err();
        assert!(matches!(err, Error::TemplateYaml { .. }));
    }

    #[test]
    fn non_mapping_node_templates_is_an_error() {
        let err = load_template("topology_template:\n  node_templates: 7\n").unwrap_err();
        assert!(err.to_string().contains("not a mapping"));
    }

    #[test]
    fn malformed_requirement_entries_are_dropped() {
        let text = r#"
topology_template:
  node_templates:
    CP1:
      type: tosca.nodes.nfv.CP
      requirements:
        - virtualLink: [not, a, string]
        - forwarder: {capability: CP1}
        - just a string
        - membership: net
        - virtualLink: VL9
"#;
        let template = load_template(text).unwrap().unwrap();
        let node = &template.nodes[0];
        assert_eq!(
            node.requirements,
            vec![
                Requirement::Other("membership".to_string()),
                Requirement::VirtualLink("VL9".to_string()),
            ]
        );
        assert_eq!(node.first_virtual_link(), Some("VL9"));
    }

    #[test]
    fn node_without_type_matches_no_class() {
        let text = "topology_template:\n  node_templates:\n    n1: {}\n";
        let template = load_template(text).unwrap().unwrap();
        let node = &template.nodes[0];
        assert_eq!(node.type_name, "");
        assert_eq!(node.classify(&TypeTags::default()), NodeClass::Other);
    }

    #[test]
    fn classify_honors_custom_tags() {
        let tags = TypeTags {
            connection_point: "acme.CP".to_string(),
            forwarding_path: "acme.FP".to_string(),
        };
        let node = NodeTemplate {
            name: "p".to_string(),
            type_name: "acme.FP".to_string(),
            requirements: Vec::new(),
        };
        assert_eq!(node.classify(&tags), NodeClass::ForwardingPath);
        assert_eq!(node.classify(&TypeTags::default()), NodeClass::Other);
    }

    #[test]
    fn requirement_serialization_mirrors_the_yaml_shape() {
        let req = Requirement::Forwarder {
            capability: "CP1".to_string(),
            relationship: "CP2".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"forwarder": {"capability": "CP1", "relationship": "CP2"}})
        );
        assert_eq!(
            serde_json::to_value(Requirement::VirtualLink("VL1".to_string())).unwrap(),
            serde_json::json!({"virtualLink": "VL1"})
        );
    }
}
