//! The dataset: nodes plus the relationships between them, in write order.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};
use crate::types::{Endpoint, NodeRef, NodeSpec, RelationshipSpec};

/// A fixed set of nodes and relationships to seed.
///
/// Nodes are written in order, then relationships in order. Every relationship
/// endpoint must name a node in `nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub relationships: Vec<RelationshipSpec>,
}

impl Dataset {
    pub fn new(nodes: Vec<NodeSpec>, relationships: Vec<RelationshipSpec>) -> Self {
        Self {
            nodes,
            relationships,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Find a node by label and key.
    pub fn node(&self, node_ref: &NodeRef) -> Option<&NodeSpec> {
        self.nodes
            .iter()
            .find(|n| n.label == node_ref.label && n.key == node_ref.key)
    }

    /// Resolve a reference into something a store can match on.
    pub fn endpoint(&self, node_ref: &NodeRef) -> Option<Endpoint<'_>> {
        self.node(node_ref).map(|n| Endpoint {
            label: &n.label,
            key_property: &n.key_property,
            key: &n.key,
        })
    }

    /// Distinct `(label, key_property)` pairs, in first-seen order.
    pub fn key_schema(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .filter(|n| seen.insert((n.label.as_str(), n.key_property.as_str())))
            .map(|n| (n.label.as_str(), n.key_property.as_str()))
            .collect()
    }

    /// Check the dataset can be written as-is.
    ///
    /// Labels, relationship types and property names end up interpolated into
    /// Cypher, so they must be plain identifiers.
    pub fn validate(&self) -> std::result::Result<(), DatasetError> {
        let mut keys: HashSet<(&str, &str)> = HashSet::with_capacity(self.nodes.len());

        for node in &self.nodes {
            check_identifier("label", &node.label)?;
            check_identifier("key property", &node.key_property)?;
            for name in node.properties.keys() {
                check_identifier("property", name)?;
            }
            if node.properties.contains_key(&node.key_property) {
                return Err(DatasetError::KeyPropertyOverride {
                    label: node.label.clone(),
                    key: node.key.clone(),
                    key_property: node.key_property.clone(),
                });
            }
            if !keys.insert((node.label.as_str(), node.key.as_str())) {
                return Err(DatasetError::DuplicateKey {
                    label: node.label.clone(),
                    key: node.key.clone(),
                });
            }
        }

        // An attribute equal to another node's key would make that node's
        // endpoint match twice.
        let owners: HashSet<(&str, &str, &str)> = self
            .nodes
            .iter()
            .map(|n| (n.label.as_str(), n.key_property.as_str(), n.key.as_str()))
            .collect();
        for node in &self.nodes {
            for (name, value) in &node.properties {
                let Some(value) = value.as_str() else {
                    continue;
                };
                if owners.contains(&(node.label.as_str(), name.as_str(), value)) {
                    return Err(DatasetError::ShadowedKey {
                        label: node.label.clone(),
                        key: node.key.clone(),
                        key_property: name.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        for rel in &self.relationships {
            check_identifier("relationship type", &rel.rel_type)?;
            for name in rel.properties.keys() {
                check_identifier("property", name)?;
            }
            for end in [&rel.from, &rel.to] {
                if !keys.contains(&(end.label.as_str(), end.key.as_str())) {
                    return Err(DatasetError::UnknownEndpoint {
                        rel_type: rel.rel_type.clone(),
                        label: end.label.clone(),
                        key: end.key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a JSON fixture.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON fixture from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let dataset = Self::from_json_str(&raw)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            nodes = dataset.node_count(),
            relationships = dataset.relationship_count(),
            "Loaded dataset fixture"
        );
        Ok(dataset)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(kind: &'static str, name: &str) -> std::result::Result<(), DatasetError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(DatasetError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OntologyError;
    use std::io::Write;

    fn two_node_dataset() -> Dataset {
        Dataset::new(
            vec![
                NodeSpec::new("Doctor", "doctorId", "doc1").with("name", "Dr. A"),
                NodeSpec::new("Hospital", "hospitalId", "hosp1"),
            ],
            vec![RelationshipSpec::new(
                "PRACTICES_AT",
                NodeRef::new("Doctor", "doc1"),
                NodeRef::new("Hospital", "hosp1"),
            )],
        )
    }

    #[test]
    fn test_valid_dataset() {
        assert_eq!(two_node_dataset().validate(), Ok(()));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("doctorId"));
        assert!(is_identifier("_x1"));
        assert!(is_identifier("HAS_DIAGNOSIS"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("Doctor) DETACH DELETE (n"));
        assert!(!is_identifier("with-dash"));
    }

    #[test]
    fn test_rejects_injected_label() {
        let mut ds = two_node_dataset();
        ds.nodes[0].label = "Doctor {x:1}) MATCH (n".to_string();
        assert!(matches!(
            ds.validate(),
            Err(DatasetError::InvalidIdentifier { kind: "label", .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let mut ds = two_node_dataset();
        ds.nodes.push(NodeSpec::new("Doctor", "doctorId", "doc1"));
        assert_eq!(
            ds.validate(),
            Err(DatasetError::DuplicateKey {
                label: "Doctor".to_string(),
                key: "doc1".to_string(),
            })
        );
    }

    #[test]
    fn test_same_key_different_label_is_fine() {
        let mut ds = two_node_dataset();
        ds.nodes.push(NodeSpec::new("Patient", "patientId", "doc1"));
        assert_eq!(ds.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_key_property_override() {
        let mut ds = two_node_dataset();
        ds.nodes[1] = NodeSpec::new("Hospital", "hospitalId", "hosp1").with("hospitalId", "x");
        assert!(matches!(
            ds.validate(),
            Err(DatasetError::KeyPropertyOverride { .. })
        ));
    }

    #[test]
    fn test_rejects_attribute_shadowing_another_key() {
        let ds = Dataset::new(
            vec![
                NodeSpec::new("Patient", "mrn", "MRN-001").with("patientId", "pat1"),
                NodeSpec::new("Patient", "patientId", "pat1"),
                NodeSpec::new("Doctor", "doctorId", "doc1"),
            ],
            vec![RelationshipSpec::new(
                "CONSULTED",
                NodeRef::new("Doctor", "doc1"),
                NodeRef::new("Patient", "pat1"),
            )],
        );
        assert_eq!(
            ds.validate(),
            Err(DatasetError::ShadowedKey {
                label: "Patient".to_string(),
                key: "MRN-001".to_string(),
                key_property: "patientId".to_string(),
                value: "pat1".to_string(),
            })
        );
    }

    #[test]
    fn test_shared_attribute_across_labels_is_fine() {
        let mut ds = two_node_dataset();
        ds.nodes
            .push(NodeSpec::new("Patient", "patientId", "pat1").with("doctorId", "doc1"));
        assert_eq!(ds.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_unknown_endpoint() {
        let mut ds = two_node_dataset();
        ds.relationships.push(RelationshipSpec::new(
            "CONSULTED",
            NodeRef::new("Doctor", "doc1"),
            NodeRef::new("Patient", "pat9"),
        ));
        assert_eq!(
            ds.validate(),
            Err(DatasetError::UnknownEndpoint {
                rel_type: "CONSULTED".to_string(),
                label: "Patient".to_string(),
                key: "pat9".to_string(),
            })
        );
    }

    #[test]
    fn test_endpoint_resolution() {
        let ds = two_node_dataset();
        let ep = ds.endpoint(&NodeRef::new("Hospital", "hosp1")).unwrap();
        assert_eq!(ep.key_property, "hospitalId");
        assert!(ds.endpoint(&NodeRef::new("Hospital", "nope")).is_none());
    }

    #[test]
    fn test_key_schema_dedups() {
        let mut ds = two_node_dataset();
        ds.nodes.push(NodeSpec::new("Doctor", "doctorId", "doc2"));
        assert_eq!(
            ds.key_schema(),
            vec![("Doctor", "doctorId"), ("Hospital", "hospitalId")]
        );
    }

    #[test]
    fn test_json_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "nodes": [
                    {{"label": "Alert", "key_property": "alertId", "key": "a1",
                      "properties": {{"message": "missed dose", "resolved": false}}}},
                    {{"label": "Patient", "key_property": "patientId", "key": "p1"}}
                ],
                "relationships": [
                    {{"rel_type": "FOR_PATIENT",
                      "from": {{"label": "Alert", "key": "a1"}},
                      "to": {{"label": "Patient", "key": "p1"}}}}
                ]
            }}"#
        )
        .unwrap();

        let ds = Dataset::from_json_file(file.path()).unwrap();
        assert_eq!(ds.node_count(), 2);
        assert_eq!(ds.relationship_count(), 1);
        assert_eq!(ds.nodes[0].properties["resolved"].as_bool(), Some(false));
        assert!(ds.relationships[0].properties.is_empty());
        ds.validate().unwrap();
    }

    #[test]
    fn test_malformed_fixture() {
        let err = Dataset::from_json_str("{\"nodes\": 3}").unwrap_err();
        assert!(matches!(err, OntologyError::Serialization(_)));
    }
}
