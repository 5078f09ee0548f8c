//! Read-back queries for verifying a seeded graph.

use neo4rs::query;

use ontology_core::{Properties, PropertyValue};

use crate::client::{identifier, GraphClient, GraphError};

/// A node read back from the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub label: String,
    pub properties: Properties,
}

/// A relationship read back as `(from label, type, to label)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RelationshipRecord {
    pub from_label: String,
    pub rel_type: String,
    pub to_label: String,
}

/// Node and relationship totals for the whole graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: i64,
    pub relationships: i64,
}

impl GraphCounts {
    /// Whether the graph holds exactly `nodes` nodes and `relationships`
    /// relationships.
    pub fn matches(&self, nodes: usize, relationships: usize) -> bool {
        usize::try_from(self.nodes) == Ok(nodes)
            && usize::try_from(self.relationships) == Ok(relationships)
    }
}

impl GraphClient {
    // ── Counts ───────────────────────────────────────────────────

    /// Count nodes, optionally restricted to one label.
    pub async fn count_nodes(&self, label: Option<&str>) -> Result<i64, GraphError> {
        let cypher = match label {
            Some(label) => {
                let label = identifier("label", label)?;
                format!("MATCH (n:{label}) RETURN count(n) AS cnt")
            }
            None => "MATCH (n) RETURN count(n) AS cnt".to_string(),
        };

        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count relationships, optionally restricted to one type.
    pub async fn count_relationships(&self, rel_type: Option<&str>) -> Result<i64, GraphError> {
        let cypher = match rel_type {
            Some(rel_type) => {
                let rel_type = identifier("relationship type", rel_type)?;
                format!("MATCH ()-[r:{rel_type}]->() RETURN count(r) AS cnt")
            }
            None => "MATCH ()-[r]->() RETURN count(r) AS cnt".to_string(),
        };

        match self.query_one(query(&cypher)).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Total node and relationship counts.
    pub async fn counts(&self) -> Result<GraphCounts, GraphError> {
        Ok(GraphCounts {
            nodes: self.count_nodes(None).await?,
            relationships: self.count_relationships(None).await?,
        })
    }

    // ── Lookups ──────────────────────────────────────────────────

    /// All values of `key_property` on nodes with `label`, sorted.
    pub async fn node_keys(&self, label: &str, key_property: &str) -> Result<Vec<String>, GraphError> {
        let label = identifier("label", label)?;
        let key_property = identifier("key property", key_property)?;
        let cypher = format!(
            "MATCH (n:{label})
             RETURN n.{key_property} AS key
             ORDER BY key"
        );

        let rows = self.query_rows(query(&cypher)).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.get::<String>("key").ok())
            .collect())
    }

    /// Get a node by label and key.
    pub async fn get_node(
        &self,
        label: &str,
        key_property: &str,
        key: &str,
    ) -> Result<NodeRecord, GraphError> {
        let label = identifier("label", label)?;
        let key_property = identifier("key property", key_property)?;
        let cypher = format!(
            "MATCH (n:{label} {{{key_property}: $key}})
             RETURN n LIMIT 1"
        );

        let q = query(&cypher).param("key", key.to_string());

        match self.query_one(q).await? {
            Some(row) => {
                let node: neo4rs::Node = row.get("n").map_err(|e| {
                    GraphError::Serialization(format!("Failed to deserialize node: {e}"))
                })?;
                Ok(neo4j_node_to_record(&node, label))
            }
            None => Err(GraphError::NotFound {
                label: label.to_string(),
                key_property: key_property.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Every relationship as `(from label, type, to label)`, sorted.
    pub async fn list_relationships(&self) -> Result<Vec<RelationshipRecord>, GraphError> {
        let q = query(
            "MATCH (a)-[r]->(b)
             RETURN head(labels(a)) AS from_label, type(r) AS rel_type, head(labels(b)) AS to_label",
        );

        let rows = self.query_rows(q).await?;
        let mut results: Vec<RelationshipRecord> = rows
            .into_iter()
            .map(|row| RelationshipRecord {
                from_label: row.get("from_label").unwrap_or_default(),
                rel_type: row.get("rel_type").unwrap_or_default(),
                to_label: row.get("to_label").unwrap_or_default(),
            })
            .collect();
        results.sort();
        Ok(results)
    }
}

/// Convert a neo4rs::Node to our lightweight NodeRecord.
fn neo4j_node_to_record(node: &neo4rs::Node, label: &str) -> NodeRecord {
    let mut properties = Properties::new();
    for key in node.keys() {
        let value = if let Ok(s) = node.get::<String>(key) {
            PropertyValue::String(s)
        } else if let Ok(b) = node.get::<bool>(key) {
            PropertyValue::Bool(b)
        } else if let Ok(i) = node.get::<i64>(key) {
            PropertyValue::Integer(i)
        } else if let Ok(f) = node.get::<f64>(key) {
            PropertyValue::Float(f)
        } else {
            continue;
        };
        properties.insert(key.to_string(), value);
    }

    NodeRecord {
        label: label.to_string(),
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_expected() {
        let counts = GraphCounts {
            nodes: 9,
            relationships: 20,
        };
        assert!(counts.matches(9, 20));
        assert!(!counts.matches(9, 19));
        assert!(!counts.matches(10, 20));
        assert!(!GraphCounts {
            nodes: -1,
            relationships: 0
        }
        .matches(0, 0));
    }
}
