//! Write operations for seeding the graph.
//!
//! Plain CREATE semantics: nothing here merges or upserts. Callers clear the
//! graph first if they want a reproducible result. Labels, relationship types
//! and key property names are interpolated into Cypher and are checked as
//! identifiers first; values always go through parameters.

use neo4rs::{query, BoltMap, BoltType};

use ontology_core::{Endpoint, NodeSpec, Properties, PropertyValue, RelationshipSpec};

use crate::client::{identifier, GraphClient, GraphError};

impl GraphClient {
    // ── Reset ────────────────────────────────────────────────────

    /// Delete every node and relationship. Returns the number of nodes removed.
    pub async fn clear_all(&self) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (n)
             DETACH DELETE n
             RETURN count(n) AS cnt",
        );

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Ensure a uniqueness constraint on `(label, key_property)`.
    pub async fn ensure_key_constraint(
        &self,
        label: &str,
        key_property: &str,
    ) -> Result<(), GraphError> {
        let label = identifier("label", label)?;
        let key_property = identifier("key property", key_property)?;
        let name = format!("{}_{}_unique", label.to_lowercase(), key_property.to_lowercase());
        let cypher = format!(
            "CREATE CONSTRAINT {name} IF NOT EXISTS
             FOR (n:{label}) REQUIRE n.{key_property} IS UNIQUE"
        );

        self.run(query(&cypher)).await?;
        tracing::debug!(label, key_property, "Key constraint ensured");
        Ok(())
    }

    // ── Node Creation ────────────────────────────────────────────

    /// Create one node with its key and attributes.
    pub async fn create_node(&self, node: &NodeSpec) -> Result<(), GraphError> {
        let label = identifier("label", &node.label)?;
        let cypher = format!("CREATE (n:{label} $props)");

        let q = query(&cypher).param("props", to_bolt_map(&node.stored_properties()));

        self.run(q).await
    }

    // ── Relationship Creation ────────────────────────────────────

    /// Match both endpoints by key and create a relationship between them.
    ///
    /// Fails with `MissingEndpoint` when either endpoint is absent, since the
    /// MATCH then yields no rows and nothing is created.
    pub async fn create_relationship(
        &self,
        rel: &RelationshipSpec,
        from: Endpoint<'_>,
        to: Endpoint<'_>,
    ) -> Result<(), GraphError> {
        let rel_type = identifier("relationship type", &rel.rel_type)?;
        let from_label = identifier("label", from.label)?;
        let from_prop = identifier("key property", from.key_property)?;
        let to_label = identifier("label", to.label)?;
        let to_prop = identifier("key property", to.key_property)?;
        let cypher = format!(
            "MATCH (a:{from_label} {{{from_prop}: $from_key}}), (b:{to_label} {{{to_prop}: $to_key}})
             CREATE (a)-[r:{rel_type} $props]->(b)
             RETURN count(r) AS created"
        );

        let q = query(&cypher)
            .param("from_key", from.key.to_string())
            .param("to_key", to.key.to_string())
            .param("props", to_bolt_map(&rel.properties));

        let created = match self.query_one(q).await? {
            Some(row) => row.get::<i64>("created").unwrap_or(0),
            None => 0,
        };

        if created == 0 {
            return Err(GraphError::MissingEndpoint {
                rel_type: rel_type.to_string(),
                from: rel.from.to_string(),
                to: rel.to.to_string(),
            });
        }
        Ok(())
    }
}

// ── Helpers ──────────────────────────────────────────────────────

fn to_bolt(value: &PropertyValue) -> BoltType {
    match value {
        PropertyValue::Bool(b) => (*b).into(),
        PropertyValue::Integer(i) => (*i).into(),
        PropertyValue::Float(f) => (*f).into(),
        PropertyValue::String(s) => s.clone().into(),
    }
}

fn to_bolt_map(props: &Properties) -> BoltType {
    let mut map = BoltMap::with_capacity(props.len());
    for (k, v) in props {
        map.put(k.as_str().into(), to_bolt(v));
    }
    BoltType::Map(map)
}
