//! Neo4j seed backend on top of `GraphClient`.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use ontology_core::{Dataset, Endpoint, NodeSpec, RelationshipSpec};
use ontology_graph::{GraphClient, GraphConfig};

use crate::backend::{SeedBackend, SeedSession};
use crate::error::{Result, SeedError};

/// Seeds a Neo4j database.
///
/// Connects on the first `open_session`, so an unreachable server surfaces as
/// `ConnectionUnavailable` inside the seed run rather than before it.
pub struct Neo4jBackend {
    config: GraphConfig,
    client: OnceCell<GraphClient>,
    create_constraints: bool,
}

impl Neo4jBackend {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
            create_constraints: false,
        }
    }

    /// Wrap an already-connected client.
    pub fn from_client(client: GraphClient) -> Self {
        Self {
            config: GraphConfig::default(),
            client: OnceCell::new_with(Some(client)),
            create_constraints: false,
        }
    }

    /// Ensure one uniqueness constraint per `(label, key property)` before
    /// writing nodes.
    pub fn with_constraints(mut self, enabled: bool) -> Self {
        self.create_constraints = enabled;
        self
    }

    /// The connected client, once a session has been opened.
    pub fn client(&self) -> Option<&GraphClient> {
        self.client.get()
    }
}

#[async_trait]
impl SeedBackend for Neo4jBackend {
    type Session = Neo4jSession;

    async fn open_session(&self) -> Result<Neo4jSession> {
        let client = self
            .client
            .get_or_try_init(|| GraphClient::connect(&self.config))
            .await
            .map_err(|e| SeedError::ConnectionUnavailable(e.to_string()))?;

        Ok(Neo4jSession {
            client: client.clone(),
            create_constraints: self.create_constraints,
        })
    }
}

pub struct Neo4jSession {
    client: GraphClient,
    create_constraints: bool,
}

#[async_trait]
impl SeedSession for Neo4jSession {
    async fn clear_all(&mut self) -> Result<u64> {
        let removed = self.client.clear_all().await?;
        Ok(removed.max(0) as u64)
    }

    async fn prepare(&mut self, dataset: &Dataset) -> Result<()> {
        if !self.create_constraints {
            return Ok(());
        }
        for (label, key_property) in dataset.key_schema() {
            self.client.ensure_key_constraint(label, key_property).await?;
        }
        Ok(())
    }

    async fn create_node(&mut self, node: &NodeSpec) -> Result<()> {
        Ok(self.client.create_node(node).await?)
    }

    async fn create_relationship(
        &mut self,
        rel: &RelationshipSpec,
        from: Endpoint<'_>,
        to: Endpoint<'_>,
    ) -> Result<()> {
        Ok(self.client.create_relationship(rel, from, to).await?)
    }

    async fn close(&mut self) {
        // Connections go back to the pool when the client clone drops.
        tracing::debug!("Neo4j seed session closed");
    }
}
