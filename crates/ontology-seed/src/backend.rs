//! The store seam the seeder writes through.
//!
//! A backend hands out sessions; a session is one scoped unit of work that the
//! seeder always closes, on success and on failure.

use async_trait::async_trait;

use ontology_core::{Dataset, Endpoint, NodeSpec, RelationshipSpec};

use crate::error::Result;

#[async_trait]
pub trait SeedBackend: Send + Sync {
    type Session: SeedSession;

    /// Acquire a session. Fails with `ConnectionUnavailable` when the store
    /// cannot be reached.
    async fn open_session(&self) -> Result<Self::Session>;
}

#[async_trait]
pub trait SeedSession: Send {
    /// Delete every node and relationship. Returns the number of nodes removed.
    async fn clear_all(&mut self) -> Result<u64>;

    /// Store-specific setup after the clear and before the first write.
    async fn prepare(&mut self, _dataset: &Dataset) -> Result<()> {
        Ok(())
    }

    async fn create_node(&mut self, node: &NodeSpec) -> Result<()>;

    /// Look up both endpoints by key and create the relationship. Fails with
    /// `MissingEndpoint` if either is absent.
    async fn create_relationship(
        &mut self,
        rel: &RelationshipSpec,
        from: Endpoint<'_>,
        to: Endpoint<'_>,
    ) -> Result<()>;

    /// Release the session.
    async fn close(&mut self);
}
