//! Ontology Graph: Neo4j client for seeding and verifying the ontology graph.
//!
//! All writes the seeder issues against Neo4j go through this crate: the
//! full clear, node creation, and key-matched relationship creation.

pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use queries::{GraphCounts, NodeRecord, RelationshipRecord};
