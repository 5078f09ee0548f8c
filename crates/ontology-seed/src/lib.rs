//! ontology-seed: Resets a property graph and seeds it with a fixed dataset.
//!
//! Clears every node and relationship, then writes the dataset's nodes and
//! key-matched relationships in order. Failures come back as an explicit
//! `SeedOutcome` instead of stopping the host.

pub mod backend;
pub mod bootstrap;
pub mod error;
pub mod memory;
pub mod neo4j;
pub mod seeder;

pub use backend::{SeedBackend, SeedSession};
pub use error::SeedError;
pub use memory::MemoryBackend;
pub use neo4j::Neo4jBackend;
pub use seeder::{GraphSeeder, SeedOutcome, SeedProgress, SeedReport};
