//! ontology-core: Dataset model, fixtures, and configuration for the ontology seeder.
//!
//! This crate provides the store-independent pieces:
//! - Node and relationship records (`NodeSpec`, `RelationshipSpec`)
//! - The `Dataset` table with validation and JSON fixture loading
//! - The typed medical ontology and its fixed demo dataset
//! - Configuration management
//! - Common error types

pub mod config;
pub mod dataset;
pub mod error;
pub mod medical;
pub mod types;

pub use dataset::Dataset;
pub use error::{DatasetError, OntologyError};
pub use types::{Endpoint, NodeRef, NodeSpec, PropertyValue, Properties, RelationshipSpec, ToNodeSpec};
