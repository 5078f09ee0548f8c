use thiserror::Error;

/// Top-level error type for the ontology core crate.
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Fixture parse error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structural problems found in a dataset before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("{kind} {name:?} is not a valid Cypher identifier")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("Duplicate node key: {label} {key}")]
    DuplicateKey { label: String, key: String },

    #[error("Node {label} {key} redefines its key property {key_property}")]
    KeyPropertyOverride {
        label: String,
        key: String,
        key_property: String,
    },

    #[error("Node {label} {key} carries {key_property} = {value}, the key of another {label} node")]
    ShadowedKey {
        label: String,
        key: String,
        key_property: String,
        value: String,
    },

    #[error("Relationship {rel_type} references unknown node {label} {key}")]
    UnknownEndpoint {
        rel_type: String,
        label: String,
        key: String,
    },
}

pub type Result<T> = std::result::Result<T, OntologyError>;
