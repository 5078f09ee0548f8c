//! Error types for the ontology-seed crate.

use ontology_core::DatasetError;
use ontology_graph::GraphError;
use thiserror::Error;

/// Why a seed run did not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("Graph store unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("Write conflict: {0}")]
    WriteConflict(String),

    #[error("Relationship {rel_type} has a missing endpoint ({from} -> {to})")]
    MissingEndpoint {
        rel_type: String,
        from: String,
        to: String,
    },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(#[from] DatasetError),

    #[error("Graph store error: {0}")]
    Unknown(String),
}

impl From<GraphError> for SeedError {
    fn from(e: GraphError) -> Self {
        match e {
            GraphError::Connection(msg) => SeedError::ConnectionUnavailable(msg),
            GraphError::Conflict(msg) => SeedError::WriteConflict(msg),
            GraphError::MissingEndpoint { rel_type, from, to } => {
                SeedError::MissingEndpoint { rel_type, from, to }
            }
            GraphError::InvalidIdentifier { kind, name } => {
                SeedError::InvalidDataset(DatasetError::InvalidIdentifier { kind, name })
            }
            other => SeedError::Unknown(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_mapping() {
        assert_eq!(
            SeedError::from(GraphError::Connection("refused".into())),
            SeedError::ConnectionUnavailable("refused".into())
        );
        assert_eq!(
            SeedError::from(GraphError::Conflict("dup".into())),
            SeedError::WriteConflict("dup".into())
        );
        assert!(matches!(
            SeedError::from(GraphError::MissingEndpoint {
                rel_type: "LEADS_TO".into(),
                from: "Diagnosis:diag1".into(),
                to: "Treatment:treat1".into(),
            }),
            SeedError::MissingEndpoint { .. }
        ));
        assert_eq!(
            SeedError::from(GraphError::InvalidIdentifier {
                kind: "label",
                name: "Doctor)".into(),
            }),
            SeedError::InvalidDataset(DatasetError::InvalidIdentifier {
                kind: "label",
                name: "Doctor)".into(),
            })
        );
        assert!(matches!(
            SeedError::from(GraphError::Serialization("bad row".into())),
            SeedError::Unknown(_)
        ));
    }
}
