//! Neo4j connection management and shared graph client.

use neo4rs::{query, ConfigBuilder, Graph, Query};

use ontology_core::config::Neo4jSettings;
use ontology_core::dataset::is_identifier;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("No {label} with {key_property} = {key}")]
    NotFound {
        label: String,
        key_property: String,
        key: String,
    },

    #[error("Cannot create {rel_type}: endpoint {from} or {to} not found")]
    MissingEndpoint {
        rel_type: String,
        from: String,
        to: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{kind} {name:?} is not a valid Cypher identifier")]
    InvalidIdentifier { kind: &'static str, name: String },
}

impl GraphError {
    /// Classify a driver error. Neo4j reports uniqueness violations as
    /// `Neo.ClientError.Schema.ConstraintValidationFailed`.
    fn from_driver(e: neo4rs::Error) -> Self {
        let msg = e.to_string();
        if msg.contains("ConstraintValidationFailed") || msg.contains("already exists with label")
        {
            GraphError::Conflict(msg)
        } else {
            GraphError::Query(e)
        }
    }
}

/// Reject anything that cannot be interpolated into Cypher as a label,
/// relationship type or property name.
pub(crate) fn identifier<'a>(kind: &'static str, name: &'a str) -> Result<&'a str, GraphError> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(GraphError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jSettings::default().into()
    }
}

impl From<Neo4jSettings> for GraphConfig {
    fn from(s: Neo4jSettings) -> Self {
        Self {
            uri: s.uri,
            user: s.user,
            password: s.password,
            max_connections: s.max_connections,
            fetch_size: s.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    ///
    /// The pool connects lazily, so a round trip is made before returning to
    /// surface an unreachable server or bad credentials here.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let client = Self { graph };
        client.ping().await?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(client)
    }

    /// Round-trip a trivial statement.
    pub async fn ping(&self) -> Result<(), GraphError> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await.map_err(GraphError::from_driver)
    }

    /// Execute a query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self
            .graph
            .execute(query)
            .await
            .map_err(GraphError::from_driver)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self
            .graph
            .execute(query)
            .await
            .map_err(GraphError::from_driver)?;
        stream.next().await.map_err(GraphError::from_driver)
    }
}
