//! In-memory property graph backend.
//!
//! Behaves like the Neo4j backend for everything the seeder does, and can
//! simulate an unreachable store or a write fault at a chosen point.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ontology_core::{Endpoint, NodeSpec, Properties, PropertyValue, RelationshipSpec};

use crate::backend::{SeedBackend, SeedSession};
use crate::error::{Result, SeedError};

/// A node as stored: label plus all attributes, key included.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNode {
    pub label: String,
    pub properties: Properties,
}

/// A relationship as stored; endpoints are indexes into `MemoryGraph::nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRelationship {
    pub rel_type: String,
    pub from: usize,
    pub to: usize,
    pub properties: Properties,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGraph {
    pub nodes: Vec<StoredNode>,
    pub relationships: Vec<StoredRelationship>,
}

impl MemoryGraph {
    /// Indexes of every node matching the endpoint, like a Cypher MATCH.
    fn matches(&self, ep: Endpoint<'_>) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                n.label == ep.label
                    && n.properties
                        .get(ep.key_property)
                        .and_then(PropertyValue::as_str)
                        == Some(ep.key)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

/// A simulated store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every `open_session` fails.
    Unavailable,
    /// The clear step fails.
    Clear,
    /// Node writes fail once `after` nodes have been written in the session.
    Node { after: usize },
    /// Relationship writes fail once `after` relationships have been written
    /// in the session.
    Relationship { after: usize },
}

#[derive(Debug, Default)]
struct MemoryState {
    graph: MemoryGraph,
    fault: Option<Fault>,
    open_sessions: usize,
    sessions_opened: usize,
}

/// Shared handle to an in-memory graph. Clones see the same graph.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    unique_keys: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a node whose `(label, key property, key)` already exists, like a
    /// uniqueness constraint would.
    pub fn with_unique_keys(mut self) -> Self {
        self.unique_keys = true;
        self
    }

    pub async fn inject_fault(&self, fault: Fault) {
        self.state.lock().await.fault = Some(fault);
    }

    pub async fn clear_fault(&self) {
        self.state.lock().await.fault = None;
    }

    /// Insert a node directly, bypassing sessions and faults.
    pub async fn insert_node(&self, node: &NodeSpec) {
        self.state.lock().await.graph.nodes.push(StoredNode {
            label: node.label.clone(),
            properties: node.stored_properties(),
        });
    }

    pub async fn node_count(&self) -> usize {
        self.state.lock().await.graph.nodes.len()
    }

    pub async fn relationship_count(&self) -> usize {
        self.state.lock().await.graph.relationships.len()
    }

    /// Values of `key_property` on nodes with `label`, sorted.
    pub async fn node_keys(&self, label: &str, key_property: &str) -> Vec<String> {
        let state = self.state.lock().await;
        let mut keys: Vec<String> = state
            .graph
            .nodes
            .iter()
            .filter(|n| n.label == label)
            .filter_map(|n| n.properties.get(key_property)?.as_str().map(str::to_string))
            .collect();
        keys.sort();
        keys
    }

    /// `(from label, type, to label)` for every relationship, sorted.
    pub async fn relationship_triples(&self) -> Vec<(String, String, String)> {
        let state = self.state.lock().await;
        let graph = &state.graph;
        let mut triples: Vec<_> = graph
            .relationships
            .iter()
            .map(|r| {
                (
                    graph.nodes[r.from].label.clone(),
                    r.rel_type.clone(),
                    graph.nodes[r.to].label.clone(),
                )
            })
            .collect();
        triples.sort();
        triples
    }

    pub async fn snapshot(&self) -> MemoryGraph {
        self.state.lock().await.graph.clone()
    }

    /// Sessions currently open.
    pub async fn open_sessions(&self) -> usize {
        self.state.lock().await.open_sessions
    }

    /// Sessions opened over the backend's lifetime.
    pub async fn sessions_opened(&self) -> usize {
        self.state.lock().await.sessions_opened
    }
}

#[async_trait]
impl SeedBackend for MemoryBackend {
    type Session = MemorySession;

    async fn open_session(&self) -> Result<MemorySession> {
        let mut state = self.state.lock().await;
        if state.fault == Some(Fault::Unavailable) {
            return Err(SeedError::ConnectionUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        state.open_sessions += 1;
        state.sessions_opened += 1;

        Ok(MemorySession {
            state: Arc::clone(&self.state),
            unique_keys: self.unique_keys,
            nodes_written: 0,
            relationships_written: 0,
            closed: false,
        })
    }
}

pub struct MemorySession {
    state: Arc<Mutex<MemoryState>>,
    unique_keys: bool,
    nodes_written: usize,
    relationships_written: usize,
    closed: bool,
}

fn injected(step: &str) -> SeedError {
    SeedError::Unknown(format!("injected fault during {step}"))
}

#[async_trait]
impl SeedSession for MemorySession {
    async fn clear_all(&mut self) -> Result<u64> {
        let mut state = self.state.lock().await;
        if state.fault == Some(Fault::Clear) {
            return Err(injected("clear"));
        }
        let removed = state.graph.nodes.len() as u64;
        state.graph = MemoryGraph::default();
        Ok(removed)
    }

    async fn create_node(&mut self, node: &NodeSpec) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(Fault::Node { after }) = state.fault {
            if self.nodes_written >= after {
                return Err(injected("node creation"));
            }
        }

        let ep = Endpoint {
            label: &node.label,
            key_property: &node.key_property,
            key: &node.key,
        };
        if self.unique_keys && !state.graph.matches(ep).is_empty() {
            return Err(SeedError::WriteConflict(format!(
                "{} with {} = {} already exists",
                node.label, node.key_property, node.key
            )));
        }

        state.graph.nodes.push(StoredNode {
            label: node.label.clone(),
            properties: node.stored_properties(),
        });
        self.nodes_written += 1;
        Ok(())
    }

    async fn create_relationship(
        &mut self,
        rel: &RelationshipSpec,
        from: Endpoint<'_>,
        to: Endpoint<'_>,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(Fault::Relationship { after }) = state.fault {
            if self.relationships_written >= after {
                return Err(injected("relationship creation"));
            }
        }

        // One relationship per matched pair, as MATCH ... CREATE does.
        let sources = state.graph.matches(from);
        let targets = state.graph.matches(to);
        if sources.is_empty() || targets.is_empty() {
            return Err(SeedError::MissingEndpoint {
                rel_type: rel.rel_type.clone(),
                from: rel.from.to_string(),
                to: rel.to.to_string(),
            });
        }

        for &from_idx in &sources {
            for &to_idx in &targets {
                state.graph.relationships.push(StoredRelationship {
                    rel_type: rel.rel_type.clone(),
                    from: from_idx,
                    to: to_idx,
                    properties: rel.properties.clone(),
                });
            }
        }
        self.relationships_written += 1;
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = self.state.lock().await;
        state.open_sessions = state.open_sessions.saturating_sub(1);
    }
}
