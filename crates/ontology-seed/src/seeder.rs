//! The seeding sequence: validate, clear, create nodes, create relationships.
//!
//! Seeding is best-effort. Any failure is logged and returned as
//! `SeedOutcome::Incomplete`; nothing is rolled back, so a failure partway
//! through leaves whatever writes already landed.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use ontology_core::{medical, Dataset};

use crate::backend::{SeedBackend, SeedSession};
use crate::error::{Result, SeedError};

/// How far a run got before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedProgress {
    pub cleared: bool,
    pub nodes_created: usize,
    pub relationships_created: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub nodes_created: usize,
    pub relationships_created: usize,
}

/// Result of a seed run, returned instead of raised.
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Completed(SeedReport),
    Incomplete {
        run_id: Uuid,
        error: SeedError,
        progress: SeedProgress,
    },
}

impl SeedOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SeedOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&SeedReport> {
        match self {
            SeedOutcome::Completed(r) => Some(r),
            SeedOutcome::Incomplete { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SeedError> {
        match self {
            SeedOutcome::Completed(_) => None,
            SeedOutcome::Incomplete { error, .. } => Some(error),
        }
    }

    pub fn progress(&self) -> SeedProgress {
        match self {
            SeedOutcome::Completed(r) => SeedProgress {
                cleared: true,
                nodes_created: r.nodes_created,
                relationships_created: r.relationships_created,
            },
            SeedOutcome::Incomplete { progress, .. } => *progress,
        }
    }

    pub fn into_result(self) -> std::result::Result<SeedReport, SeedError> {
        match self {
            SeedOutcome::Completed(r) => Ok(r),
            SeedOutcome::Incomplete { error, .. } => Err(error),
        }
    }
}

/// Wipes a graph and writes a fixed dataset into it.
#[derive(Debug, Clone)]
pub struct GraphSeeder {
    dataset: Dataset,
}

impl GraphSeeder {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Seeder for the built-in medical ontology.
    pub fn medical() -> Self {
        Self::new(medical::dataset())
    }

    /// Run the full sequence against `backend`. Never fails; inspect the
    /// returned outcome.
    pub async fn seed<B: SeedBackend>(&self, backend: &B) -> SeedOutcome {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let timer = Instant::now();
        let mut progress = SeedProgress::default();

        tracing::info!(
            %run_id,
            nodes = self.dataset.node_count(),
            relationships = self.dataset.relationship_count(),
            "Starting ontology seed"
        );

        match self.try_seed(backend, &mut progress).await {
            Ok(()) => {
                let report = SeedReport {
                    run_id,
                    started_at,
                    duration_ms: timer.elapsed().as_millis() as u64,
                    nodes_created: progress.nodes_created,
                    relationships_created: progress.relationships_created,
                };
                tracing::info!(
                    %run_id,
                    nodes = report.nodes_created,
                    relationships = report.relationships_created,
                    duration_ms = report.duration_ms,
                    "Ontology seed complete"
                );
                SeedOutcome::Completed(report)
            }
            Err(error) => {
                tracing::warn!(
                    %run_id,
                    error = %error,
                    "Could not seed the graph; continuing without it"
                );
                tracing::debug!(
                    %run_id,
                    error = ?error,
                    cleared = progress.cleared,
                    nodes_created = progress.nodes_created,
                    relationships_created = progress.relationships_created,
                    "Seed failure detail"
                );
                SeedOutcome::Incomplete {
                    run_id,
                    error,
                    progress,
                }
            }
        }
    }

    async fn try_seed<B: SeedBackend>(
        &self,
        backend: &B,
        progress: &mut SeedProgress,
    ) -> Result<()> {
        // Before the clear: an invalid dataset leaves the graph untouched.
        self.dataset.validate()?;

        let mut session = backend.open_session().await?;
        let result = self.write_all(&mut session, progress).await;
        session.close().await;
        result
    }

    async fn write_all<S: SeedSession>(
        &self,
        session: &mut S,
        progress: &mut SeedProgress,
    ) -> Result<()> {
        let removed = session.clear_all().await?;
        progress.cleared = true;
        tracing::info!(removed, "Deleted all existing nodes");

        session.prepare(&self.dataset).await?;

        for node in &self.dataset.nodes {
            session.create_node(node).await?;
            progress.nodes_created += 1;
            tracing::info!(label = %node.label, key = %node.key, "Created node");
        }

        for rel in &self.dataset.relationships {
            let (Some(from), Some(to)) = (
                self.dataset.endpoint(&rel.from),
                self.dataset.endpoint(&rel.to),
            ) else {
                return Err(SeedError::MissingEndpoint {
                    rel_type: rel.rel_type.clone(),
                    from: rel.from.to_string(),
                    to: rel.to.to_string(),
                });
            };

            session.create_relationship(rel, from, to).await?;
            progress.relationships_created += 1;
            tracing::debug!(
                rel_type = %rel.rel_type,
                from = %rel.from,
                to = %rel.to,
                "Created relationship"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Fault, MemoryBackend};

    #[tokio::test]
    async fn test_outcome_accessors() {
        let backend = MemoryBackend::new();
        let outcome = GraphSeeder::medical().seed(&backend).await;

        assert!(outcome.is_completed());
        assert!(outcome.error().is_none());
        let progress = outcome.progress();
        assert!(progress.cleared);
        assert_eq!(progress.nodes_created, 9);
        assert_eq!(progress.relationships_created, 20);

        let report = outcome.into_result().unwrap();
        assert_eq!(report.nodes_created, 9);
    }

    #[tokio::test]
    async fn test_clear_failure_reports_nothing_done() {
        let backend = MemoryBackend::new();
        backend.inject_fault(Fault::Clear).await;
        let outcome = GraphSeeder::medical().seed(&backend).await;

        assert!(outcome.report().is_none());
        assert_eq!(outcome.progress(), SeedProgress::default());
        assert!(matches!(outcome.into_result(), Err(SeedError::Unknown(_))));
    }

    #[tokio::test]
    async fn test_empty_dataset_only_clears() {
        let backend = MemoryBackend::new();
        backend
            .insert_node(&ontology_core::NodeSpec::new("Old", "oldId", "o1"))
            .await;

        let outcome = GraphSeeder::new(Dataset::default()).seed(&backend).await;

        assert!(outcome.is_completed());
        assert_eq!(backend.node_count().await, 0);
    }

    #[tokio::test]
    async fn test_report_serializes_for_output() {
        let backend = MemoryBackend::new();
        let report = GraphSeeder::medical()
            .seed(&backend)
            .await
            .into_result()
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["run_id"], report.run_id.to_string());
        assert_eq!(json["nodes_created"], 9);
        assert_eq!(json["relationships_created"], 20);
        assert!(json["started_at"].is_string());
    }
}
