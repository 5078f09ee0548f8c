//! Startup wiring: pick the dataset, run the seeder once, carry on.
//!
//! Seeding is never a startup precondition. `run_startup` always returns, and
//! the host continues whatever the outcome, including an unreadable fixture.

use ontology_core::config::SeedSettings;
use ontology_core::{medical, Dataset, OntologyError};

use crate::backend::SeedBackend;
use crate::seeder::{GraphSeeder, SeedOutcome, SeedReport};

/// What startup did about seeding.
#[derive(Debug, Clone)]
pub enum StartupSeed {
    /// Seeding is turned off in configuration.
    Disabled,
    /// The configured fixture could not be loaded; the store was not touched.
    DatasetUnavailable(String),
    /// The seeder ran.
    Ran(SeedOutcome),
}

/// What happened during startup.
#[derive(Debug, Clone)]
pub struct StartupSummary {
    pub seed: StartupSeed,
}

impl StartupSummary {
    pub fn outcome(&self) -> Option<&SeedOutcome> {
        match &self.seed {
            StartupSeed::Ran(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The report of a completed seed.
    pub fn report(&self) -> Option<&SeedReport> {
        self.outcome().and_then(SeedOutcome::report)
    }

    pub fn seeded(&self) -> bool {
        self.report().is_some()
    }
}

/// The configured fixture, or the built-in medical ontology.
pub fn resolve_dataset(settings: &SeedSettings) -> Result<Dataset, OntologyError> {
    match &settings.fixture {
        Some(path) => {
            let dataset = Dataset::from_json_file(path)?;
            tracing::info!(
                fixture = %path,
                nodes = dataset.node_count(),
                relationships = dataset.relationship_count(),
                "Using dataset fixture"
            );
            Ok(dataset)
        }
        None => Ok(medical::dataset()),
    }
}

/// Resolve the dataset and run the seeder once, if enabled. Never fails.
pub async fn run_startup<B: SeedBackend>(settings: &SeedSettings, backend: &B) -> StartupSummary {
    if !settings.enabled {
        tracing::info!("Startup seeding disabled");
        return StartupSummary {
            seed: StartupSeed::Disabled,
        };
    }

    let dataset = match resolve_dataset(settings) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::warn!(
                fixture = ?settings.fixture,
                error = %e,
                "Could not load dataset; skipping seed"
            );
            return StartupSummary {
                seed: StartupSeed::DatasetUnavailable(e.to_string()),
            };
        }
    };

    let outcome = GraphSeeder::new(dataset).seed(backend).await;
    StartupSummary {
        seed: StartupSeed::Ran(outcome),
    }
}
