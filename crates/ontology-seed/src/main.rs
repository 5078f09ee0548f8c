//! CLI entry point: load configuration, seed the graph once, continue startup.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ontology_core::config::AppConfig;
use ontology_graph::{GraphClient, GraphConfig};

use ontology_seed::bootstrap::{resolve_dataset, run_startup};
use ontology_seed::{Neo4jBackend, SeedReport};

#[derive(Parser)]
#[command(name = "ontology-seed")]
#[command(about = "Reset a Neo4j graph and seed it with the medical ontology")]
struct Cli {
    /// Config file prefix (default: ontology).
    #[arg(short, long, default_value = "ontology")]
    config: String,

    /// JSON dataset fixture to seed instead of the built-in ontology.
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Start without seeding.
    #[arg(long)]
    skip_seed: bool,

    /// Validate the dataset and print a summary without connecting.
    #[arg(long)]
    check: bool,

    /// Read node and relationship counts back after a completed seed.
    #[arg(long)]
    verify: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(path) = &cli.fixture {
        config.seed.fixture = Some(path.to_string_lossy().into_owned());
    }
    if cli.skip_seed {
        config.seed.enabled = false;
    }

    if cli.check {
        let dataset = resolve_dataset(&config.seed)?;
        dataset.validate()?;
        let summary = serde_json::json!({
            "valid": true,
            "nodes": dataset.node_count(),
            "relationships": dataset.relationship_count(),
            "labels": dataset.key_schema().iter().map(|(l, _)| *l).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let backend = Neo4jBackend::new(GraphConfig::from(config.neo4j.clone()))
        .with_constraints(config.seed.create_constraints);

    let summary = run_startup(&config.seed, &backend).await;

    if cli.verify {
        if let (Some(report), Some(client)) = (summary.report(), backend.client()) {
            verify(client, report).await?;
        }
    }

    tracing::info!(seeded = summary.seeded(), "Startup sequence complete");
    Ok(())
}

/// Read counts back and compare them with what the seed run wrote.
async fn verify(client: &GraphClient, report: &SeedReport) -> anyhow::Result<()> {
    let counts = match client.counts().await {
        Ok(counts) => counts,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read back graph counts");
            return Ok(());
        }
    };

    let matches = counts.matches(report.nodes_created, report.relationships_created);

    if matches {
        tracing::info!(
            nodes = counts.nodes,
            relationships = counts.relationships,
            "Graph verified"
        );
    } else {
        tracing::warn!(
            nodes = counts.nodes,
            relationships = counts.relationships,
            expected_nodes = report.nodes_created,
            expected_relationships = report.relationships_created,
            "Graph does not match the seeded dataset"
        );
    }

    let summary = serde_json::json!({
        "report": report,
        "graph": {
            "nodes": counts.nodes,
            "relationships": counts.relationships,
        },
        "matches": matches,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
