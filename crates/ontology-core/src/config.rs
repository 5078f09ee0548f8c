//! Configuration management for the ontology seeder.
//!
//! Configuration is loaded from (in priority order):
//! 1. `NEO4J_URI` / `NEO4J_USER` / `NEO4J_PASSWORD` (a `.env` file is read first)
//! 2. Environment variables (ONTOLOGY__ prefix, `__` separator)
//! 3. Config file (ontology.toml)
//! 4. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub seed: SeedSettings,
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Startup seeding behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    /// Run the seeder at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JSON fixture to seed instead of the built-in medical ontology.
    #[serde(default)]
    pub fixture: Option<String>,

    /// Ensure a uniqueness constraint per (label, key property) before writing.
    #[serde(default)]
    pub create_constraints: bool,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_true() -> bool {
    true
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fixture: None,
            create_constraints: false,
        }
    }
}

impl AppConfig {
    /// Load configuration using `file_prefix` as the config file name
    /// (without extension). A missing file is not an error.
    pub fn load(file_prefix: &str) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }

        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("ONTOLOGY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("neo4j.uri", std::env::var("NEO4J_URI").ok())?
            .set_override_option("neo4j.user", std::env::var("NEO4J_USER").ok())?
            .set_override_option("neo4j.password", std::env::var("NEO4J_PASSWORD").ok())?
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
