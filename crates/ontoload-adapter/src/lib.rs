//! Ontoload Adapter - SQLite ontology query backend
//!
//! Implements the [`OntologyAdapter`] capability over a precompiled ontology
//! database file. The artifact ships two tables this adapter reads:
//! - `statements`: one row per RDF statement (types, synonyms, definitions)
//! - `entailed_edge`: the precomputed transitive closure of the hierarchy
//!
//! This is a lookup layer only; no reasoning or closure computation happens
//! here.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use ontoload_core::{OntologyAdapter, OntoloadError, Result};

/// Synonym predicates that contribute to a term's aliases
const ALIAS_PREDICATES: [&str; 4] = [
    "oio:hasExactSynonym",
    "oio:hasRelatedSynonym",
    "oio:hasNarrowSynonym",
    "oio:hasBroadSynonym",
];

/// Predicate carrying a term's textual definition
const DEFINITION_PREDICATE: &str = "IAO:0000115";

/// SQLite-backed ontology adapter
pub struct SqliteAdapter {
    pool: SqlitePool,
}

impl SqliteAdapter {
    /// Open a prepared ontology database file read-only
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| OntoloadError::Adapter(format!("Failed to open {}: {e}", path.display())))?;

        debug!(path = %path.display(), "ontology database opened");
        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl OntologyAdapter for SqliteAdapter {
    async fn entities(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT subject FROM statements \
             WHERE predicate = 'rdf:type' AND object = 'owl:Class'",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OntoloadError::Adapter(format!("Entity enumeration failed: {e}")))
    }

    async fn aliases(&self, id: &str) -> Result<Vec<String>> {
        let placeholders = vec!["?"; ALIAS_PREDICATES.len()].join(", ");
        let sql = format!(
            "SELECT value FROM statements \
             WHERE subject = ? AND predicate IN ({placeholders}) AND value IS NOT NULL",
        );

        let mut query = sqlx::query_scalar::<_, String>(&sql).bind(id);
        for predicate in ALIAS_PREDICATES {
            query = query.bind(predicate);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| OntoloadError::Adapter(format!("Alias lookup failed for {id}: {e}")))
    }

    async fn definition(&self, id: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM statements \
             WHERE subject = ? AND predicate = ? AND value IS NOT NULL \
             LIMIT 1",
        )
        .bind(id)
        .bind(DEFINITION_PREDICATE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OntoloadError::Adapter(format!("Definition lookup failed for {id}: {e}")))
    }

    async fn ancestors(
        &self,
        id: &str,
        predicates: &[String],
        reflexive: bool,
    ) -> Result<Vec<String>> {
        let mut ancestors = if predicates.is_empty() {
            Vec::new()
        } else {
            let placeholders = vec!["?"; predicates.len()].join(", ");
            let sql = format!(
                "SELECT DISTINCT object FROM entailed_edge \
                 WHERE subject = ? AND predicate IN ({placeholders})",
            );

            let mut query = sqlx::query_scalar::<_, String>(&sql).bind(id);
            for predicate in predicates {
                query = query.bind(predicate);
            }

            query.fetch_all(&self.pool).await.map_err(|e| {
                OntoloadError::Adapter(format!("Ancestor query failed for {id}: {e}"))
            })?
        };

        if reflexive && !ancestors.iter().any(|a| a == id) {
            ancestors.push(id.to_string());
        }

        Ok(ancestors)
    }
}
