//! SurrealDB implementation of the document store capability
//!
//! Provides connection management, destructive collection recreation with
//! schema enforcement, and bulk insertion.

use async_trait::async_trait;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use surrealdb::{Connection, Surreal};

use ontoload_core::{
    CollectionSchema, DocumentStore, FieldKind, OntoloadError, Result, StoreConfig,
};

/// SurrealDB document store, generic over the connection engine so tests can
/// run against the embedded in-memory engine
pub struct SurrealStore<C: Connection> {
    client: Surreal<C>,
}

impl SurrealStore<Client> {
    /// Connect to a remote SurrealDB over WebSocket
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        // Remove ws:// or wss:// prefix if present (surrealdb crate adds it automatically)
        let url = config
            .url
            .strip_prefix("ws://")
            .or_else(|| config.url.strip_prefix("wss://"))
            .unwrap_or(&config.url);

        let client = Surreal::new::<Ws>(url)
            .await
            .map_err(|e| OntoloadError::Store(format!("SurrealDB connection failed: {e}")))?;

        client
            .signin(Root {
                username: &config.user,
                password: &config.pass,
            })
            .await
            .map_err(|e| OntoloadError::Store(format!("SurrealDB auth failed: {e}")))?;

        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| OntoloadError::Store(format!("SurrealDB namespace error: {e}")))?;

        Ok(Self { client })
    }
}

impl<C: Connection> SurrealStore<C> {
    /// Create from an existing client (namespace and database already selected)
    pub fn from_client(client: Surreal<C>) -> Self {
        Self { client }
    }
}

fn field_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "string",
        FieldKind::StringArray => "array<string>",
    }
}

#[async_trait]
impl<C: Connection> DocumentStore for SurrealStore<C> {
    async fn recreate_collection(&self, name: &str, schema: &CollectionSchema) -> Result<()> {
        let mut statements = format!(
            "REMOVE TABLE IF EXISTS {name};\nDEFINE TABLE {name} SCHEMAFULL;\n"
        );
        for field in &schema.fields {
            // A document's `id` key becomes the record id; it is not a
            // definable field.
            if field.name == "id" {
                continue;
            }
            statements.push_str(&format!(
                "DEFINE FIELD `{}` ON {name} TYPE {};\n",
                field.name,
                field_type(field.kind)
            ));
        }

        self.client
            .query(statements)
            .await
            .map_err(|e| OntoloadError::Store(format!("Failed to recreate {name}: {e}")))?
            .check()
            .map_err(|e| OntoloadError::Store(format!("Failed to recreate {name}: {e}")))?;

        Ok(())
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: &[serde_json::Value],
    ) -> Result<usize> {
        self.client
            .query(format!("INSERT INTO {collection} $documents"))
            .bind(("documents", documents.to_vec()))
            .await
            .map_err(|e| OntoloadError::Store(format!("Insert into {collection} failed: {e}")))?
            .check()
            .map_err(|e| OntoloadError::Store(format!("Insert into {collection} failed: {e}")))?;

        Ok(documents.len())
    }
}
