//! Collection loader
//!
//! Persists previously extracted class and relation collections into the
//! document store, one recreated collection each. Loading is destructive:
//! every invocation wipes the target collections before inserting.

use tracing::info;

use ontoload_core::{
    CollectionSchema, DocumentStore, OntologyClass, Result, CLASS_COLLECTION, RELATION_COLLECTION,
};

/// Result of loading both collections
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadSummary {
    /// Number of class records inserted
    pub classes_inserted: usize,
    /// Number of relation records inserted
    pub relations_inserted: usize,
}

impl LoadSummary {
    /// Check if any records were inserted
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Total records inserted
    pub fn total(&self) -> usize {
        self.classes_inserted + self.relations_inserted
    }
}

/// Loader over any document store backend
pub struct Loader<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DocumentStore + ?Sized> Loader<'a, S> {
    /// Create a loader over a connected store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Recreate the class collection and insert the given records.
    ///
    /// An empty input still recreates the collection but performs no insert
    /// call.
    pub async fn load_classes(&self, classes: &[OntologyClass]) -> Result<usize> {
        self.store
            .recreate_collection(CLASS_COLLECTION, &CollectionSchema::class_set())
            .await?;

        if classes.is_empty() {
            info!(collection = CLASS_COLLECTION, "no class records to insert");
            return Ok(0);
        }

        let documents: Vec<serde_json::Value> = classes.iter().map(|c| c.to_document()).collect();
        let inserted = self.store.insert_many(CLASS_COLLECTION, &documents).await?;

        info!(collection = CLASS_COLLECTION, inserted, "inserted class records");
        Ok(inserted)
    }

    /// Recreate the relation collection and insert the given documents.
    ///
    /// Relations arrive already serialized to generic key-value documents.
    pub async fn load_relations(&self, relations: &[serde_json::Value]) -> Result<usize> {
        self.store
            .recreate_collection(RELATION_COLLECTION, &CollectionSchema::relation_set())
            .await?;

        if relations.is_empty() {
            info!(collection = RELATION_COLLECTION, "no relation records to insert");
            return Ok(0);
        }

        let inserted = self
            .store
            .insert_many(RELATION_COLLECTION, relations)
            .await?;

        info!(collection = RELATION_COLLECTION, inserted, "inserted relation records");
        Ok(inserted)
    }

    /// Load both collections
    pub async fn load(
        &self,
        classes: &[OntologyClass],
        relations: &[serde_json::Value],
    ) -> Result<LoadSummary> {
        Ok(LoadSummary {
            classes_inserted: self.load_classes(classes).await?,
            relations_inserted: self.load_relations(relations).await?,
        })
    }
}
