//! Ontoload Core - Domain records, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the ontoload
//! pipeline:
//! - Ontology records (classes, relations) and their persisted shapes
//! - The ontology-query and document-store capability traits
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, FetchConfig, LoggingConfig, StoreConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for ontoload operations
#[derive(Error, Debug)]
pub enum OntoloadError {
    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Decompression failed for {path}: {reason}")]
    Decompress { path: String, reason: String },

    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for OntoloadError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OntoloadError>;

// ============================================================================
// Record Constants
// ============================================================================

/// Type tag carried by every persisted class record
pub const CLASS_RECORD_TYPE: &str = "OntologyClass";

/// Type tag carried by every persisted relation record
pub const RELATION_RECORD_TYPE: &str = "OntologyRelation";

/// Predicate label written on every emitted relation record.
///
/// The producing predicate (subclass-of vs. part-of) is not recorded; every
/// closure edge is emitted under this single label.
pub const HIERARCHY_PREDICATE_LABEL: &str = "is_a";

/// Predicates that count as hierarchical when no explicit list is given
pub const DEFAULT_CLOSURE_PREDICATES: [&str; 2] = ["rdfs:subClassOf", "BFO:0000050"];

/// Collection holding class records in the document store
pub const CLASS_COLLECTION: &str = "ontology_class_set";

/// Collection holding relation records in the document store
pub const RELATION_COLLECTION: &str = "ontology_relation_set";

/// Identifier prefix scoping terms to one ontology, e.g. `"ENVO:"` for `"envo"`
pub fn namespace_prefix(ontology: &str) -> String {
    format!("{}:", ontology.to_uppercase())
}

// ============================================================================
// Ontology Records
// ============================================================================

/// A normalized ontology term record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyClass {
    /// Namespaced identifier, e.g. `"ENVO:0000001"`
    pub id: String,

    /// Record type tag
    #[serde(rename = "type")]
    pub record_type: String,

    /// Alternative names (synonyms), empty when the term has none
    pub alternative_names: Vec<String>,

    /// Free-text definition, empty when the term has none
    pub definition: String,
}

impl OntologyClass {
    /// Create a class record with empty aliases and definition
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            record_type: CLASS_RECORD_TYPE.to_string(),
            alternative_names: Vec::new(),
            definition: String::new(),
        }
    }

    /// Set the alternative names
    pub fn with_alternative_names(mut self, names: Vec<String>) -> Self {
        self.alternative_names = names;
        self
    }

    /// Set the definition
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Serialize to a generic key-value document
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A subsumption-style relation between two in-namespace terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyRelation {
    /// Subject term identifier
    pub subject: String,

    /// Predicate label (constant, see [`HIERARCHY_PREDICATE_LABEL`])
    pub predicate: String,

    /// Object term identifier (an ancestor of the subject)
    pub object: String,

    /// Record type tag
    #[serde(rename = "type")]
    pub record_type: String,
}

impl OntologyRelation {
    /// Create a relation record under the constant hierarchy label
    pub fn is_a(subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: HIERARCHY_PREDICATE_LABEL.to_string(),
            object: object.into(),
            record_type: RELATION_RECORD_TYPE.to_string(),
        }
    }

    /// Serialize to a generic key-value document
    pub fn to_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

// ============================================================================
// Collection Schemas
// ============================================================================

/// Field types a collection schema can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    StringArray,
}

/// A declared field on a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Shape descriptor a store applies when (re)creating a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub fields: Vec<FieldSpec>,
}

impl CollectionSchema {
    /// Schema for the class collection
    pub fn class_set() -> Self {
        Self {
            fields: vec![
                FieldSpec { name: "id".into(), kind: FieldKind::String },
                FieldSpec { name: "type".into(), kind: FieldKind::String },
                FieldSpec { name: "alternative_names".into(), kind: FieldKind::StringArray },
                FieldSpec { name: "definition".into(), kind: FieldKind::String },
            ],
        }
    }

    /// Schema for the relation collection
    pub fn relation_set() -> Self {
        Self {
            fields: vec![
                FieldSpec { name: "subject".into(), kind: FieldKind::String },
                FieldSpec { name: "predicate".into(), kind: FieldKind::String },
                FieldSpec { name: "object".into(), kind: FieldKind::String },
                FieldSpec { name: "type".into(), kind: FieldKind::String },
            ],
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Query capability over a prepared ontology database.
///
/// Implementations are thin lookup layers; no ontology reasoning happens
/// behind this trait. The closure returned by [`ancestors`] is expected to
/// be precomputed by whatever produced the database file.
///
/// [`ancestors`]: OntologyAdapter::ancestors
#[async_trait::async_trait]
pub trait OntologyAdapter: Send + Sync {
    /// Enumerate every term known to the adapter, in its native order
    async fn entities(&self) -> Result<Vec<String>>;

    /// Aliases for a term; empty when the term has none
    async fn aliases(&self, id: &str) -> Result<Vec<String>>;

    /// Textual definition for a term, if any
    async fn definition(&self, id: &str) -> Result<Option<String>>;

    /// Ancestors of a term reachable via the given predicates.
    ///
    /// With `reflexive` set, the term itself is included in the result.
    async fn ancestors(&self, id: &str, predicates: &[String], reflexive: bool)
        -> Result<Vec<String>>;
}

/// Persistence capability over a document store
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create the named collection, destroying any prior contents, and apply
    /// the schema for store-side shape validation
    async fn recreate_collection(&self, name: &str, schema: &CollectionSchema) -> Result<()>;

    /// Bulk-insert documents into the named collection, returning the count
    async fn insert_many(&self, collection: &str, documents: &[serde_json::Value])
        -> Result<usize>;
}

// ============================================================================
// Tests
// ============================================================================
