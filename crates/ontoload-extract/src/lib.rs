//! Ontoload Extract - Term and relation extraction
//!
//! Walks a prepared ontology database through the [`OntologyAdapter`] seam
//! and produces normalized class and relation records scoped to one
//! ontology's namespace. Terms outside the namespace never appear as
//! subjects or objects in the output.

use std::collections::HashSet;

use tracing::debug;

use ontoload_core::{
    namespace_prefix, OntologyAdapter, OntologyClass, OntologyRelation, Result,
    DEFAULT_CLOSURE_PREDICATES,
};

/// Extractor bound to one ontology over a ready adapter
pub struct OntologyExtractor<'a> {
    adapter: &'a dyn OntologyAdapter,
    prefix: String,
}

impl<'a> OntologyExtractor<'a> {
    /// Create an extractor for the named ontology
    pub fn new(adapter: &'a dyn OntologyAdapter, ontology: &str) -> Self {
        Self {
            adapter,
            prefix: namespace_prefix(ontology),
        }
    }

    /// The namespace prefix this extractor filters on
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Produce the full set of class records for the ontology.
    ///
    /// Output order follows the adapter's native enumeration order. Missing
    /// aliases default to an empty list and a missing definition to an empty
    /// string; any other adapter fault propagates.
    pub async fn extract_classes(&self) -> Result<Vec<OntologyClass>> {
        let mut classes = Vec::new();

        for entity in self.namespace_entities().await? {
            let aliases = self.adapter.aliases(&entity).await?;
            let definition = self.adapter.definition(&entity).await?.unwrap_or_default();

            classes.push(
                OntologyClass::new(&entity)
                    .with_alternative_names(aliases)
                    .with_definition(definition),
            );
        }

        debug!(count = classes.len(), prefix = %self.prefix, "extracted class records");
        Ok(classes)
    }

    /// Produce the reflexive hierarchy closure among in-namespace terms,
    /// serialized to generic key-value documents.
    ///
    /// When `predicates` is `None` the default hierarchical predicates
    /// apply. Ancestors outside the namespace are dropped; the surviving set
    /// is deduplicated per entity. Ordering is unspecified.
    pub async fn extract_relations(
        &self,
        predicates: Option<&[String]>,
    ) -> Result<Vec<serde_json::Value>> {
        let predicates: Vec<String> = match predicates {
            Some(given) => given.to_vec(),
            None => DEFAULT_CLOSURE_PREDICATES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        };

        let mut documents = Vec::new();

        for entity in self.namespace_entities().await? {
            let ancestors = self.adapter.ancestors(&entity, &predicates, true).await?;

            let in_namespace: HashSet<String> = ancestors
                .into_iter()
                .filter(|a| a.starts_with(&self.prefix))
                .collect();

            for ancestor in in_namespace {
                // The edge's producing predicate is discarded here; every
                // pair is emitted under the constant hierarchy label.
                let relation = OntologyRelation::is_a(&entity, ancestor);
                documents.push(relation.to_document());
            }
        }

        debug!(count = documents.len(), prefix = %self.prefix, "extracted relation records");
        Ok(documents)
    }

    async fn namespace_entities(&self) -> Result<Vec<String>> {
        let entities = self.adapter.entities().await?;
        Ok(entities
            .into_iter()
            .filter(|e| e.starts_with(&self.prefix))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory adapter fixture; records the predicate lists it was asked for
    #[derive(Default)]
    struct FakeAdapter {
        entities: Vec<String>,
        aliases: HashMap<String, Vec<String>>,
        definitions: HashMap<String, String>,
        ancestors: HashMap<String, Vec<String>>,
        requested_predicates: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl OntologyAdapter for FakeAdapter {
        async fn entities(&self) -> Result<Vec<String>> {
            Ok(self.entities.clone())
        }

        async fn aliases(&self, id: &str) -> Result<Vec<String>> {
            Ok(self.aliases.get(id).cloned().unwrap_or_default())
        }

        async fn definition(&self, id: &str) -> Result<Option<String>> {
            Ok(self.definitions.get(id).cloned())
        }

        async fn ancestors(
            &self,
            id: &str,
            predicates: &[String],
            reflexive: bool,
        ) -> Result<Vec<String>> {
            self.requested_predicates
                .lock()
                .unwrap()
                .push(predicates.to_vec());

            let mut result = self.ancestors.get(id).cloned().unwrap_or_default();
            if reflexive && !result.iter().any(|a| a == id) {
                result.push(id.to_string());
            }
            Ok(result)
        }
    }

    /// The worked `envo` fixture: two terms, one subclass edge, one
    /// cross-namespace ancestor that must be dropped
    fn envo_adapter() -> FakeAdapter {
        FakeAdapter {
            entities: vec![
                "ENVO:0000001".to_string(),
                "ENVO:0000002".to_string(),
                "XAO:0000003".to_string(),
            ],
            aliases: HashMap::from([(
                "ENVO:0000001".to_string(),
                vec!["foo".to_string()],
            )]),
            definitions: HashMap::from([(
                "ENVO:0000001".to_string(),
                "desc1".to_string(),
            )]),
            ancestors: HashMap::from([(
                "ENVO:0000002".to_string(),
                vec!["ENVO:0000001".to_string(), "BFO:0000001".to_string()],
            )]),
            ..Default::default()
        }
    }

    fn pairs(documents: &[serde_json::Value]) -> HashSet<(String, String)> {
        documents
            .iter()
            .map(|d| {
                (
                    d["subject"].as_str().unwrap().to_string(),
                    d["object"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_extract_classes_worked_example() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let classes = extractor.extract_classes().await.unwrap();
        assert_eq!(classes.len(), 2);

        assert_eq!(classes[0].id, "ENVO:0000001");
        assert_eq!(classes[0].alternative_names, ["foo"]);
        assert_eq!(classes[0].definition, "desc1");

        assert_eq!(classes[1].id, "ENVO:0000002");
        assert!(classes[1].alternative_names.is_empty());
        assert!(classes[1].definition.is_empty());
    }

    #[tokio::test]
    async fn test_extract_relations_worked_example() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let documents = extractor.extract_relations(None).await.unwrap();

        let expected: HashSet<(String, String)> = HashSet::from([
            ("ENVO:0000001".to_string(), "ENVO:0000001".to_string()),
            ("ENVO:0000002".to_string(), "ENVO:0000001".to_string()),
            ("ENVO:0000002".to_string(), "ENVO:0000002".to_string()),
        ]);
        assert_eq!(pairs(&documents), expected);
        assert_eq!(documents.len(), 3);

        for document in &documents {
            assert_eq!(document["predicate"], "is_a");
            assert_eq!(document["type"], "OntologyRelation");
        }
    }

    #[tokio::test]
    async fn test_namespace_terms_only() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let classes = extractor.extract_classes().await.unwrap();
        assert!(classes.iter().all(|c| c.id.starts_with("ENVO:")));

        let documents = extractor.extract_relations(None).await.unwrap();
        for (subject, object) in pairs(&documents) {
            assert!(subject.starts_with("ENVO:"));
            assert!(object.starts_with("ENVO:"));
        }
    }

    #[tokio::test]
    async fn test_reflexive_pair_per_entity() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let found = pairs(&extractor.extract_relations(None).await.unwrap());
        for entity in ["ENVO:0000001", "ENVO:0000002"] {
            assert!(found.contains(&(entity.to_string(), entity.to_string())));
        }
    }

    #[tokio::test]
    async fn test_duplicate_ancestors_deduplicated() {
        let mut adapter = envo_adapter();
        adapter.ancestors.insert(
            "ENVO:0000002".to_string(),
            vec![
                "ENVO:0000001".to_string(),
                "ENVO:0000001".to_string(),
                "ENVO:0000002".to_string(),
            ],
        );
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let documents = extractor.extract_relations(None).await.unwrap();
        let from_2: Vec<_> = documents
            .iter()
            .filter(|d| d["subject"] == "ENVO:0000002")
            .collect();
        assert_eq!(from_2.len(), 2);
    }

    #[tokio::test]
    async fn test_default_predicates_requested() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        extractor.extract_relations(None).await.unwrap();

        let requested = adapter.requested_predicates.lock().unwrap();
        assert!(!requested.is_empty());
        for predicates in requested.iter() {
            assert_eq!(predicates, &["rdfs:subClassOf", "BFO:0000050"]);
        }
    }

    #[tokio::test]
    async fn test_explicit_predicates_passed_through() {
        let adapter = envo_adapter();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        let custom = vec!["rdfs:subClassOf".to_string()];
        extractor.extract_relations(Some(&custom)).await.unwrap();

        let requested = adapter.requested_predicates.lock().unwrap();
        for predicates in requested.iter() {
            assert_eq!(predicates, &custom);
        }
    }

    #[tokio::test]
    async fn test_empty_ontology_yields_nothing() {
        let adapter = FakeAdapter::default();
        let extractor = OntologyExtractor::new(&adapter, "envo");

        assert!(extractor.extract_classes().await.unwrap().is_empty());
        assert!(extractor.extract_relations(None).await.unwrap().is_empty());
    }
}
