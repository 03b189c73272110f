// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qdrant-backed semantic context adapter for the Goldfork reservation agent.
//!
//! [`QdrantSearch`] implements [`SearchAdapter`] over the Qdrant REST API.
//! Embeddings come from an injected [`EmbeddingAdapter`], so the search layer
//! stays independent of any particular embedding provider.

pub mod client;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use goldfork_config::model::QdrantConfig;
use goldfork_core::error::GoldforkError;
use goldfork_core::traits::{EmbeddingAdapter, PluginAdapter, SearchAdapter};
use goldfork_core::types::{AdapterType, ContextSnippet, HealthStatus};
use tracing::{debug, info};

use crate::client::QdrantClient;
use crate::types::PointStruct;

/// Semantic context service over Qdrant.
pub struct QdrantSearch {
    client: QdrantClient,
    embedder: Arc<dyn EmbeddingAdapter>,
    collection: String,
    vector_size: usize,
}

impl QdrantSearch {
    /// Creates a new search adapter from configuration and an embedder.
    pub fn new(
        config: &QdrantConfig,
        embedder: Arc<dyn EmbeddingAdapter>,
    ) -> Result<Self, GoldforkError> {
        let client = QdrantClient::new(&config.url)?;
        Ok(Self {
            client,
            embedder,
            collection: config.collection.clone(),
            vector_size: config.vector_size,
        })
    }

    /// Creates the backing collection if it does not exist. Called once at
    /// startup before the adapter serves queries.
    pub async fn ensure_ready(&self) -> Result<(), GoldforkError> {
        self.client
            .ensure_collection(&self.collection, self.vector_size)
            .await
    }
}

#[async_trait]
impl PluginAdapter for QdrantSearch {
    fn name(&self) -> &str {
        "qdrant"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), GoldforkError> {
        debug!("Qdrant search adapter shutting down");
        Ok(())
    }
}

#[async_trait]
impl SearchAdapter for QdrantSearch {
    async fn search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ContextSnippet>, GoldforkError> {
        let vector = self.embedder.embed(query).await?;
        let hits = self
            .client
            .search_points(&self.collection, vector, top_k)
            .await?;

        let snippets = hits
            .into_iter()
            .filter_map(|hit| {
                let payload = hit.payload?;
                let text = payload.get("full_text")?.as_str()?.to_string();
                Some(ContextSnippet {
                    text,
                    score: hit.score,
                })
            })
            .collect();
        Ok(snippets)
    }

    async fn upsert_document(
        &self,
        document: &serde_json::Value,
    ) -> Result<usize, GoldforkError> {
        let entries = flatten_document(document)?;
        let mut points = Vec::with_capacity(entries.len());
        for entry in &entries {
            let vector = self.embedder.embed(&entry.text).await?;
            points.push(PointStruct {
                id: uuid::Uuid::new_v4().to_string(),
                vector,
                payload: entry.payload.clone(),
            });
        }

        let count = points.len();
        self.client.upsert_points(&self.collection, points).await?;
        info!(count, collection = %self.collection, "indexed document entries");
        Ok(count)
    }
}

/// One flattened document entry ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// Text that gets embedded, also stored as the `full_text` payload field.
    pub text: String,
    /// Payload stored alongside the vector.
    pub payload: serde_json::Value,
}

/// Flattens a structured restaurant-info document into indexable entries.
///
/// Each top-level key is a section. Object sections produce one entry per
/// key ("section - key: value"), array sections one per item
/// ("section: item"), scalar sections a single entry ("section: value").
pub fn flatten_document(document: &serde_json::Value) -> Result<Vec<FlatEntry>, GoldforkError> {
    let sections = document.as_object().ok_or_else(|| {
        GoldforkError::Validation("document root must be a JSON object".into())
    })?;

    let mut entries = Vec::new();
    for (section, content) in sections {
        match content {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    let value_text = value_to_text(value);
                    let text = format!("{section} - {key}: {value_text}");
                    entries.push(FlatEntry {
                        payload: serde_json::json!({
                            "section": section,
                            "key": key,
                            "content": value_text,
                            "full_text": text,
                        }),
                        text,
                    });
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    let value_text = value_to_text(item);
                    let text = format!("{section}: {value_text}");
                    entries.push(FlatEntry {
                        payload: serde_json::json!({
                            "section": section,
                            "content": value_text,
                            "full_text": text,
                        }),
                        text,
                    });
                }
            }
            scalar => {
                let value_text = value_to_text(scalar);
                let text = format!("{section}: {value_text}");
                entries.push(FlatEntry {
                    payload: serde_json::json!({
                        "section": section,
                        "content": value_text,
                        "full_text": text,
                    }),
                    text,
                });
            }
        }
    }
    Ok(entries)
}

/// Renders a JSON value as prose text (strings unquoted).
fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Embedder that returns a fixed vector and records nothing.
    struct StubEmbedder {
        vector: Vec<f32>,
    }

    #[async_trait]
    impl PluginAdapter for StubEmbedder {
        fn name(&self) -> &str {
            "stub-embedder"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Embedding
        }
        async fn health_check(&self) -> Result<HealthStatus, GoldforkError> {
            Ok(HealthStatus::Healthy)
        }
    }

    #[async_trait]
    impl EmbeddingAdapter for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, GoldforkError> {
            Ok(self.vector.clone())
        }
    }

    fn test_adapter(base_url: &str) -> QdrantSearch {
        let config = QdrantConfig {
            url: base_url.to_string(),
            collection: "restaurant_info".to_string(),
            vector_size: 2,
        };
        QdrantSearch::new(
            &config,
            Arc::new(StubEmbedder {
                vector: vec![0.1, 0.9],
            }),
        )
        .unwrap()
    }

    #[test]
    fn flatten_object_section() {
        let doc = serde_json::json!({
            "hours": {"monday": "11:00-22:00", "sunday": "10:00-21:00"}
        });
        let entries = flatten_document(&doc).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(
            entries
                .iter()
                .any(|e| e.text == "hours - monday: 11:00-22:00")
        );
        let monday = entries
            .iter()
            .find(|e| e.text.contains("monday"))
            .unwrap();
        assert_eq!(monday.payload["section"], "hours");
        assert_eq!(monday.payload["key"], "monday");
        assert_eq!(monday.payload["full_text"], monday.text);
    }

    #[test]
    fn flatten_array_and_scalar_sections() {
        let doc = serde_json::json!({
            "specials": ["saffron risotto", "lamb shank"],
            "name": "The Golden Fork",
            "capacity": 80
        });
        let entries = flatten_document(&doc).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().any(|e| e.text == "specials: saffron risotto"));
        assert!(entries.iter().any(|e| e.text == "name: The Golden Fork"));
        assert!(entries.iter().any(|e| e.text == "capacity: 80"));
    }

    #[test]
    fn flatten_rejects_non_object_root() {
        let doc = serde_json::json!(["just", "a", "list"]);
        let result = flatten_document(&doc);
        assert!(matches!(result, Err(GoldforkError::Validation(_))));
    }

    #[tokio::test]
    async fn search_maps_payload_to_snippets() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections/restaurant_info/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [
                    {"id": "a", "score": 0.93, "payload": {"full_text": "hours - monday: 11:00-22:00"}},
                    {"id": "b", "score": 0.60, "payload": null},
                    {"id": "c", "score": 0.51, "payload": {"full_text": "name: The Golden Fork"}}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = test_adapter(&server.uri());
        let snippets = adapter.search("when do you open", 3).await.unwrap();

        // The payload-less hit is dropped.
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "hours - monday: 11:00-22:00");
        assert!((snippets[0].score - 0.93).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn context_for_query_joins_top_snippets() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections/restaurant_info/points/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [
                    {"id": "a", "score": 0.9, "payload": {"full_text": "first"}},
                    {"id": "b", "score": 0.8, "payload": {"full_text": "second"}}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = test_adapter(&server.uri());
        let context = adapter.context_for_query("anything").await.unwrap();
        assert_eq!(context.as_deref(), Some("first\nsecond"));
    }

    #[tokio::test]
    async fn context_for_query_empty_result_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections/restaurant_info/points/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"result": []})),
            )
            .mount(&server)
            .await;

        let adapter = test_adapter(&server.uri());
        let context = adapter.context_for_query("anything").await.unwrap();
        assert!(context.is_none());
    }

    #[tokio::test]
    async fn upsert_document_returns_entry_count() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/collections/restaurant_info/points"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"result": {"status": "acknowledged"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = test_adapter(&server.uri());
        let doc = serde_json::json!({
            "hours": {"monday": "11:00-22:00"},
            "specials": ["risotto"]
        });
        let count = adapter.upsert_document(&doc).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn upsert_invalid_document_is_validation_error() {
        let server = MockServer::start().await;
        let adapter = test_adapter(&server.uri());
        let result = adapter.upsert_document(&serde_json::json!("nope")).await;
        assert!(matches!(result, Err(GoldforkError::Validation(_))));
    }
}
