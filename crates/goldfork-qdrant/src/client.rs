// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal Qdrant REST client.

use std::time::Duration;

use goldfork_core::GoldforkError;
use tracing::{debug, info};

use crate::types::{
    CollectionsResponse, CreateCollectionRequest, PointStruct, ScoredPoint, SearchRequest,
    SearchResponse, UpsertPointsRequest, VectorParams,
};

/// HTTP client for the Qdrant REST API.
#[derive(Debug, Clone)]
pub struct QdrantClient {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantClient {
    /// Creates a new Qdrant client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self, GoldforkError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GoldforkError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates the collection if it does not already exist.
    pub async fn ensure_collection(
        &self,
        collection: &str,
        vector_size: usize,
    ) -> Result<(), GoldforkError> {
        let url = format!("{}/collections", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_err)?;
        let listing: CollectionsResponse = parse_response(response).await?;

        if listing
            .result
            .collections
            .iter()
            .any(|c| c.name == collection)
        {
            debug!(collection, "collection already exists");
            return Ok(());
        }

        let url = format!("{}/collections/{collection}", self.base_url);
        let body = CreateCollectionRequest {
            vectors: VectorParams::cosine(vector_size),
        };
        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_err)?;
        check_status(response).await?;
        info!(collection, vector_size, "created collection");
        Ok(())
    }

    /// Upserts points into the collection.
    pub async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<PointStruct>,
    ) -> Result<(), GoldforkError> {
        let url = format!("{}/collections/{collection}/points", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&UpsertPointsRequest { points })
            .send()
            .await
            .map_err(map_transport_err)?;
        check_status(response).await
    }

    /// Searches the collection for the nearest points to `vector`.
    pub async fn search_points(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, GoldforkError> {
        let url = format!("{}/collections/{collection}/points/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                vector,
                limit,
                with_payload: true,
            })
            .send()
            .await
            .map_err(map_transport_err)?;
        let parsed: SearchResponse = parse_response(response).await?;
        Ok(parsed.result)
    }
}

fn map_transport_err(e: reqwest::Error) -> GoldforkError {
    GoldforkError::Search {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

async fn check_status(response: reqwest::Response) -> Result<(), GoldforkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(GoldforkError::Search {
        message: format!("Qdrant returned {status}: {body}"),
        source: None,
    })
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GoldforkError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| GoldforkError::Search {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    if !status.is_success() {
        return Err(GoldforkError::Search {
            message: format!("Qdrant returned {status}: {body}"),
            source: None,
        });
    }
    serde_json::from_str(&body).map_err(|e| GoldforkError::Search {
        message: format!("failed to parse Qdrant response: {e}"),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn ensure_collection_skips_existing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"collections": [{"name": "restaurant_info"}]}
            })))
            .mount(&server)
            .await;

        // No PUT mock mounted -- creation would 404 and fail the test.
        let client = QdrantClient::new(&server.uri()).unwrap();
        client
            .ensure_collection("restaurant_info", 1536)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ensure_collection_creates_missing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": {"collections": []}
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/collections/restaurant_info"))
            .and(body_partial_json(serde_json::json!({
                "vectors": {"size": 1536, "distance": "Cosine"}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"result": true, "status": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri()).unwrap();
        client
            .ensure_collection("restaurant_info", 1536)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn search_points_returns_scored_hits() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections/restaurant_info/points/search"))
            .and(body_partial_json(serde_json::json!({
                "limit": 3,
                "with_payload": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": [
                    {"id": "a", "score": 0.93, "payload": {"full_text": "hours - monday: 11:00-22:00"}}
                ]
            })))
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri()).unwrap();
        let hits = client
            .search_points("restaurant_info", vec![0.1, 0.2], 3)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].score > 0.9);
    }

    #[tokio::test]
    async fn server_error_is_surfaced_as_search_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections/restaurant_info/points/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = QdrantClient::new(&server.uri()).unwrap();
        let result = client
            .search_points("restaurant_info", vec![0.1], 3)
            .await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("500"), "got: {err}");
    }
}
