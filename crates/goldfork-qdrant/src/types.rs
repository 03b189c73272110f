// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Qdrant REST API request/response types.
//!
//! Only the narrow surface the context service needs: list collections,
//! create a collection, upsert points, and vector search.

use serde::{Deserialize, Serialize};

// --- Collection types ---

/// Response to `GET /collections`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsResponse {
    pub result: CollectionsResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsResult {
    pub collections: Vec<CollectionDescription>,
}

/// One collection in the collections listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDescription {
    pub name: String,
}

/// Body for `PUT /collections/{name}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCollectionRequest {
    pub vectors: VectorParams,
}

/// Vector storage parameters for a new collection.
#[derive(Debug, Clone, Serialize)]
pub struct VectorParams {
    pub size: usize,
    pub distance: String,
}

impl VectorParams {
    /// Cosine-distance parameters, matching the embedding model's geometry.
    pub fn cosine(size: usize) -> Self {
        Self {
            size,
            distance: "Cosine".to_string(),
        }
    }
}

// --- Point types ---

/// Body for `PUT /collections/{name}/points`.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertPointsRequest {
    pub points: Vec<PointStruct>,
}

/// A single point: id, embedding vector, and payload.
#[derive(Debug, Clone, Serialize)]
pub struct PointStruct {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: serde_json::Value,
}

// --- Search types ---

/// Body for `POST /collections/{name}/points/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub vector: Vec<f32>,
    pub limit: usize,
    pub with_payload: bool,
}

/// Response to a point search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<ScoredPoint>,
}

/// One search hit with its similarity score and payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredPoint {
    pub score: f32,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}
