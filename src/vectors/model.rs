use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::MetadataFilter;

/// A single vector entry to store, with optional precomputed embedding.
///
/// When `embedding` is absent and `auto_embed` is requested, the service
/// embeds `content` itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VectorRecord {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VectorRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), ..Self::default() }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct AddVectorsRequest {
    pub collection_name: String,
    pub vectors: Vec<VectorRecord>,
    pub auto_embed: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddVectorsResponse {
    #[serde(default)]
    pub vector_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteVectorsRequest {
    pub collection_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<MetadataFilter>,
}
