use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::MetadataFilter;

/// One similarity-search match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub content: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerank_score: Option<f32>,
}

/// Knobs for [`similarity_search`](crate::DataStoreClient::similarity_search).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Number of results to return; `None` means the service default (10).
    pub top_k: Option<usize>,
    pub filter: Option<MetadataFilter>,
    /// Drop hits scoring below this threshold.
    pub score_threshold: Option<f32>,
    /// Include raw embeddings in each hit.
    pub include_embeddings: bool,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    pub fn with_embeddings(mut self, include: bool) -> Self {
        self.include_embeddings = include;
        self
    }
}

/// Knobs for [`rag_retrieval`](crate::DataStoreClient::rag_retrieval).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RagOptions {
    /// Number of chunks to retrieve; `None` means the service default (5).
    pub top_k: Option<usize>,
    pub filter: Option<MetadataFilter>,
    /// Carried for wire compatibility; multivector collections rerank via
    /// late interaction regardless of this flag.
    pub rerank: bool,
    pub rerank_top_n: Option<usize>,
}

impl RagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_rerank(mut self, rerank: bool) -> Self {
        self.rerank = rerank;
        self
    }

    pub fn with_rerank_top_n(mut self, rerank_top_n: usize) -> Self {
        self.rerank_top_n = Some(rerank_top_n);
        self
    }
}

/// Assembled retrieval context for downstream prompting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RagContext {
    #[serde(default)]
    pub chunks: Vec<SearchHit>,
    /// All matched content joined into a single prompt-ready string.
    #[serde(default)]
    pub combined_context: String,
    #[serde(default)]
    pub source_documents: Vec<String>,
}

pub(crate) const DEFAULT_SEARCH_TOP_K: usize = 10;
pub(crate) const DEFAULT_RAG_TOP_K: usize = 5;
pub(crate) const DEFAULT_RERANK_TOP_N: usize = 3;

#[derive(Debug, Serialize)]
pub struct SimilaritySearchRequest {
    pub collection_name: String,
    pub query: String,
    pub top_k: usize,
    pub include_embeddings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<MetadataFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct RagRequest {
    pub collection_name: String,
    pub query: String,
    pub top_k: usize,
    pub rerank: bool,
    pub rerank_top_n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<MetadataFilter>,
}

#[derive(Debug, Deserialize)]
pub struct RagResponse {
    #[serde(default)]
    pub context: RagContext,
}
