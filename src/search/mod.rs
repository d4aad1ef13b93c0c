//! Similarity search and RAG retrieval.

pub mod model;

pub use model::{RagContext, RagOptions, SearchHit, SearchOptions};

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::error::Result;

use model::{
    DEFAULT_RAG_TOP_K, DEFAULT_RERANK_TOP_N, DEFAULT_SEARCH_TOP_K, RagRequest, RagResponse,
    SearchResponse, SimilaritySearchRequest,
};

const SIMILARITY_PATH: &str = "/api/datastore/search/similarity";
const RAG_PATH: &str = "/api/datastore/search/rag";

/// Build the similarity request body; an empty filter is dropped entirely.
pub(crate) fn build_similarity_request(
    collection_name: &str,
    query: &str,
    options: &SearchOptions,
) -> SimilaritySearchRequest {
    SimilaritySearchRequest {
        collection_name: collection_name.to_string(),
        query: query.to_string(),
        top_k: options.top_k.unwrap_or(DEFAULT_SEARCH_TOP_K),
        include_embeddings: options.include_embeddings,
        filters: options.filter.as_ref().and_then(|f| f.non_empty()).cloned(),
        score_threshold: options.score_threshold,
    }
}

pub(crate) fn build_rag_request(
    collection_name: &str,
    query: &str,
    options: &RagOptions,
) -> RagRequest {
    RagRequest {
        collection_name: collection_name.to_string(),
        query: query.to_string(),
        top_k: options.top_k.unwrap_or(DEFAULT_RAG_TOP_K),
        rerank: options.rerank,
        rerank_top_n: options.rerank_top_n.unwrap_or(DEFAULT_RERANK_TOP_N),
        filters: options.filter.as_ref().and_then(|f| f.non_empty()).cloned(),
    }
}

impl DataStoreClient {
    /// Rank stored content against a query, best match first.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name))]
    pub async fn similarity_search(
        &self,
        collection_name: &str,
        query: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchHit>> {
        require_non_empty("collection_name", collection_name)?;
        require_non_empty("query", query)?;

        let request = build_similarity_request(collection_name, query, &options);
        let response: SearchResponse =
            self.post_json(SIMILARITY_PATH, &request, CallKind::Read).await?;
        Ok(response.results)
    }

    /// Retrieve the most relevant chunks for a query, assembled into a
    /// single combined context string.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name))]
    pub async fn rag_retrieval(
        &self,
        collection_name: &str,
        query: &str,
        options: RagOptions,
    ) -> Result<RagContext> {
        require_non_empty("collection_name", collection_name)?;
        require_non_empty("query", query)?;

        let request = build_rag_request(collection_name, query, &options);
        let response: RagResponse = self.post_json(RAG_PATH, &request, CallKind::Read).await?;
        Ok(response.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MetadataFilter;

    #[test]
    fn test_empty_filter_is_not_sent() {
        let options = SearchOptions::new().with_filter(MetadataFilter::new());
        let request = build_similarity_request("col", "hello", &options);
        assert!(request.filters.is_none());

        let value = serde_json::to_value(&request).unwrap();
        assert!(!value.as_object().unwrap().contains_key("filters"));
    }

    #[test]
    fn test_non_empty_filter_is_sent() {
        let options =
            SearchOptions::new().with_filter(MetadataFilter::new().with_tenant_id("tenant-1"));
        let request = build_similarity_request("col", "hello", &options);
        assert_eq!(request.filters.unwrap().tenant_id.as_deref(), Some("tenant-1"));
    }

    #[test]
    fn test_search_defaults() {
        let request = build_similarity_request("col", "q", &SearchOptions::new());
        assert_eq!(request.top_k, 10);
        assert!(!request.include_embeddings);
        assert!(request.score_threshold.is_none());
    }

    #[test]
    fn test_rag_defaults() {
        let request = build_rag_request("col", "q", &RagOptions::new());
        assert_eq!(request.top_k, 5);
        assert!(!request.rerank);
        assert_eq!(request.rerank_top_n, 3);
        assert!(request.filters.is_none());
    }
}
