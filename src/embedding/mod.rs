//! Embedding generation via the datastore's embedding endpoint.

pub mod model;

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::error::{Result, ValidationSnafu};

use model::{EmbeddingsRequest, EmbeddingsResponse};

const EMBEDDINGS_PATH: &str = "/api/datastore/embeddings";

/// Server-side batching default.
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 32;

impl DataStoreClient {
    /// Generate embeddings for a batch of texts, in input order.
    pub async fn generate_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.generate_embeddings_batched(texts, DEFAULT_EMBED_BATCH_SIZE).await
    }

    /// Generate embeddings with an explicit server-side batch size.
    #[tracing::instrument(skip_all, fields(texts.count = texts.len(), batch_size = batch_size))]
    pub async fn generate_embeddings_batched(
        &self,
        texts: &[String],
        batch_size: usize,
    ) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return ValidationSnafu { message: "texts must not be empty" }.fail();
        }
        for text in texts {
            require_non_empty("text", text)?;
        }

        let request =
            EmbeddingsRequest { texts: texts.to_vec(), batch_size, use_cache: true };
        let response: EmbeddingsResponse =
            self.post_json(EMBEDDINGS_PATH, &request, CallKind::Write).await?;
        Ok(response.embeddings)
    }
}
