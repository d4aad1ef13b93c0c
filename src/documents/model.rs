use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::MetadataFilter;

/// A document submitted for chunking and embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDocument {
    pub content: String,
    /// Stable document identifier; the service assigns one when absent.
    pub doc_id: Option<String>,
    pub file_name: Option<String>,
    /// Per-document type override (falls back to the scope's type).
    pub document_type: Option<String>,
}

impl NewDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), ..Self::default() }
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }
}

/// Ownership hierarchy a document is filed under:
/// tenant -> project -> knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentScope {
    pub tenant_id: String,
    pub project_id: String,
    pub kb_id: String,
    pub user_id: Option<String>,
    /// Default document type for the batch (e.g. `document`, `template`,
    /// `viewpoint`, `rule`).
    pub document_type: String,
}

impl DocumentScope {
    pub fn new(
        tenant_id: impl Into<String>,
        project_id: impl Into<String>,
        kb_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            project_id: project_id.into(),
            kb_id: kb_id.into(),
            user_id: None,
            document_type: "document".to_string(),
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }
}

/// Server-side text splitting strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    #[default]
    Sentence,
    Paragraph,
    Fixed,
}

/// Parameters for server-side chunking (performed by the service; the client
/// only passes them through).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkConfig {
    pub strategy: ChunkStrategy,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { strategy: ChunkStrategy::Sentence, chunk_size: 1000, chunk_overlap: 200 }
    }
}

/// One chunk produced from a processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub chunk_id: String,
    pub content: String,
    pub start_char: u64,
    pub end_char: u64,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Aggregate outcome of an [`add_documents`](crate::DataStoreClient::add_documents) call.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProcessResult {
    /// Identifier of the first document in the batch, or `batch` when none
    /// was supplied.
    pub document_id: String,
    pub chunks_count: usize,
    pub chunks: Vec<DocumentChunk>,
    pub vector_ids: Option<Vec<String>>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessDocumentRequest {
    pub collection_name: String,
    pub content: String,
    pub tenant_id: String,
    pub project_id: String,
    pub kb_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub document_type: String,
    pub chunk_config: ChunkConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProcessDocumentResponse {
    #[serde(default)]
    pub chunks: Vec<DocumentChunk>,
    #[serde(default)]
    pub vector_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDocumentsRequest {
    pub collection_name: String,
    #[serde(flatten)]
    pub filter: MetadataFilter,
}

#[derive(Debug, Deserialize)]
pub struct DeletedCountResponse {
    #[serde(default)]
    pub deleted_count: u64,
}
