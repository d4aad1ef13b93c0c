//! Document ingestion and deletion.
//!
//! Documents are chunked and embedded server-side; the client submits one
//! process request per document and aggregates the results.

pub mod model;

pub use model::{
    ChunkConfig, ChunkStrategy, DocumentChunk, DocumentProcessResult, DocumentScope, NewDocument,
};

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::error::{Result, ValidationSnafu};
use crate::filter::MetadataFilter;

use model::{
    DeleteDocumentsRequest, DeletedCountResponse, ProcessDocumentRequest, ProcessDocumentResponse,
};

const DOCUMENTS_PATH: &str = "/api/datastore/documents";
const PROCESS_PATH: &str = "/api/datastore/documents/process";

impl DataStoreClient {
    /// Add documents to a collection, chunking and embedding them
    /// server-side.
    ///
    /// Each document is processed with its own request; per-document
    /// `doc_id`, `file_name` and `document_type` override the scope defaults.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name, documents.count = documents.len()))]
    pub async fn add_documents(
        &self,
        collection_name: &str,
        documents: &[NewDocument],
        scope: &DocumentScope,
        chunking: ChunkConfig,
    ) -> Result<DocumentProcessResult> {
        require_non_empty("collection_name", collection_name)?;
        require_non_empty("tenant_id", &scope.tenant_id)?;
        require_non_empty("project_id", &scope.project_id)?;
        require_non_empty("kb_id", &scope.kb_id)?;
        if documents.is_empty() {
            return ValidationSnafu { message: "documents must not be empty" }.fail();
        }

        let mut chunks = Vec::new();
        let mut vector_ids = Vec::new();
        for document in documents {
            let request = ProcessDocumentRequest {
                collection_name: collection_name.to_string(),
                content: document.content.clone(),
                tenant_id: scope.tenant_id.clone(),
                project_id: scope.project_id.clone(),
                kb_id: scope.kb_id.clone(),
                doc_id: document.doc_id.clone(),
                file_name: document.file_name.clone(),
                user_id: scope.user_id.clone(),
                document_type: document
                    .document_type
                    .clone()
                    .unwrap_or_else(|| scope.document_type.clone()),
                chunk_config: chunking,
            };
            let response: ProcessDocumentResponse =
                self.post_json(PROCESS_PATH, &request, CallKind::Write).await?;
            chunks.extend(response.chunks);
            if let Some(ids) = response.vector_ids {
                vector_ids.extend(ids);
            }
        }

        Ok(DocumentProcessResult {
            document_id: documents
                .first()
                .and_then(|d| d.doc_id.clone())
                .unwrap_or_else(|| "batch".to_string()),
            chunks_count: chunks.len(),
            chunks,
            vector_ids: if vector_ids.is_empty() { None } else { Some(vector_ids) },
            status: "processed".to_string(),
        })
    }

    /// Delete document vectors matching a filter.
    ///
    /// At least one filter field is required; an unconstrained delete is
    /// rejected locally.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name))]
    pub async fn delete_documents(
        &self,
        collection_name: &str,
        filter: &MetadataFilter,
    ) -> Result<u64> {
        require_non_empty("collection_name", collection_name)?;
        if filter.is_empty() {
            return ValidationSnafu {
                message: "at least one filter field is required to delete documents",
            }
            .fail();
        }

        let request = DeleteDocumentsRequest {
            collection_name: collection_name.to_string(),
            filter: filter.clone(),
        };
        let response: DeletedCountResponse = self
            .delete_json(DOCUMENTS_PATH, &[], Some(&request), CallKind::Write)
            .await?;
        Ok(response.deleted_count)
    }
}
