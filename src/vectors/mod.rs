//! Raw vector add/delete operations.

pub mod model;

pub use model::VectorRecord;

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::documents::model::DeletedCountResponse;
use crate::error::{Result, ValidationSnafu};
use crate::filter::MetadataFilter;

use model::{AddVectorsRequest, AddVectorsResponse, DeleteVectorsRequest};

const VECTORS_PATH: &str = "/api/datastore/vectors";

impl DataStoreClient {
    /// Store vectors in a collection, returning the assigned ids.
    ///
    /// With `auto_embed`, records without an `embedding` are embedded by the
    /// service from their `content`.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name, vectors.count = vectors.len()))]
    pub async fn add_vectors(
        &self,
        collection_name: &str,
        vectors: Vec<VectorRecord>,
        auto_embed: bool,
    ) -> Result<Vec<String>> {
        require_non_empty("collection_name", collection_name)?;
        if vectors.is_empty() {
            return ValidationSnafu { message: "vectors must not be empty" }.fail();
        }

        let request = AddVectorsRequest {
            collection_name: collection_name.to_string(),
            vectors,
            auto_embed,
        };
        let response: AddVectorsResponse =
            self.post_json(VECTORS_PATH, &request, CallKind::Write).await?;
        Ok(response.vector_ids)
    }

    /// Delete vectors by explicit ids and/or by metadata filter.
    ///
    /// Requires ids or a non-empty filter; an unconstrained delete is
    /// rejected locally.
    #[tracing::instrument(skip_all, fields(collection_name = %collection_name))]
    pub async fn delete_vectors(
        &self,
        collection_name: &str,
        vector_ids: Option<Vec<String>>,
        filter: Option<&MetadataFilter>,
    ) -> Result<u64> {
        require_non_empty("collection_name", collection_name)?;
        let filter = filter.and_then(MetadataFilter::non_empty);
        if vector_ids.as_ref().is_none_or(|ids| ids.is_empty()) && filter.is_none() {
            return ValidationSnafu {
                message: "vector ids or a non-empty filter are required to delete vectors",
            }
            .fail();
        }

        let request = DeleteVectorsRequest {
            collection_name: collection_name.to_string(),
            vector_ids,
            filters: filter.cloned(),
        };
        let response: DeletedCountResponse =
            self.delete_json(VECTORS_PATH, &[], Some(&request), CallKind::Write).await?;
        Ok(response.deleted_count)
    }
}
