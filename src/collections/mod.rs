//! Collection lifecycle operations.
//!
//! Collections are tenant-scoped; their on-service names follow the
//! `tenant_<tenant_id>_<name>` convention with non-alphanumeric characters
//! normalized to `_` (see [`qualified_collection_name`]).

pub mod model;

pub use model::{CollectionInfo, CollectionOptions, Distance};

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::error::Result;

use model::{CreateCollectionRequest, ListCollectionsResponse};

const COLLECTIONS_PATH: &str = "/api/datastore/collections";

/// Build the fully qualified, tenant-scoped collection name.
///
/// Both components are lowercased and every non-alphanumeric character is
/// replaced with `_`, so `("tenant-123", "kb")` yields `tenant_tenant_123_kb`.
pub fn qualified_collection_name(tenant_id: &str, name: &str) -> String {
    format!("tenant_{}_{}", sanitize(tenant_id), sanitize(name))
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

impl DataStoreClient {
    /// Create a vector collection for a tenant.
    ///
    /// The request targets the qualified name produced by
    /// [`qualified_collection_name`]; the returned [`CollectionInfo`] carries
    /// the name as the service recorded it.
    #[tracing::instrument(skip(self, options))]
    pub async fn create_collection(
        &self,
        tenant_id: &str,
        name: &str,
        options: CollectionOptions,
    ) -> Result<CollectionInfo> {
        require_non_empty("tenant_id", tenant_id)?;
        require_non_empty("name", name)?;

        let request = CreateCollectionRequest {
            tenant_id: tenant_id.to_string(),
            name: qualified_collection_name(tenant_id, name),
            enable_multivector: options.enable_multivector,
            vector_size: options.vector_size,
            distance: options.distance,
        };
        self.post_json(COLLECTIONS_PATH, &request, CallKind::Write).await
    }

    /// Fetch collection metadata.
    pub async fn get_collection_info(&self, collection_name: &str) -> Result<CollectionInfo> {
        require_non_empty("collection_name", collection_name)?;
        let path = format!("{COLLECTIONS_PATH}/{collection_name}");
        self.get_json(&path, &[], CallKind::Read).await
    }

    /// List collections, optionally limited to one tenant.
    pub async fn list_collections(&self, tenant_id: Option<&str>) -> Result<Vec<CollectionInfo>> {
        let mut query = Vec::new();
        if let Some(tenant_id) = tenant_id {
            require_non_empty("tenant_id", tenant_id)?;
            query.push(("tenant_id", tenant_id.to_string()));
        }
        let response: ListCollectionsResponse =
            self.get_json(COLLECTIONS_PATH, &query, CallKind::Read).await?;
        Ok(response.collections)
    }

    /// Delete a collection.
    ///
    /// `force` removes the collection even when it still holds vectors.
    #[tracing::instrument(skip(self))]
    pub async fn delete_collection(
        &self,
        collection_name: &str,
        tenant_id: Option<&str>,
        force: bool,
    ) -> Result<()> {
        require_non_empty("collection_name", collection_name)?;

        let mut query = vec![("force", force.to_string())];
        if let Some(tenant_id) = tenant_id {
            query.push(("tenant_id", tenant_id.to_string()));
        }
        let path = format!("{COLLECTIONS_PATH}/{collection_name}");
        let _: serde_json::Value =
            self.delete_json::<(), _>(&path, &query, None, CallKind::Write).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_normalizes_hyphens() {
        assert_eq!(qualified_collection_name("tenant-123", "kb"), "tenant_tenant_123_kb");
    }

    #[test]
    fn test_qualified_name_plain_components() {
        assert_eq!(
            qualified_collection_name("test-tenant", "mycollection"),
            "tenant_test_tenant_mycollection"
        );
    }

    #[test]
    fn test_qualified_name_lowercases_and_replaces_symbols() {
        assert_eq!(qualified_collection_name("Acme Corp", "Q4/Docs"), "tenant_acme_corp_q4_docs");
    }
}
