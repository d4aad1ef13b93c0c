use serde::{Deserialize, Serialize};

/// Collection state as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Fully qualified collection name (`tenant_<tenant>_<suffix>`).
    pub name: String,
    #[serde(default)]
    pub vectors_count: u64,
    pub status: String,
    /// Server-side configuration blob, when the service includes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Vector distance metric used by a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

/// Tunables for collection creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionOptions {
    /// Enable multi-vector search (dense + sparse + late interaction).
    pub enable_multivector: bool,
    /// Embedding dimension the collection stores.
    pub vector_size: u32,
    pub distance: Distance,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self { enable_multivector: true, vector_size: 1024, distance: Distance::Cosine }
    }
}

impl CollectionOptions {
    pub fn with_multivector(mut self, enable: bool) -> Self {
        self.enable_multivector = enable;
        self
    }

    pub fn with_vector_size(mut self, vector_size: u32) -> Self {
        self.vector_size = vector_size;
        self
    }

    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = distance;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CreateCollectionRequest {
    pub tenant_id: String,
    pub name: String,
    pub enable_multivector: bool,
    pub vector_size: u32,
    pub distance: Distance,
}

#[derive(Debug, Deserialize)]
pub struct ListCollectionsResponse {
    #[serde(default)]
    pub collections: Vec<CollectionInfo>,
}
