use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct EmbeddingsRequest {
    pub texts: Vec<String>,
    pub batch_size: usize,
    pub use_cache: bool,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}
