use serde::{Deserialize, Serialize};

/// Text extracted from an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub content: String,
    /// Detected file type (extension without the dot).
    pub file_type: String,
    pub char_count: u64,
    pub filename: String,
}

/// File extensions the extraction endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFormats {
    pub extensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormatCheckResponse {
    #[serde(default)]
    pub supported: bool,
}
