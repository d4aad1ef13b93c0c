//! Text extraction from uploaded document files.

pub mod model;

pub use model::{ExtractionResult, SupportedFormats};

use reqwest::multipart::{Form, Part};

use crate::client::{CallKind, DataStoreClient, require_non_empty};
use crate::error::Result;

use model::FormatCheckResponse;

const EXTRACT_PATH: &str = "/api/datastore/extraction/extract";
const FORMATS_PATH: &str = "/api/datastore/extraction/formats";
const CHECK_FORMAT_PATH: &str = "/api/datastore/extraction/check-format";

impl DataStoreClient {
    /// Extract text content from a document file.
    ///
    /// The file is sent as multipart form data; the filename drives format
    /// detection on the service side.
    #[tracing::instrument(skip_all, fields(filename = %filename, bytes = file_content.len()))]
    pub async fn extract_text(
        &self,
        file_content: Vec<u8>,
        filename: &str,
    ) -> Result<ExtractionResult> {
        require_non_empty("filename", filename)?;

        let part = Part::bytes(file_content).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        self.post_multipart(EXTRACT_PATH, form).await
    }

    /// List the file formats the extraction endpoint supports.
    pub async fn supported_formats(&self) -> Result<SupportedFormats> {
        self.get_json(FORMATS_PATH, &[], CallKind::Read).await
    }

    /// Check whether a file format is supported, by filename extension.
    pub async fn is_format_supported(&self, filename: &str) -> Result<bool> {
        require_non_empty("filename", filename)?;
        let query = [("filename", filename.to_string())];
        let response: FormatCheckResponse = self
            .request_json::<(), _>(reqwest::Method::POST, CHECK_FORMAT_PATH, &query, None, CallKind::Read)
            .await?;
        Ok(response.supported)
    }
}
