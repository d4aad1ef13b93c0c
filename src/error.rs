use snafu::Snafu;
use url::Url;

/// Error type for every fallible operation in this crate.
///
/// The variants mirror the failure classes a caller can meaningfully handle:
/// address-resolution problems, transport-level failures (connect/timeout),
/// validation of caller input, and the HTTP status classes the datastore
/// service returns (404, 400/422, everything else).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// No usable service address could be resolved (typically a malformed
    /// explicit override URL).
    #[snafu(display("configuration error: {message}"))]
    Configuration { message: String },

    /// The datastore endpoint could not be reached.
    #[snafu(display("failed to connect to '{url}'"))]
    Connection { source: reqwest::Error, url: Url },

    /// The request deadline was exceeded.
    #[snafu(display("request to '{url}' timed out"))]
    Timeout { source: reqwest::Error, url: Url },

    /// The service answered with a non-2xx status that maps to no more
    /// specific variant. Carries the status code and the raw response body.
    #[snafu(display(
        "datastore returned {code}: {}",
        body.as_deref().unwrap_or("<empty body>")
    ))]
    Api { code: u16, body: Option<String> },

    /// The service answered 404 for the requested resource.
    #[snafu(display("resource not found: {message}"))]
    NotFound { message: String },

    /// Caller input failed a local check, or the service rejected the
    /// request with 400/422.
    #[snafu(display("validation failed: {message}"))]
    Validation { message: String },

    /// A request path could not be joined onto the resolved base URL.
    #[snafu(display("failed to construct URL for '{path}'"))]
    ConstructUrl { source: url::ParseError, path: String },

    /// A 2xx response body could not be deserialized into the expected type.
    #[snafu(display("failed to decode response body"))]
    Decode { source: reqwest::Error },

    /// The underlying HTTP client could not be constructed.
    #[snafu(display("failed to build HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_code_and_body() {
        let err = Error::Api { code: 500, body: Some("boom".to_string()) };
        let display = err.to_string();
        assert!(display.contains("500"), "missing code: {display}");
        assert!(display.contains("boom"), "missing body: {display}");
    }

    #[test]
    fn test_api_error_display_with_empty_body() {
        let err = Error::Api { code: 502, body: None };
        assert!(err.to_string().contains("<empty body>"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = Error::Validation { message: "tenant_id must not be empty".to_string() };
        assert_eq!(err.to_string(), "validation failed: tenant_id must not be empty");
    }

    #[test]
    fn test_result_type() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.unwrap(), 42);

        let err: Result<i32> = Err(Error::Configuration { message: "bad".to_string() });
        assert!(err.is_err());
    }
}
