//! The datastore client and its request plumbing.
//!
//! Every domain operation (collections, documents, vectors, search,
//! embeddings, extraction) funnels through [`DataStoreClient::request_json`]:
//! resolve the service address (memoized), build the request, send it with
//! the configured timeouts, classify the outcome, deserialize the body.

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use snafu::ResultExt;
use tokio::sync::OnceCell;
use url::Url;

use crate::builder::DataStoreBuilder;
use crate::config::DiscoveryConfig;
use crate::discovery::{self, ServiceAddress};
use crate::error::{DecodeSnafu, Error, Result, ValidationSnafu};

/// Typed client for the workflow-datastore service.
///
/// Construct via [`DataStoreClient::builder`] or [`DataStoreClient::from_env`].
/// The service address is resolved on the first request and cached for the
/// lifetime of the instance; independent instances share no state and may be
/// used concurrently.
#[derive(Debug)]
pub struct DataStoreClient {
    http: Client,
    discovery: DiscoveryConfig,
    address: OnceCell<ServiceAddress>,
}

/// Whether an operation may be replayed without duplicating side effects.
///
/// Reads are retried exactly once on connection-level failure; writes are
/// never retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Read,
    Write,
}

/// Outcome of [`DataStoreClient::health_check`].
///
/// Transport failures and non-2xx answers fold into `Unhealthy` instead of an
/// error, so the check is directly usable as a liveness probe.
#[derive(Debug, Clone, PartialEq)]
pub enum Health {
    Healthy { detail: serde_json::Value },
    Unhealthy { reason: String },
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy { .. })
    }
}

impl DataStoreClient {
    /// Start building a client.
    pub fn builder() -> DataStoreBuilder {
        DataStoreBuilder::new()
    }

    /// Build a client whose discovery settings come from the environment
    /// (see [`crate::config`] for the variable names).
    pub fn from_env() -> Result<Self> {
        DataStoreBuilder::new().with_discovery(DiscoveryConfig::from_env()).build()
    }

    pub(crate) fn from_parts(http: Client, discovery: DiscoveryConfig) -> Self {
        Self { http, discovery, address: OnceCell::new() }
    }

    /// The resolved service address, resolving it on first use.
    pub async fn service_address(&self) -> Result<&ServiceAddress> {
        self.address.get_or_try_init(|| discovery::resolve(&self.discovery)).await
    }

    /// Check datastore service health.
    ///
    /// Never fails: any error on the way is folded into
    /// [`Health::Unhealthy`] with a human-readable reason.
    #[tracing::instrument(skip_all)]
    pub async fn health_check(&self) -> Health {
        match self
            .request_json::<(), serde_json::Value>(Method::GET, "/health", &[], None, CallKind::Read)
            .await
        {
            Ok(detail) => Health::Healthy { detail },
            Err(err) => Health::Unhealthy { reason: err.to_string() },
        }
    }

    /// Perform a GET request and deserialize the JSON response.
    pub(crate) async fn get_json<Res: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        kind: CallKind,
    ) -> Result<Res> {
        self.request_json::<(), Res>(Method::GET, path, query, None, kind).await
    }

    /// Perform a POST request with a JSON body and deserialize the response.
    pub(crate) async fn post_json<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
        kind: CallKind,
    ) -> Result<Res> {
        self.request_json(Method::POST, path, &[], Some(body), kind).await
    }

    /// Perform a DELETE request (optionally with a JSON body) and deserialize
    /// the response.
    pub(crate) async fn delete_json<Req: Serialize, Res: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Req>,
        kind: CallKind,
    ) -> Result<Res> {
        self.request_json(Method::DELETE, path, query, body, kind).await
    }

    /// Core request path shared by all JSON operations.
    ///
    /// The request is rebuilt from its parts on retry, so only reads with a
    /// rebuildable body ever go out twice.
    #[tracing::instrument(skip_all, fields(http.method = %method, http.path = path), err)]
    pub(crate) async fn request_json<Req: Serialize, Res: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Req>,
        kind: CallKind,
    ) -> Result<Res> {
        let address = self.service_address().await?;
        let url = address.endpoint(path)?;

        let mut retried = false;
        loop {
            let mut request = self.http.request(method.clone(), url.clone());
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    tracing::debug!(status = response.status().as_u16(), "response received");
                    let response = check_response(response).await?;
                    return response.json().await.context(DecodeSnafu);
                }
                Err(source) => {
                    let err = classify_transport_error(source, url.clone());
                    if !retried && should_retry(&err, kind) {
                        retried = true;
                        tracing::warn!(url = %url, %err, "connection failed, retrying read once");
                        continue;
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Perform a multipart POST (file upload). Never retried: the form body
    /// cannot be rebuilt.
    pub(crate) async fn post_multipart<Res: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Res> {
        let address = self.service_address().await?;
        let url = address.endpoint(path)?;

        let response = self
            .http
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|source| classify_transport_error(source, url))?;
        let response = check_response(response).await?;
        response.json().await.context(DecodeSnafu)
    }
}

/// Map a transport-level failure onto the error taxonomy.
fn classify_transport_error(source: reqwest::Error, url: Url) -> Error {
    if source.is_timeout() {
        Error::Timeout { source, url }
    } else {
        Error::Connection { source, url }
    }
}

/// Single-retry policy: reads on connection failure only.
fn should_retry(err: &Error, kind: CallKind) -> bool {
    kind == CallKind::Read && matches!(err, Error::Connection { .. })
}

/// Map a non-2xx status onto the error taxonomy, capturing the raw body.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.ok();
    match status.as_u16() {
        404 => Err(Error::NotFound { message: body.unwrap_or_default() }),
        400 | 422 => Err(Error::Validation { message: body.unwrap_or_default() }),
        code => Err(Error::Api { code, body }),
    }
}

/// Reject empty identifying fields before any network I/O happens.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        ValidationSnafu { message: format!("{field} must not be empty") }.fail()
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection_error() -> Error {
        // A reqwest::Error is hard to fabricate; Api stands in for the
        // non-retryable case and Connection is produced via a real failed
        // request in the integration tests. Here we only exercise the policy
        // over variants we can construct directly.
        Error::Api { code: 500, body: None }
    }

    #[test]
    fn test_http_errors_are_never_retried() {
        let err = connection_error();
        assert!(!should_retry(&err, CallKind::Read));
        assert!(!should_retry(&err, CallKind::Write));
    }

    #[test]
    fn test_validation_errors_are_never_retried() {
        let err = Error::Validation { message: "nope".to_string() };
        assert!(!should_retry(&err, CallKind::Read));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("tenant_id", "tenant-1").is_ok());
        let err = require_non_empty("tenant_id", "  ").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("tenant_id"));
    }

    #[test]
    fn test_health_is_healthy() {
        let healthy = Health::Healthy { detail: serde_json::json!({"status": "ok"}) };
        assert!(healthy.is_healthy());
        let unhealthy = Health::Unhealthy { reason: "HTTP 503".to_string() };
        assert!(!unhealthy.is_healthy());
    }
}
