use std::time::Duration;

use reqwest::ClientBuilder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use snafu::ResultExt;

use crate::client::DataStoreClient;
use crate::config::DiscoveryConfig;
use crate::error::{BuildHttpClientSnafu, Result};

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A builder for [`DataStoreClient`].
///
/// ```no_run
/// use std::time::Duration;
/// use datastore_client::DataStoreClient;
///
/// # fn main() -> datastore_client::Result<()> {
/// let client = DataStoreClient::builder()
///     .with_base_url("http://localhost:8000")
///     .with_read_timeout(Duration::from_secs(30))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DataStoreBuilder {
    discovery: DiscoveryConfig,
    read_timeout: Duration,
    connect_timeout: Duration,
    client_builder: ClientBuilder,
    headers: HeaderMap,
}

impl Default for DataStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStoreBuilder {
    pub fn new() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            client_builder: ClientBuilder::default(),
            headers: HeaderMap::new(),
        }
    }

    /// Sets a direct base URL, bypassing registry and environment tiers.
    ///
    /// The value is validated during address resolution; a malformed override
    /// surfaces as `Error::Configuration` on the first request.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.discovery.override_url = Some(base_url.into());
        self
    }

    /// Sets the full discovery configuration (registry, configured URL,
    /// service name). An override set via [`with_base_url`](Self::with_base_url)
    /// is preserved.
    pub fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        let override_url = self.discovery.override_url.take().or(discovery.override_url.clone());
        self.discovery = DiscoveryConfig { override_url, ..discovery };
        self
    }

    /// Overall per-request deadline (default 60 s).
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Connection-establishment deadline (default 10 s).
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets a custom `reqwest::ClientBuilder` for full control over the
    /// transport (pooling, TLS, proxies).
    pub fn with_http_client(mut self, client_builder: ClientBuilder) -> Self {
        self.client_builder = client_builder;
        self
    }

    /// Adds a header sent with every request (authentication tokens, trace
    /// identifiers).
    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn build(self) -> Result<DataStoreClient> {
        let http = self
            .client_builder
            .timeout(self.read_timeout)
            .connect_timeout(self.connect_timeout)
            .default_headers(self.headers)
            .build()
            .context(BuildHttpClientSnafu)?;
        Ok(DataStoreClient::from_parts(http, self.discovery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        assert!(DataStoreBuilder::new().build().is_ok());
    }

    #[test]
    fn test_with_discovery_preserves_earlier_override() {
        let builder = DataStoreBuilder::new()
            .with_base_url("http://explicit:9000")
            .with_discovery(DiscoveryConfig::offline());
        assert_eq!(builder.discovery.override_url.as_deref(), Some("http://explicit:9000"));
        assert!(!builder.discovery.registry.enabled);
    }

    #[test]
    fn test_with_discovery_keeps_config_override_when_none_set() {
        let discovery = DiscoveryConfig {
            override_url: Some("http://from-config:8000".to_string()),
            ..DiscoveryConfig::offline()
        };
        let builder = DataStoreBuilder::new().with_discovery(discovery);
        assert_eq!(builder.discovery.override_url.as_deref(), Some("http://from-config:8000"));
    }
}
